//! `ev-station` — shared charging resources: the charger registry and the
//! per-location wait queues.
//!
//! # Crate layout
//!
//! | Module       | Contents                                        |
//! |--------------|-------------------------------------------------|
//! | [`registry`] | `Charger`, `ChargerRegistry`                    |
//! | [`queue`]    | `QueueTable` (per-location FIFO)                |
//!
//! # Contention model
//!
//! Both structures are mutated in place by whichever vehicle the scheduler
//! is currently processing — strictly sequential, no locking.  A charger
//! vacated by an earlier-processed vehicle is immediately visible to every
//! later-processed vehicle in the same tick.
//!
//! Lease consistency (at most one occupant per charger, occupancy mirrored
//! by exactly one vehicle) is a hard protocol invariant: `bind` and
//! `release` panic on violation rather than silently correcting it, because
//! a violation always indicates a scheduling bug upstream.

pub mod queue;
pub mod registry;

#[cfg(test)]
mod tests;

pub use queue::QueueTable;
pub use registry::{Charger, ChargerRegistry};
