//! `ev-core` — foundational types for the `ev-sim` charging simulation.
//!
//! This crate is a dependency of every other `ev-*` crate.  It intentionally
//! has no `ev-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `VehicleId`, `NodeId`, `ChargerId`                    |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `SimRng` (seeded, reproducible)                       |
//! | [`error`]       | `EvError`, `EvResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{EvError, EvResult};
pub use ids::{ChargerId, NodeId, VehicleId};
pub use rng::SimRng;
pub use time::{SimClock, SimConfig, Tick};
