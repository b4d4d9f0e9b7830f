//! `ev-world` — location topology and synthetic world generation.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`topology`]  | `Topology` trait, `TravelMatrix`, `TravelMatrixBuilder`   |
//! | [`generator`] | `WorldConfig`, `World`, `NodeKind`, `TripPlan`, scenarios |
//! | [`error`]     | `WorldError`, `WorldResult<T>`                            |
//!
//! # Boundary
//!
//! The simulation core consumes topology through exactly one call:
//! `Topology::edge_duration(from, to) -> Option<f64>` (duration in ticks,
//! fractional values allowed).  Everything else in this crate — node kinds,
//! commute-time sampling, trip plans, charger-placement scenarios — is input
//! preparation and never runs inside the tick loop.

pub mod error;
pub mod generator;
pub mod topology;


pub use error::{WorldError, WorldResult};
pub use generator::{ChargerScenario, NodeKind, TripPlan, World, WorldConfig};
pub use topology::{Topology, TravelMatrix, TravelMatrixBuilder};
