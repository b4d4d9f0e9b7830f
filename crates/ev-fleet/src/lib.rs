//! `ev-fleet` — the per-vehicle state machine and its inputs.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`itinerary`] | `Leg`, `Itinerary` (consumable, cursor-based)           |
//! | [`vehicle`]   | `Vehicle`, `VehicleState`, `ChargeMode`, `VehicleSpec`  |
//! | [`loader`]    | `load_fleet_csv`, `load_fleet_reader`                   |
//! | [`error`]     | `FleetError`, `FleetResult<T>`                          |
//!
//! # State machine (summary)
//!
//! A vehicle is always in exactly one of two states:
//!
//! ```text
//! Driving { since }             — mid-trip toward itinerary head
//! Charging { since, mode }      — parked at `location`
//!    mode = Idle                  no charger at this location reachable yet
//!         | Queued                waiting in the location's FIFO
//!         | Plugged(charger)      holding the exclusive lease
//! ```
//!
//! The tagged `mode` makes "plugged and queued at once" unrepresentable.
//! All transitions happen inside [`Vehicle::step`], which the scheduler
//! calls exactly once per vehicle per tick, in ascending id order.

pub mod error;
pub mod itinerary;
pub mod loader;
pub mod vehicle;


pub use error::{FleetError, FleetResult};
pub use itinerary::{Itinerary, Leg};
pub use loader::{load_fleet_csv, load_fleet_reader};
pub use vehicle::{ChargeMode, Vehicle, VehicleSpec, VehicleState};
