//! `ev-sim` — tick loop orchestrator for the EV fleet charging model.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Step     — each vehicle runs its active state branch, in ascending
//!                VehicleId order; charger/queue mutations are immediately
//!                visible to vehicles stepped later this tick.
//!   ② Audit    — (debug builds) charger occupancy and vehicle plug state
//!                are checked for two-way consistency.
//!   ③ Metrics  — fleet aggregates are collected into a TickMetrics and
//!                handed to the observer.
//! ```
//!
//! A run always lasts exactly `total_ticks`; a stranded fleet keeps
//! ticking (and keeps being counted) until the end.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ev_sim::{NoopObserver, SimBuilder};
//! use ev_world::{ChargerScenario, World, WorldConfig};
//!
//! let mut world = World::generate(world_config)?;
//! let specs = world.trip_plans().iter().map(VehicleSpec::from_trip_plan).collect();
//! let placement = world.charger_placement(ChargerScenario::HomesPlusRandom(4));
//!
//! let mut sim = SimBuilder::new(config, world.into_matrix())
//!     .vehicles(specs)
//!     .chargers(placement)
//!     .build()?;
//! sim.run(&mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod metrics;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use metrics::TickMetrics;
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
