//! The `Sim` struct and its tick loop.

use ev_core::{SimClock, SimConfig};
use ev_fleet::Vehicle;
use ev_station::{ChargerRegistry, QueueTable};
use ev_world::Topology;

use crate::{SimObserver, TickMetrics};

/// The main simulation runner.
///
/// `Sim<T>` holds all simulation state and drives the single-phase tick
/// loop: every tick, each vehicle is stepped exactly once, in ascending
/// `VehicleId` order.  Vehicles mutate the shared [`ChargerRegistry`] and
/// [`QueueTable`] as they are stepped, and those mutations are visible to
/// the vehicles stepped later in the *same* tick — that synchronous
/// visibility, combined with the fixed order, is what makes charger
/// contention deterministic: when two vehicles want the same freshly
/// vacated charger on the same tick, the lower id wins.
///
/// After the fleet is stepped, [`TickMetrics`] are collected and handed to
/// the observer.  A run always lasts exactly `config.total_ticks`; there is
/// no early-termination condition.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
#[derive(Debug)]
pub struct Sim<T: Topology> {
    /// Global configuration (total ticks, charge/discharge rates, …).
    pub config: SimConfig,

    /// Simulation clock — tracks the current tick and maps to sim time.
    pub clock: SimClock,

    /// Travel-time provider.  Read-only for the whole run.
    pub topology: T,

    /// The fleet, indexed by `VehicleId`.
    pub vehicles: Vec<Vehicle>,

    /// Charger occupancy, shared by all vehicles.
    pub registry: ChargerRegistry,

    /// Per-location FIFO wait queues, shared by all vehicles.
    pub queues: QueueTable,
}

impl<T: Topology> Sim<T> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) {
        while self.clock.current_tick < self.config.end_tick() {
            let now = self.clock.current_tick;
            observer.on_tick_start(now);
            let metrics = self.advance();
            observer.on_tick_end(now, &metrics);
            if self.config.snapshot_interval_ticks > 0
                && now.0.is_multiple_of(self.config.snapshot_interval_ticks)
            {
                observer.on_snapshot(now, &self.vehicles);
            }
        }
        observer.on_sim_end(self.clock.current_tick);
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`),
    /// without observer callbacks.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks(&mut self, n: u64) -> Option<TickMetrics> {
        let mut last = None;
        for _ in 0..n {
            last = Some(self.advance());
        }
        last
    }

    /// Process one tick and advance the clock, returning that tick's
    /// aggregates.
    pub fn advance(&mut self) -> TickMetrics {
        let now = self.clock.current_tick;

        // Explicit field borrows so the borrow checker sees disjoint access.
        let config = &self.config;
        let topology = &self.topology;
        for vehicle in &mut self.vehicles {
            vehicle.step(now, config, topology, &mut self.registry, &mut self.queues);
        }

        #[cfg(debug_assertions)]
        self.audit_leases();

        let metrics = TickMetrics::collect(now, &self.vehicles, &self.queues);
        self.clock.advance();
        metrics
    }

    // ── Consistency audit ─────────────────────────────────────────────────

    /// Debug-build invariant check: charger occupancy and vehicle plug state
    /// must agree both ways at every tick boundary.
    #[cfg(debug_assertions)]
    fn audit_leases(&self) {
        let now = self.clock.current_tick;
        let mut plugged = 0usize;
        for v in &self.vehicles {
            if let Some(charger) = v.assigned_charger() {
                plugged += 1;
                assert_eq!(
                    self.registry.occupant(charger),
                    Some(v.id),
                    "{now}: vehicle {} plugged into {charger} but registry disagrees",
                    v.id,
                );
                assert!(
                    !self.queues.contains(v.location, v.id),
                    "{now}: vehicle {} is both plugged and queued at {}",
                    v.id,
                    v.location,
                );
            }
        }
        assert_eq!(
            plugged,
            self.registry.occupied_count(),
            "{now}: occupied charger without a plugged vehicle (orphaned lease)",
        );
    }
}
