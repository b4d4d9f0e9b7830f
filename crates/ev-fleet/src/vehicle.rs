//! The vehicle state machine and its per-tick protocol.
//!
//! # Per-tick protocol
//!
//! [`Vehicle::step`] runs exactly one state branch per tick:
//!
//! - **Driving**: once enough ticks have elapsed to cover the edge duration,
//!   arrive — pay the discharge cost for the distance just driven, consume
//!   the itinerary leg, and switch to `Charging`.
//! - **Charging**: try to acquire a charger (fast path or queue path), then
//!   evaluate departure once the dwell has elapsed.  A vehicle that cannot
//!   afford its next leg overstays, counting one insufficient-charge event
//!   per overstayed tick, and retries every tick until charge accumulates.
//!
//! The step mutates the shared [`ChargerRegistry`] and [`QueueTable`]
//! in place; the scheduler's ascending-id iteration makes those mutations
//! visible to later vehicles within the same tick, which is what resolves
//! contention deterministically.
//!
//! # SoC conventions
//!
//! State of charge is clamped at 100 on every charge increment.  Discharge
//! is *not* floored at zero: driving a leg the battery cannot cover leaves a
//! negative SoC, which is a valid, observable state — running flat is a
//! counted condition, not an error.

use ev_core::{ChargerId, NodeId, SimConfig, Tick, VehicleId};
use ev_station::{ChargerRegistry, QueueTable};
use ev_world::{Topology, TripPlan};

use crate::itinerary::{Itinerary, Leg};

// ── State types ───────────────────────────────────────────────────────────────

/// Sub-mode of the `Charging` state.  `Queued` and `Plugged` are mutually
/// exclusive by construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChargeMode {
    /// Parked, neither plugged in nor waiting (e.g. no charger here).
    Idle,
    /// Waiting in this location's FIFO queue.
    Queued,
    /// Holding the exclusive lease on the given charger.
    Plugged(ChargerId),
}

/// The primary vehicle state.  A vehicle is in exactly one of these at any
/// tick boundary.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VehicleState {
    /// Mid-trip toward the itinerary head.  `since` is the departure tick.
    Driving { since: Tick },
    /// Parked at `Vehicle::location`.  `since` is the arrival tick; the
    /// dwell clock measures from it and is never reset by an overstay.
    Charging { since: Tick, mode: ChargeMode },
}

// ── VehicleSpec ───────────────────────────────────────────────────────────────

/// Immutable per-vehicle input: where it starts and where it goes.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleSpec {
    /// Starting location.
    pub start: NodeId,
    /// Battery level at tick 0, in `[0, 100]`.
    pub initial_soc: f64,
    /// Ordered legs to drive, first leg first.
    pub legs: Vec<Leg>,
}

impl VehicleSpec {
    /// A spec with a full battery.
    pub fn new(start: NodeId, legs: Vec<Leg>) -> Self {
        Self { start, initial_soc: 100.0, legs }
    }

    pub fn with_initial_soc(mut self, soc: f64) -> Self {
        self.initial_soc = soc;
        self
    }

    /// Build a spec from a generated [`TripPlan`].
    pub fn from_trip_plan(plan: &TripPlan) -> Self {
        Self::new(
            plan.start,
            plan.stops.iter().map(|&(n, d)| Leg::new(n, d)).collect(),
        )
    }
}

// ── Vehicle ───────────────────────────────────────────────────────────────────

/// One electric vehicle: identity, battery, position, itinerary cursor, and
/// observation counters.
///
/// Identity and itinerary legs never change after construction; everything
/// else is mutated only by [`Vehicle::step`].
#[derive(Clone, Debug)]
pub struct Vehicle {
    pub id: VehicleId,

    /// State of charge.  Nominal range `[0, 100]`; see the module docs for
    /// the clamp/no-floor convention.
    pub soc: f64,

    /// Current node.  Meaningful while parked; while driving it still holds
    /// the *departure* node (needed to price the leg on arrival).
    pub location: NodeId,

    /// Ticks to dwell at the current location, set from the leg consumed on
    /// arrival.
    pub dwell_ticks: u64,

    pub state: VehicleState,

    itinerary: Itinerary,

    // ── Monotonic observation counters ────────────────────────────────────
    pub trips_completed: u64,
    pub energy_delivered: f64,
    pub insufficient_charge_events: u64,
}

impl Vehicle {
    /// Construct a vehicle at tick 0, driving toward its first leg.
    pub fn from_spec(id: VehicleId, spec: &VehicleSpec) -> Vehicle {
        Vehicle {
            id,
            soc: spec.initial_soc,
            location: spec.start,
            dwell_ticks: 0,
            state: VehicleState::Driving { since: Tick::ZERO },
            itinerary: Itinerary::new(spec.legs.clone()),
            trips_completed: 0,
            energy_delivered: 0.0,
            insufficient_charge_events: 0,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn itinerary(&self) -> &Itinerary {
        &self.itinerary
    }

    /// The charger this vehicle currently leases, if any.
    pub fn assigned_charger(&self) -> Option<ChargerId> {
        match self.state {
            VehicleState::Charging { mode: ChargeMode::Plugged(c), .. } => Some(c),
            _ => None,
        }
    }

    pub fn is_plugged_in(&self) -> bool {
        self.assigned_charger().is_some()
    }

    pub fn is_queued(&self) -> bool {
        matches!(
            self.state,
            VehicleState::Charging { mode: ChargeMode::Queued, .. }
        )
    }

    pub fn is_driving(&self) -> bool {
        matches!(self.state, VehicleState::Driving { .. })
    }

    // ── Per-tick protocol ─────────────────────────────────────────────────

    /// Advance this vehicle by one tick.
    ///
    /// Called by the scheduler exactly once per tick, in ascending id order.
    /// Exactly one state branch runs.
    pub fn step<T: Topology>(
        &mut self,
        now:      Tick,
        config:   &SimConfig,
        topology: &T,
        registry: &mut ChargerRegistry,
        queues:   &mut QueueTable,
    ) {
        match self.state {
            VehicleState::Charging { since, mode } => {
                self.charge_step(now, since, mode, config, topology, registry, queues);
            }
            VehicleState::Driving { since } => {
                self.drive_step(now, since, config, topology);
            }
        }
    }

    /// Driving branch: complete the trip once the edge duration has elapsed.
    fn drive_step<T: Topology>(&mut self, now: Tick, since: Tick, config: &SimConfig, topology: &T) {
        // A driving vehicle always has an itinerary head and a defined edge:
        // departure evaluation checked both before the trip began, and the
        // builder validated the whole chain before tick 0.
        let Some(next) = self.itinerary.peek() else { return };
        let Some(edge_ticks) = topology.edge_duration(self.location, next.destination) else {
            return;
        };

        if now.since(since) as f64 >= edge_ticks {
            // Pay for the distance just driven.  No floor: this may push the
            // SoC negative; insufficiency is only ever checked at departure.
            self.soc -= edge_ticks * config.discharge_factor;
            self.trips_completed += 1;

            if let Some(leg) = self.itinerary.advance() {
                self.location = leg.destination;
                self.dwell_ticks = leg.dwell_ticks;
            }
            self.state = VehicleState::Charging { since: now, mode: ChargeMode::Idle };
        }
    }

    /// Charging branch: acquisition scan, then departure evaluation.
    #[allow(clippy::too_many_arguments)]
    fn charge_step<T: Topology>(
        &mut self,
        now:      Tick,
        since:    Tick,
        mode:     ChargeMode,
        config:   &SimConfig,
        topology: &T,
        registry: &mut ChargerRegistry,
        queues:   &mut QueueTable,
    ) {
        let loc = self.location;
        let mut mode = mode;

        // ── Step 1–2: charger acquisition ─────────────────────────────────
        //
        // The id list is copied out so the scan can mutate the registry.
        // Locations with no chargers skip straight to departure evaluation.
        let chargers: Vec<ChargerId> = registry.chargers_at(loc).to_vec();
        if !chargers.is_empty() {
            for &charger in &chargers {
                let plugged = matches!(mode, ChargeMode::Plugged(_));

                if queues.is_empty(loc) || plugged {
                    // Fast path: no queue to respect (or the plug-hold
                    // exemption applies).  First charger that is free or
                    // already ours wins, in registry order.
                    let occupant = registry.occupant(charger);
                    if occupant.is_none() || occupant == Some(self.id) {
                        // Moving to an earlier-registered charger that freed
                        // up: drop the old lease so occupancy stays two-way
                        // consistent.
                        if let ChargeMode::Plugged(old) = mode
                            && old != charger
                        {
                            registry.release(old, self.id);
                        }
                        registry.bind(charger, self.id);
                        mode = ChargeMode::Plugged(charger);

                        // One charge increment per plugged tick, clamped at
                        // 100; only the delta actually delivered is counted.
                        let before = self.soc;
                        self.soc = (self.soc + config.charge_per_tick).min(100.0);
                        self.energy_delivered += self.soc - before;
                        break;
                    }
                } else if queues.peek_head(loc) == Some(self.id)
                    && registry.occupant(charger).is_none()
                {
                    // Queue path: strict head-only service.  The head takes
                    // the first free charger in registry order; everyone
                    // behind it keeps waiting no matter what frees up.
                    // No charge increment on the acquisition tick.
                    queues.pop_head(loc);
                    registry.bind(charger, self.id);
                    mode = ChargeMode::Plugged(charger);
                    break;
                }
            }

            // Still unplugged after the full scan: join the wait-list.
            // `enqueue` is duplicate-free, so retrying each tick is safe.
            if !matches!(mode, ChargeMode::Plugged(_)) {
                queues.enqueue(loc, self.id);
                mode = ChargeMode::Queued;
            }
        }

        // ── Step 3: departure evaluation ──────────────────────────────────
        if now.since(since) >= self.dwell_ticks {
            if let Some(next) = self.itinerary.peek() {
                // The builder validated every leg's edge; an undefined edge
                // here prices the leg as unaffordable rather than panicking.
                let edge_ticks = topology
                    .edge_duration(loc, next.destination)
                    .unwrap_or(f64::INFINITY);
                let needed = edge_ticks * config.discharge_factor;

                if self.soc > needed {
                    // Depart: surrender the charger and any queue slot.
                    match mode {
                        ChargeMode::Plugged(charger) => registry.release(charger, self.id),
                        ChargeMode::Queued => queues.remove(loc, self.id),
                        ChargeMode::Idle => {}
                    }
                    self.state = VehicleState::Driving { since: now };
                    return;
                }

                // Overstay: keep the dwell clock (it keeps re-firing) and
                // count one event per tick spent stranded.
                self.insufficient_charge_events += 1;
            }
            // Exhausted itinerary: the vehicle parks here for good.
        }

        self.state = VehicleState::Charging { since, mode };
    }
}
