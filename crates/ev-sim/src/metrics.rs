//! Per-tick fleet aggregates.

use ev_core::Tick;
use ev_fleet::Vehicle;
use ev_station::QueueTable;

/// Fleet-wide aggregates for one completed tick.
///
/// A pure function of vehicle and queue state: [`TickMetrics::collect`] can
/// be re-run against any snapshot and must produce the same numbers.  The
/// counter fields are cumulative since tick 0 (they mirror the monotonic
/// per-vehicle counters), so per-tick deltas are differences between
/// consecutive rows.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TickMetrics {
    /// The tick these aggregates describe.
    pub tick: Tick,
    /// Mean state of charge across the fleet (0 for an empty fleet).
    pub mean_soc: f64,
    /// Total trips completed since tick 0.
    pub trips_completed: u64,
    /// Total state-of-charge actually delivered by chargers since tick 0.
    pub energy_delivered: f64,
    /// Total insufficient-charge (overstay) events since tick 0.
    pub insufficient_charge_events: u64,
    /// Vehicles waiting in some location queue at the end of this tick.
    pub queued_vehicles: usize,
}

impl TickMetrics {
    /// Aggregate the fleet after all vehicles have been stepped for `tick`.
    pub fn collect(tick: Tick, vehicles: &[Vehicle], queues: &QueueTable) -> TickMetrics {
        let mut soc_sum = 0.0;
        let mut trips_completed = 0;
        let mut energy_delivered = 0.0;
        let mut insufficient_charge_events = 0;

        for v in vehicles {
            soc_sum += v.soc;
            trips_completed += v.trips_completed;
            energy_delivered += v.energy_delivered;
            insufficient_charge_events += v.insufficient_charge_events;
        }

        let mean_soc = if vehicles.is_empty() {
            0.0
        } else {
            soc_sum / vehicles.len() as f64
        };

        TickMetrics {
            tick,
            mean_soc,
            trips_completed,
            energy_delivered,
            insufficient_charge_events,
            queued_vehicles: queues.total_waiting(),
        }
    }
}
