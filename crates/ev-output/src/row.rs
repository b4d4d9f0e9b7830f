//! Plain data row types written by output backends.

use ev_core::ChargerId;
use ev_fleet::{ChargeMode, Vehicle, VehicleState};
use ev_sim::TickMetrics;

/// One fleet-aggregate row, recorded every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickMetricsRow {
    pub tick:                       u64,
    pub mean_soc:                   f64,
    pub trips_completed:            u64,
    pub energy_delivered:           f64,
    pub insufficient_charge_events: u64,
    pub queued_vehicles:            u64,
}

impl From<&TickMetrics> for TickMetricsRow {
    fn from(m: &TickMetrics) -> Self {
        Self {
            tick:                       m.tick.0,
            mean_soc:                   m.mean_soc,
            trips_completed:            m.trips_completed,
            energy_delivered:           m.energy_delivered,
            insufficient_charge_events: m.insufficient_charge_events,
            queued_vehicles:            m.queued_vehicles as u64,
        }
    }
}

/// A snapshot of one vehicle's state at a given tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleSnapshotRow {
    pub vehicle_id: u32,
    pub tick:       u64,
    pub soc:        f64,
    /// Current node (departure node while driving).
    pub location:   u32,
    /// `driving`, `idle`, `queued`, or `plugged`.
    pub state:      &'static str,
    /// Leased charger id; `u32::MAX` when not plugged in.
    pub charger:    u32,
}

impl VehicleSnapshotRow {
    /// Snapshot `vehicle` as of `tick`.
    pub fn capture(tick: u64, vehicle: &Vehicle) -> Self {
        let (state, charger) = match vehicle.state {
            VehicleState::Driving { .. } => ("driving", ChargerId::INVALID),
            VehicleState::Charging { mode: ChargeMode::Idle, .. } => ("idle", ChargerId::INVALID),
            VehicleState::Charging { mode: ChargeMode::Queued, .. } => {
                ("queued", ChargerId::INVALID)
            }
            VehicleState::Charging { mode: ChargeMode::Plugged(c), .. } => ("plugged", c),
        };
        Self {
            vehicle_id: vehicle.id.0,
            tick,
            soc: vehicle.soc,
            location: vehicle.location.0,
            state,
            charger: charger.0,
        }
    }
}
