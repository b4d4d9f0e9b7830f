//! CSV fleet loader.
//!
//! # CSV format
//!
//! One row per itinerary leg.  All rows for the same vehicle must share the
//! same `start_node`; legs are taken in file order.
//!
//! ```csv
//! vehicle_id,start_node,destination,dwell_ticks
//! 0,0,3,16
//! 0,0,5,4
//! 0,0,0,20
//! 1,1,3,18
//! 1,1,1,24
//! ```
//!
//! Vehicle ids must be contiguous from 0 — a gap means a vehicle with no
//! legs, which the simulation rejects anyway (empty itineraries are fatal at
//! build time).
//!
//! Initial state of charge is not part of the file; every loaded vehicle
//! starts at 100.  Use [`VehicleSpec::with_initial_soc`] to override.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use ev_core::NodeId;

use crate::vehicle::VehicleSpec;
use crate::{FleetError, FleetResult, Leg};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct FleetRecord {
    vehicle_id:  u32,
    start_node:  u32,
    destination: u32,
    dwell_ticks: u64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load per-vehicle [`VehicleSpec`]s from a CSV file.
///
/// Returns specs indexed by vehicle id (0-based, contiguous).
pub fn load_fleet_csv(path: &Path) -> FleetResult<Vec<VehicleSpec>> {
    let file = std::fs::File::open(path).map_err(FleetError::Io)?;
    load_fleet_reader(file)
}

/// Like [`load_fleet_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedded fixtures.
pub fn load_fleet_reader<R: Read>(reader: R) -> FleetResult<Vec<VehicleSpec>> {
    // ── Parse CSV rows ────────────────────────────────────────────────────
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut by_vehicle: HashMap<u32, Vec<FleetRecord>> = HashMap::new();
    let mut max_id: Option<u32> = None;

    for result in csv_reader.deserialize::<FleetRecord>() {
        let row = result.map_err(|e| FleetError::Parse(e.to_string()))?;
        max_id = Some(max_id.map_or(row.vehicle_id, |m| m.max(row.vehicle_id)));
        by_vehicle.entry(row.vehicle_id).or_default().push(row);
    }

    let Some(max_id) = max_id else {
        return Ok(Vec::new());
    };

    // ── Build one VehicleSpec per id ──────────────────────────────────────
    let mut specs = Vec::with_capacity(max_id as usize + 1);

    for id in 0..=max_id {
        let rows = by_vehicle
            .remove(&id)
            .ok_or(FleetError::NonContiguousIds { expected: id, found: max_id })?;

        let start = rows[0].start_node;
        if rows.iter().any(|r| r.start_node != start) {
            return Err(FleetError::InconsistentStart(id));
        }

        let legs: Vec<Leg> = rows
            .into_iter()
            .map(|r| Leg::new(NodeId(r.destination), r.dwell_ticks))
            .collect();

        specs.push(VehicleSpec::new(NodeId(start), legs));
    }

    Ok(specs)
}
