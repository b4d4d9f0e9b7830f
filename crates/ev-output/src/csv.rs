//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `tick_metrics.csv`
//! - `vehicle_snapshots.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, TickMetricsRow, VehicleSnapshotRow};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    metrics:   Writer<File>,
    snapshots: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut metrics = Writer::from_path(dir.join("tick_metrics.csv"))?;
        metrics.write_record([
            "tick",
            "mean_soc",
            "trips_completed",
            "energy_delivered",
            "insufficient_charge_events",
            "queued_vehicles",
        ])?;

        let mut snapshots = Writer::from_path(dir.join("vehicle_snapshots.csv"))?;
        snapshots.write_record(["vehicle_id", "tick", "soc", "location", "state", "charger"])?;

        Ok(Self {
            metrics,
            snapshots,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_tick_metrics(&mut self, row: &TickMetricsRow) -> OutputResult<()> {
        self.metrics.write_record(&[
            row.tick.to_string(),
            row.mean_soc.to_string(),
            row.trips_completed.to_string(),
            row.energy_delivered.to_string(),
            row.insufficient_charge_events.to_string(),
            row.queued_vehicles.to_string(),
        ])?;
        Ok(())
    }

    fn write_vehicle_snapshots(&mut self, rows: &[VehicleSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.vehicle_id.to_string(),
                row.tick.to_string(),
                row.soc.to_string(),
                row.location.to_string(),
                row.state.to_string(),
                row.charger.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.metrics.flush()?;
        self.snapshots.flush()?;
        Ok(())
    }
}
