//! `MetricsObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use ev_core::Tick;
use ev_fleet::Vehicle;
use ev_sim::{SimObserver, TickMetrics};

use crate::row::{TickMetricsRow, VehicleSnapshotRow};
use crate::writer::OutputWriter;
use crate::OutputError;

/// A [`SimObserver`] that writes tick metrics and vehicle snapshots to any
/// [`OutputWriter`] backend (CSV, SQLite, …).
///
/// Errors from the writer are stored internally because `SimObserver`
/// methods have no return value.  After `sim.run()` returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct MetricsObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> MetricsObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for MetricsObserver<W> {
    fn on_tick_end(&mut self, _tick: Tick, metrics: &TickMetrics) {
        let row = TickMetricsRow::from(metrics);
        let result = self.writer.write_tick_metrics(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, vehicles: &[Vehicle]) {
        let rows: Vec<VehicleSnapshotRow> = vehicles
            .iter()
            .map(|v| VehicleSnapshotRow::capture(tick.0, v))
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_vehicle_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
