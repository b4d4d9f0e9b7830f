//! The `OutputWriter` trait implemented by all backend writers.

use crate::{OutputResult, TickMetricsRow, VehicleSnapshotRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// All methods are infallible from the observer's perspective — errors are
/// stored internally and retrieved with
/// [`MetricsObserver::take_error`][crate::MetricsObserver::take_error].
pub trait OutputWriter {
    /// Write one per-tick fleet-aggregate row.
    fn write_tick_metrics(&mut self, row: &TickMetricsRow) -> OutputResult<()>;

    /// Write a batch of vehicle snapshots.
    fn write_vehicle_snapshots(&mut self, rows: &[VehicleSnapshotRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
