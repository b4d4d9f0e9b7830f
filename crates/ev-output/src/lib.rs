//! `ev-output` — simulation output writers for the EV charging model.
//!
//! Two backends are provided behind Cargo features:
//!
//! | Feature  | Backend | Files created                             |
//! |----------|---------|-------------------------------------------|
//! | *(none)* | CSV     | `tick_metrics.csv`, `vehicle_snapshots.csv` |
//! | `sqlite` | SQLite  | `output.db`                               |
//!
//! All backends implement [`OutputWriter`] and are driven by
//! [`MetricsObserver`], which implements `ev_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ev_output::{CsvWriter, MetricsObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut obs = MetricsObserver::new(writer);
//! sim.run(&mut obs);
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::MetricsObserver;
pub use row::{TickMetricsRow, VehicleSnapshotRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
