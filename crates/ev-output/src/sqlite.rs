//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `tick_metrics` and `vehicle_snapshots`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{OutputResult, TickMetricsRow, VehicleSnapshotRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS tick_metrics (
                 tick                       INTEGER PRIMARY KEY,
                 mean_soc                   REAL    NOT NULL,
                 trips_completed            INTEGER NOT NULL,
                 energy_delivered           REAL    NOT NULL,
                 insufficient_charge_events INTEGER NOT NULL,
                 queued_vehicles            INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS vehicle_snapshots (
                 vehicle_id INTEGER NOT NULL,
                 tick       INTEGER NOT NULL,
                 soc        REAL    NOT NULL,
                 location   INTEGER NOT NULL,
                 state      TEXT    NOT NULL,
                 charger    INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_tick_metrics(&mut self, row: &TickMetricsRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_metrics \
             (tick, mean_soc, trips_completed, energy_delivered, \
              insufficient_charge_events, queued_vehicles) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                row.tick,
                row.mean_soc,
                row.trips_completed,
                row.energy_delivered,
                row.insufficient_charge_events,
                row.queued_vehicles,
            ],
        )?;
        Ok(())
    }

    fn write_vehicle_snapshots(&mut self, rows: &[VehicleSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO vehicle_snapshots \
                 (vehicle_id, tick, soc, location, state, charger) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.vehicle_id,
                    row.tick,
                    row.soc,
                    row.location,
                    row.state,
                    row.charger,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn
            .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
