//! SQLite-backed alert log.
//!
//! Append-only: rows are never updated or pruned here. Ids come from
//! AUTOINCREMENT so they strictly increase with insertion order and are never
//! reused, even across deletes by external tooling. Writes are serialized by
//! the connection mutex, which keeps concurrent inserts atomic.

use parking_lot::Mutex;
use rusqlite::{params, Connection};
use std::path::Path;

use super::AlertRecord;
use crate::error::Result;

pub struct AlertStore {
    conn: Mutex<Connection>,
}

impl AlertStore {
    /// Open (or create) the alert database at the given path.
    pub fn open_at<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;

        // WAL for better behavior under concurrent readers
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;

        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS alerts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp TEXT NOT NULL,
                alert_type TEXT NOT NULL,
                metric TEXT NOT NULL,
                value REAL NOT NULL,
                threshold REAL NOT NULL,
                severity TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_alerts_timestamp ON alerts(timestamp);
            "#,
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Append one record. Returns the assigned id.
    pub fn insert(
        &self,
        timestamp: &str,
        alert_type: &str,
        metric: &str,
        value: f64,
        threshold: f64,
        severity: &str,
    ) -> Result<i64> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO alerts (timestamp, alert_type, metric, value, threshold, severity)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![timestamp, alert_type, metric, value, threshold, severity],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// The most recent `limit` records, newest first (timestamp desc, ties
    /// broken by id desc). `limit <= 0` returns no rows; a limit larger than
    /// the table clamps to what is available.
    pub fn recent(&self, limit: i64) -> Result<Vec<AlertRecord>> {
        if limit <= 0 {
            return Ok(Vec::new());
        }

        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT id, timestamp, alert_type, metric, value, threshold, severity
             FROM alerts
             ORDER BY timestamp DESC, id DESC
             LIMIT ?1",
        )?;

        let rows = stmt.query_map(params![limit], |row| {
            Ok(AlertRecord {
                id: row.get(0)?,
                timestamp: row.get::<_, String>(1)?,
                alert_type: row.get(2)?,
                metric: row.get(3)?,
                value: row.get(4)?,
                threshold: row.get(5)?,
                severity: row.get(6)?,
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }
}
