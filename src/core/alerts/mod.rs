//! Threshold-crossing alert ledger.
//!
//! A pure recorder: the caller decides when a value crosses a threshold; this
//! component only appends and retrieves. Submissions are never deduplicated
//! or validated against the thresholds they carry.

mod store;

pub use store::AlertStore;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

fn default_severity() -> String {
    "warning".to_string()
}

/// An alert submission, as posted by a caller.
#[derive(Debug, Clone, Deserialize)]
pub struct NewAlert {
    pub alert_type: String,
    pub metric: String,
    pub value: f64,
    pub threshold: f64,
    #[serde(default = "default_severity")]
    pub severity: String,
}

/// A persisted alert. Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertRecord {
    pub id: i64,
    /// UTC instant of insertion, RFC 3339.
    pub timestamp: String,
    pub alert_type: String,
    pub metric: String,
    pub value: f64,
    pub threshold: f64,
    pub severity: String,
}

/// Append-only ledger over the SQLite store.
pub struct AlertLedger {
    store: AlertStore,
}

pub const DEFAULT_LIST_LIMIT: i64 = 100;

impl AlertLedger {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            store: AlertStore::open_at(path)?,
        })
    }

    /// Record an alert at the current UTC instant. Returns the assigned
    /// timestamp.
    pub fn record(&self, alert: &NewAlert) -> Result<String> {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        self.store.insert(
            &timestamp,
            &alert.alert_type,
            &alert.metric,
            alert.value,
            alert.threshold,
            &alert.severity,
        )?;
        Ok(timestamp)
    }

    /// The most recent `limit` alerts, newest first.
    pub fn list(&self, limit: i64) -> Result<Vec<AlertRecord>> {
        self.store.recent(limit)
    }
}
