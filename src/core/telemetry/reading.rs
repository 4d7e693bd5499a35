use serde::Serialize;
use std::fmt;

/// Why a metric could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    /// A successful probe established the feature is absent on this device.
    NotSupported,
    /// The backend call itself raised, timed out, or returned non-zero.
    QueryFailed,
    /// Support was confirmed but a later dependent query failed.
    Unknown,
}

impl fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnavailableReason::NotSupported => write!(f, "not_supported"),
            UnavailableReason::QueryFailed => write!(f, "query_failed"),
            UnavailableReason::Unknown => write!(f, "unknown"),
        }
    }
}

/// Outcome of a single metric query: a value, or a typed reason it is absent.
///
/// Missing-but-expected data is not an error here; only the snapshot
/// assembler decides which readings are load-bearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reading<T> {
    Present(T),
    Unavailable(UnavailableReason),
}

impl<T> Reading<T> {
    /// Collapse into an `Option`, dropping the unavailability reason.
    pub fn into_option(self) -> Option<T> {
        match self {
            Reading::Present(value) => Some(value),
            Reading::Unavailable(_) => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Reading::Present(_))
    }
}

impl<T, E> From<std::result::Result<T, E>> for Reading<T> {
    /// Any backend-level error becomes `query_failed` for that field only.
    fn from(result: std::result::Result<T, E>) -> Self {
        match result {
            Ok(value) => Reading::Present(value),
            Err(_) => Reading::Unavailable(UnavailableReason::QueryFailed),
        }
    }
}

/// Derived fan condition. Never stored; recomputed per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FanState {
    /// Device has no fans (or the count probe failed, treated as 0 fans).
    NotSupported,
    /// Fans exist and the reported speed is 0%.
    Stopped,
    /// Fans exist and are spinning.
    Active,
    /// Fan support confirmed but the speed query failed.
    Unknown,
}
