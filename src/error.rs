use std::io;
use thiserror::Error;

/// Custom error type for the gpumon service
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("GPU backend not available: {0}")]
    BackendUnavailable(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for the gpumon service
pub type Result<T> = std::result::Result<T, MonitorError>;

impl MonitorError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        MonitorError::Config(msg.into())
    }

    /// Create a backend-unavailable error
    pub fn backend_unavailable<S: Into<String>>(msg: S) -> Self {
        MonitorError::BackendUnavailable(msg.into())
    }

    /// Create a query-failed error
    pub fn query_failed<S: Into<String>>(msg: S) -> Self {
        MonitorError::QueryFailed(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        MonitorError::Other(msg.into())
    }
}
