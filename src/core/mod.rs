//! Core service logic.
//!
//! Telemetry aggregation (readings, fan probe, process reconciliation,
//! snapshot assembly) and the alert ledger. Backend implementations live in
//! the platform layer; everything here is backend-agnostic.

pub mod alerts;
pub mod config;
pub mod telemetry;
