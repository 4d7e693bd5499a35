//! Telemetry aggregation core.
//!
//! Reconciles readings from the active GPU backend into a single consistent
//! snapshot. Every metric is a [`Reading`]: individual query failures degrade
//! that field only. The two load-bearing queries (temperature, process
//! enumeration) are the exception — their failure collapses the whole
//! response.

pub mod backend;
pub mod fan;
pub mod processes;
pub mod reading;
pub mod snapshot;

pub use backend::{ClockDomain, GpuBackend, RawProcess};
pub use fan::{probe_fan, FanProbe};
pub use processes::{reconcile_processes, ProcessInfo};
pub use reading::{FanState, Reading, UnavailableReason};
pub use snapshot::{GpuSnapshot, SnapshotService};

#[cfg(test)]
pub(crate) mod testing;
