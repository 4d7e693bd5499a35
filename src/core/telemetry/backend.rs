use async_trait::async_trait;

use super::reading::Reading;
use crate::error::Result;

/// Clock domain to query. Each domain fails independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockDomain {
    Graphics,
    Memory,
}

/// A process entry as reported by one enumeration source, before
/// reconciliation. Memory is `None` when the backend reports no value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawProcess {
    pub pid: u32,
    pub used_memory_bytes: Option<u64>,
}

/// Capability over the two query mechanisms (NVML binding, nvidia-smi CLI).
///
/// Both implementations are substitutable behind this trait; callers never
/// branch on which backend is active. Per-field errors are absorbed into
/// `Reading::Unavailable` — only the process enumeration calls surface a hard
/// error, and the snapshot assembler decides whether that aborts the
/// response.
#[async_trait]
pub trait GpuBackend: Send + Sync {
    /// Short identifier for logs ("nvml" or "nvidia-smi").
    fn kind(&self) -> &'static str;

    /// Device marketing name, best-effort. Used for startup logging only.
    async fn device_name(&self) -> Option<String>;

    async fn temperature_c(&self) -> Reading<u32>;

    /// Number of fans on the device. `None` means the count query itself
    /// failed; the fan probe treats that as 0 fans.
    async fn fan_count(&self) -> Option<u32>;

    async fn fan_speed_percent(&self) -> Reading<u32>;

    async fn clock_mhz(&self, domain: ClockDomain) -> Reading<u32>;

    async fn compute_processes(&self) -> Result<Vec<RawProcess>>;

    async fn graphics_processes(&self) -> Result<Vec<RawProcess>>;

    /// Resolve a pid to a display name. `None` on lookup failure; the
    /// reconciler substitutes "unknown".
    async fn process_name(&self, pid: u32) -> Option<String>;
}
