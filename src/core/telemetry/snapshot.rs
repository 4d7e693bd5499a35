use serde::Serialize;
use std::sync::Arc;

use super::backend::{ClockDomain, GpuBackend};
use super::fan::probe_fan;
use super::processes::{reconcile_processes, ProcessInfo};
use super::reading::{FanState, Reading};
use crate::error::{MonitorError, Result};

/// One point-in-time metrics snapshot for the device.
///
/// `None` fields serialize as `null`: the underlying query degraded, the rest
/// of the snapshot is still valid.
#[derive(Debug, Clone, Serialize)]
pub struct GpuSnapshot {
    pub temperature_c: u32,
    pub fan_speed_percent: Option<u32>,
    pub fan_mode: FanState,
    pub gpu_clock_mhz: Option<u32>,
    pub memory_clock_mhz: Option<u32>,
}

/// Assembles per-request snapshots from the injected backend.
///
/// No cross-request state: every call runs a fresh query sequence. Per-field
/// failures degrade that field only; temperature (for metrics) and process
/// enumeration (for processes) are load-bearing and abort their response.
pub struct SnapshotService {
    backend: Arc<dyn GpuBackend>,
}

impl SnapshotService {
    pub fn new(backend: Arc<dyn GpuBackend>) -> Self {
        Self { backend }
    }

    /// Build the metrics snapshot. Fails only when temperature is unreadable.
    pub async fn gpu_metrics(&self) -> Result<GpuSnapshot> {
        let temperature_c = match self.backend.temperature_c().await {
            Reading::Present(t) => t,
            Reading::Unavailable(reason) => {
                return Err(MonitorError::query_failed(format!(
                    "temperature query failed ({reason})"
                )));
            }
        };

        let fan = probe_fan(self.backend.as_ref()).await;
        let gpu_clock_mhz = self.backend.clock_mhz(ClockDomain::Graphics).await.into_option();
        let memory_clock_mhz = self.backend.clock_mhz(ClockDomain::Memory).await.into_option();

        Ok(GpuSnapshot {
            temperature_c,
            fan_speed_percent: fan.speed_percent,
            fan_mode: fan.state,
            gpu_clock_mhz,
            memory_clock_mhz,
        })
    }

    /// Build the reconciled process list. Fails when enumeration fails.
    pub async fn gpu_processes(&self) -> Result<Vec<ProcessInfo>> {
        reconcile_processes(self.backend.as_ref()).await
    }
}
