use async_trait::async_trait;

#[cfg(feature = "nvml")]
use nvml_wrapper::{
    enum_wrappers::device::{Clock, TemperatureSensor},
    enums::device::UsedGpuMemory,
    Device, Nvml,
};

use crate::core::telemetry::{ClockDomain, GpuBackend, RawProcess, Reading, UnavailableReason};
use crate::error::{MonitorError, Result};

/// Native-binding backend using NVML.
///
/// The handle is acquired once at startup; the device is looked up per query
/// so a transient driver hiccup degrades that field only.
pub struct NvmlBackend {
    #[cfg(feature = "nvml")]
    nvml: Nvml,
    device_index: u32,
}

impl NvmlBackend {
    /// Initialize NVML and verify the device exists.
    pub fn new(device_index: u32) -> Result<Self> {
        #[cfg(feature = "nvml")]
        {
            let nvml = Nvml::init().map_err(|e| {
                MonitorError::backend_unavailable(format!("Failed to init NVML: {}", e))
            })?;

            // Verify device exists
            let _ = nvml.device_by_index(device_index).map_err(|e| {
                MonitorError::backend_unavailable(format!("GPU {} not found: {}", device_index, e))
            })?;

            Ok(Self { nvml, device_index })
        }
        #[cfg(not(feature = "nvml"))]
        {
            let _ = device_index;
            Err(MonitorError::backend_unavailable(
                "NVML support not enabled",
            ))
        }
    }

    #[cfg(feature = "nvml")]
    fn get_device(&self) -> std::result::Result<Device<'_>, nvml_wrapper::error::NvmlError> {
        self.nvml.device_by_index(self.device_index)
    }

    #[cfg(feature = "nvml")]
    fn list_processes(
        &self,
        graphics: bool,
    ) -> Result<Vec<RawProcess>> {
        let device = self.get_device().map_err(|e| {
            MonitorError::query_failed(format!("Failed to get GPU device: {}", e))
        })?;

        let raw = if graphics {
            device.running_graphics_processes()
        } else {
            device.running_compute_processes()
        }
        .map_err(|e| MonitorError::query_failed(format!("process enumeration failed: {}", e)))?;

        Ok(raw
            .into_iter()
            .map(|p| RawProcess {
                pid: p.pid,
                used_memory_bytes: match p.used_gpu_memory {
                    UsedGpuMemory::Used(bytes) => Some(bytes),
                    UsedGpuMemory::Unavailable => None,
                },
            })
            .collect())
    }
}

#[cfg(feature = "nvml")]
#[async_trait]
impl GpuBackend for NvmlBackend {
    fn kind(&self) -> &'static str {
        "nvml"
    }

    async fn device_name(&self) -> Option<String> {
        self.get_device().ok()?.name().ok()
    }

    async fn temperature_c(&self) -> Reading<u32> {
        // Any binding error becomes query_failed for this field only.
        match self.get_device() {
            Ok(device) => device.temperature(TemperatureSensor::Gpu).into(),
            Err(_) => Reading::Unavailable(UnavailableReason::QueryFailed),
        }
    }

    async fn fan_count(&self) -> Option<u32> {
        self.get_device().ok()?.num_fans().ok()
    }

    async fn fan_speed_percent(&self) -> Reading<u32> {
        match self.get_device() {
            Ok(device) => device.fan_speed(0).into(),
            Err(_) => Reading::Unavailable(UnavailableReason::QueryFailed),
        }
    }

    async fn clock_mhz(&self, domain: ClockDomain) -> Reading<u32> {
        let clock = match domain {
            ClockDomain::Graphics => Clock::Graphics,
            ClockDomain::Memory => Clock::Memory,
        };
        match self.get_device() {
            Ok(device) => device.clock_info(clock).into(),
            Err(_) => Reading::Unavailable(UnavailableReason::QueryFailed),
        }
    }

    async fn compute_processes(&self) -> Result<Vec<RawProcess>> {
        self.list_processes(false)
    }

    async fn graphics_processes(&self) -> Result<Vec<RawProcess>> {
        self.list_processes(true)
    }

    async fn process_name(&self, pid: u32) -> Option<String> {
        self.nvml.sys_process_name(pid, 128).ok()
    }
}

// Without the nvml feature the constructor already refuses to build a
// backend, but the trait impl keeps the type usable in signatures.
#[cfg(not(feature = "nvml"))]
#[async_trait]
impl GpuBackend for NvmlBackend {
    fn kind(&self) -> &'static str {
        "nvml"
    }

    async fn device_name(&self) -> Option<String> {
        None
    }

    async fn temperature_c(&self) -> Reading<u32> {
        Reading::Unavailable(UnavailableReason::QueryFailed)
    }

    async fn fan_count(&self) -> Option<u32> {
        None
    }

    async fn fan_speed_percent(&self) -> Reading<u32> {
        Reading::Unavailable(UnavailableReason::QueryFailed)
    }

    async fn clock_mhz(&self, _domain: ClockDomain) -> Reading<u32> {
        Reading::Unavailable(UnavailableReason::QueryFailed)
    }

    async fn compute_processes(&self) -> Result<Vec<RawProcess>> {
        Err(MonitorError::backend_unavailable("NVML support not enabled"))
    }

    async fn graphics_processes(&self) -> Result<Vec<RawProcess>> {
        Err(MonitorError::backend_unavailable("NVML support not enabled"))
    }

    async fn process_name(&self, _pid: u32) -> Option<String> {
        None
    }
}
