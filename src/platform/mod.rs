//! Backend implementations for the telemetry contract.
//!
//! Two variants behind the same trait: the NVML binding and the nvidia-smi
//! CLI. The rest of the service never branches on which one is active.

mod nvml;
mod smi;

pub use nvml::NvmlBackend;
pub use smi::SmiBackend;

use std::sync::Arc;
use std::time::Duration;

use crate::core::config::{BackendKind, Config};
use crate::core::telemetry::GpuBackend;
use crate::error::{MonitorError, Result};

/// Initialize the backend selected by config.
///
/// `Auto` tries NVML first, then falls back to nvidia-smi if the binary can
/// be located. Failure here is the one condition that prevents the service
/// from serving traffic at all.
pub fn init_backend(config: &Config) -> Result<Arc<dyn GpuBackend>> {
    match config.backend {
        BackendKind::Nvml => Ok(Arc::new(NvmlBackend::new(config.device_index)?)),
        BackendKind::Smi => Ok(Arc::new(smi_backend(config)?)),
        BackendKind::Auto => match NvmlBackend::new(config.device_index) {
            Ok(backend) => Ok(Arc::new(backend)),
            Err(e) => {
                log::warn!("NVML unavailable ({e}), falling back to nvidia-smi");
                Ok(Arc::new(smi_backend(config)?))
            }
        },
    }
}

fn smi_backend(config: &Config) -> Result<SmiBackend> {
    let binary = which::which(&config.smi_binary).map_err(|e| {
        MonitorError::backend_unavailable(format!("{} not found: {e}", config.smi_binary))
    })?;

    Ok(SmiBackend::new(
        binary,
        config.device_index,
        Duration::from_secs(config.smi_timeout_secs),
    ))
}
