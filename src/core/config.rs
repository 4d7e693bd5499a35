use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Which query mechanism to use for device telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// Prefer the NVML binding, fall back to nvidia-smi.
    Auto,
    /// NVML binding only.
    Nvml,
    /// nvidia-smi CLI only.
    Smi,
}

/// Service configuration, parsed from the command line.
#[derive(Debug, Clone, Parser)]
#[command(name = "gpumon", version, about = "Single-device GPU telemetry HTTP service")]
pub struct Config {
    /// Address to bind the HTTP listener to
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub bind_addr: String,

    /// Zero-based index of the GPU to observe
    #[arg(long, default_value_t = 0)]
    pub device_index: u32,

    /// Telemetry backend selection
    #[arg(long, value_enum, default_value_t = BackendKind::Auto)]
    pub backend: BackendKind,

    /// nvidia-smi binary (resolved via PATH when not absolute)
    #[arg(long, default_value = "nvidia-smi")]
    pub smi_binary: String,

    /// Hard timeout for each nvidia-smi invocation, in seconds
    #[arg(long, default_value_t = 5)]
    pub smi_timeout_secs: u64,

    /// Path of the SQLite alert database
    #[arg(long, default_value = "gpumon-alerts.db")]
    pub db_path: PathBuf,
}
