use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

use crate::core::telemetry::{ClockDomain, GpuBackend, RawProcess, Reading, UnavailableReason};
use crate::error::{MonitorError, Result};

const MIB: u64 = 1024 * 1024;

/// CLI backend invoking the nvidia-smi diagnostic tool.
///
/// Scalar metrics use the CSV query modes (`--query-gpu=... --format=csv`);
/// graphics processes come from pattern-matching the fixed-width process
/// table of the default output, since nvidia-smi has no CSV query for them.
/// Every invocation is bounded by a hard timeout; a timed-out or failed call
/// degrades to `query_failed` for that field.
pub struct SmiBackend {
    binary: PathBuf,
    device_index: u32,
    timeout: Duration,
}

impl SmiBackend {
    pub fn new(binary: PathBuf, device_index: u32, timeout: Duration) -> Self {
        Self {
            binary,
            device_index,
            timeout,
        }
    }

    async fn run(&self, args: &[String]) -> Result<String> {
        let mut command = Command::new(&self.binary);
        command.args(args);

        let output = timeout(self.timeout, command.output())
            .await
            .map_err(|_| {
                MonitorError::query_failed(format!(
                    "{} timed out after {}s",
                    self.binary.display(),
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e| {
                MonitorError::query_failed(format!("failed to run {}: {}", self.binary.display(), e))
            })?;

        if !output.status.success() {
            return Err(MonitorError::query_failed(format!(
                "{} exited with {}",
                self.binary.display(),
                output.status
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Run one `--query-gpu` field and return the trimmed single value.
    async fn query_gpu_field(&self, field: &str) -> Result<String> {
        let args = vec![
            format!("--id={}", self.device_index),
            format!("--query-gpu={}", field),
            "--format=csv,noheader,nounits".to_string(),
        ];
        let output = self.run(&args).await?;
        Ok(output.trim().to_string())
    }

    async fn scalar_reading(&self, field: &str) -> Reading<u32> {
        match self.query_gpu_field(field).await {
            Err(_) => Reading::Unavailable(UnavailableReason::QueryFailed),
            Ok(value) if is_not_available(&value) => {
                Reading::Unavailable(UnavailableReason::NotSupported)
            }
            Ok(value) => match value.parse::<u32>() {
                Ok(n) => Reading::Present(n),
                Err(_) => Reading::Unavailable(UnavailableReason::QueryFailed),
            },
        }
    }
}

fn is_not_available(value: &str) -> bool {
    let v = value.trim();
    v.eq_ignore_ascii_case("[N/A]")
        || v.eq_ignore_ascii_case("[Not Supported]")
        || v.eq_ignore_ascii_case("N/A")
}

/// Parse `--query-compute-apps=pid,used_memory --format=csv,noheader,nounits`
/// output. Memory values are MiB. Unparseable rows are skipped, not fatal.
fn parse_compute_csv(output: &str) -> Vec<RawProcess> {
    let mut processes = Vec::new();

    for line in output.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut fields = line.split(',').map(str::trim);
        let pid = match fields.next().and_then(|f| f.parse::<u32>().ok()) {
            Some(pid) => pid,
            None => continue,
        };
        let used_memory_bytes = fields
            .next()
            .filter(|f| !is_not_available(f))
            .and_then(|f| f.parse::<u64>().ok())
            .map(|mib| mib * MIB);

        processes.push(RawProcess {
            pid,
            used_memory_bytes,
        });
    }

    processes
}

/// Parse the process table of the default nvidia-smi output, keeping rows
/// whose type column includes graphics context.
///
/// Rows look like:
/// `|    0   N/A  N/A      1234      G   /usr/lib/xorg/Xorg       102MiB |`
///
/// The pid sits immediately before the type token; memory is the last token.
/// Rows that do not match the shape are skipped.
fn parse_graphics_table(output: &str) -> Vec<RawProcess> {
    let mut processes = Vec::new();

    for line in output.lines() {
        let line = line.trim();
        if !line.starts_with('|') {
            continue;
        }

        let tokens: Vec<&str> = line.trim_matches('|').split_whitespace().collect();

        let type_pos = match tokens
            .iter()
            .position(|t| matches!(*t, "G" | "C" | "C+G" | "G+C"))
        {
            Some(pos) if pos > 0 => pos,
            _ => continue,
        };

        if !tokens[type_pos].contains('G') {
            continue;
        }

        let pid = match tokens[type_pos - 1].parse::<u32>() {
            Ok(pid) => pid,
            Err(_) => continue,
        };

        let used_memory_bytes = tokens
            .last()
            .and_then(|t| t.strip_suffix("MiB"))
            .and_then(|t| t.parse::<u64>().ok())
            .map(|mib| mib * MIB);

        processes.push(RawProcess {
            pid,
            used_memory_bytes,
        });
    }

    processes
}

#[async_trait]
impl GpuBackend for SmiBackend {
    fn kind(&self) -> &'static str {
        "nvidia-smi"
    }

    async fn device_name(&self) -> Option<String> {
        self.query_gpu_field("name").await.ok().filter(|n| !n.is_empty())
    }

    async fn temperature_c(&self) -> Reading<u32> {
        self.scalar_reading("temperature.gpu").await
    }

    async fn fan_count(&self) -> Option<u32> {
        // nvidia-smi has no fan-count query; derive support from fan.speed.
        match self.query_gpu_field("fan.speed").await {
            Err(_) => None,
            Ok(value) if is_not_available(&value) => Some(0),
            Ok(value) => value.parse::<u32>().map(|_| 1).ok(),
        }
    }

    async fn fan_speed_percent(&self) -> Reading<u32> {
        self.scalar_reading("fan.speed").await
    }

    async fn clock_mhz(&self, domain: ClockDomain) -> Reading<u32> {
        let field = match domain {
            ClockDomain::Graphics => "clocks.current.graphics",
            ClockDomain::Memory => "clocks.current.memory",
        };
        self.scalar_reading(field).await
    }

    async fn compute_processes(&self) -> Result<Vec<RawProcess>> {
        let args = vec![
            format!("--id={}", self.device_index),
            "--query-compute-apps=pid,used_memory".to_string(),
            "--format=csv,noheader,nounits".to_string(),
        ];
        let output = self.run(&args).await?;
        Ok(parse_compute_csv(&output))
    }

    async fn graphics_processes(&self) -> Result<Vec<RawProcess>> {
        let args = vec!["-i".to_string(), self.device_index.to_string()];
        let output = self.run(&args).await?;
        Ok(parse_graphics_table(&output))
    }

    async fn process_name(&self, pid: u32) -> Option<String> {
        let comm = tokio::fs::read_to_string(format!("/proc/{pid}/comm"))
            .await
            .ok()?;
        let name = comm.trim();
        if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        }
    }
}
