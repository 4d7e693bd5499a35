//! Scripted backend shared by the integration tests.

use async_trait::async_trait;
use std::collections::HashMap;

use gpumon::core::telemetry::{ClockDomain, GpuBackend, RawProcess, Reading, UnavailableReason};
use gpumon::{MonitorError, Result};

pub struct ScriptedBackend {
    pub temperature: Reading<u32>,
    pub fan_count: Option<u32>,
    pub fan_speed: Reading<u32>,
    pub graphics_clock: Reading<u32>,
    pub memory_clock: Reading<u32>,
    pub compute: Option<Vec<RawProcess>>,
    pub graphics: Option<Vec<RawProcess>>,
    pub names: HashMap<u32, String>,
}

impl Default for ScriptedBackend {
    fn default() -> Self {
        Self {
            temperature: Reading::Present(55),
            fan_count: Some(1),
            fan_speed: Reading::Present(40),
            graphics_clock: Reading::Present(1800),
            memory_clock: Reading::Present(7001),
            compute: Some(Vec::new()),
            graphics: Some(Vec::new()),
            names: HashMap::new(),
        }
    }
}

impl ScriptedBackend {
    pub fn failing_temperature() -> Self {
        Self {
            temperature: Reading::Unavailable(UnavailableReason::QueryFailed),
            ..Self::default()
        }
    }

    pub fn failing_enumeration() -> Self {
        Self {
            compute: None,
            ..Self::default()
        }
    }
}

#[async_trait]
impl GpuBackend for ScriptedBackend {
    fn kind(&self) -> &'static str {
        "scripted"
    }

    async fn device_name(&self) -> Option<String> {
        Some("Scripted GPU".to_string())
    }

    async fn temperature_c(&self) -> Reading<u32> {
        self.temperature
    }

    async fn fan_count(&self) -> Option<u32> {
        self.fan_count
    }

    async fn fan_speed_percent(&self) -> Reading<u32> {
        self.fan_speed
    }

    async fn clock_mhz(&self, domain: ClockDomain) -> Reading<u32> {
        match domain {
            ClockDomain::Graphics => self.graphics_clock,
            ClockDomain::Memory => self.memory_clock,
        }
    }

    async fn compute_processes(&self) -> Result<Vec<RawProcess>> {
        self.compute
            .clone()
            .ok_or_else(|| MonitorError::query_failed("compute enumeration failed"))
    }

    async fn graphics_processes(&self) -> Result<Vec<RawProcess>> {
        self.graphics
            .clone()
            .ok_or_else(|| MonitorError::query_failed("graphics enumeration failed"))
    }

    async fn process_name(&self, pid: u32) -> Option<String> {
        self.names.get(&pid).cloned()
    }
}
