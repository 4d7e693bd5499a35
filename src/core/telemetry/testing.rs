//! Scriptable backend for unit tests.

use async_trait::async_trait;
use std::collections::HashMap;

use super::backend::{ClockDomain, GpuBackend, RawProcess};
use super::reading::Reading;
use crate::error::{MonitorError, Result};

/// In-memory `GpuBackend` whose every answer is scripted by the test.
pub struct MockBackend {
    temperature: Reading<u32>,
    fan_count: Option<u32>,
    fan_speed: Reading<u32>,
    graphics_clock: Reading<u32>,
    memory_clock: Reading<u32>,
    /// `Err` variant simulated with `None` + failure message.
    compute: Option<Vec<RawProcess>>,
    graphics: Option<Vec<RawProcess>>,
    failure_message: String,
    names: HashMap<u32, String>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self {
            temperature: Reading::Present(50),
            fan_count: Some(1),
            fan_speed: Reading::Present(25),
            graphics_clock: Reading::Present(1800),
            memory_clock: Reading::Present(7000),
            compute: Some(Vec::new()),
            graphics: Some(Vec::new()),
            failure_message: "enumeration failed".to_string(),
            names: HashMap::new(),
        }
    }
}

impl MockBackend {
    pub fn with_temperature(mut self, reading: Reading<u32>) -> Self {
        self.temperature = reading;
        self
    }

    pub fn with_fan_count(mut self, count: Option<u32>) -> Self {
        self.fan_count = count;
        self
    }

    pub fn with_fan_speed(mut self, reading: Reading<u32>) -> Self {
        self.fan_speed = reading;
        self
    }

    pub fn with_clock(mut self, domain: ClockDomain, reading: Reading<u32>) -> Self {
        match domain {
            ClockDomain::Graphics => self.graphics_clock = reading,
            ClockDomain::Memory => self.memory_clock = reading,
        }
        self
    }

    pub fn with_compute_processes(mut self, processes: Vec<RawProcess>) -> Self {
        self.compute = Some(processes);
        self
    }

    pub fn with_graphics_processes(mut self, processes: Vec<RawProcess>) -> Self {
        self.graphics = Some(processes);
        self
    }

    pub fn with_compute_failure(mut self, message: &str) -> Self {
        self.compute = None;
        self.failure_message = message.to_string();
        self
    }

    pub fn with_graphics_failure(mut self, message: &str) -> Self {
        self.graphics = None;
        self.failure_message = message.to_string();
        self
    }

    pub fn with_process_name(mut self, pid: u32, name: &str) -> Self {
        self.names.insert(pid, name.to_string());
        self
    }
}

#[async_trait]
impl GpuBackend for MockBackend {
    fn kind(&self) -> &'static str {
        "mock"
    }

    async fn device_name(&self) -> Option<String> {
        Some("Mock GPU".to_string())
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
            .ok_or_else(|| MonitorError::query_failed(self.failure_message.clone()))
    }

    async fn graphics_processes(&self) -> Result<Vec<RawProcess>> {
        self.graphics
            .clone()
            .ok_or_else(|| MonitorError::query_failed(self.failure_message.clone()))
    }

    async fn process_name(&self, pid: u32) -> Option<String> {
        self.names.get(&pid).cloned()
    }
}
