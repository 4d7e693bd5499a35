use super::backend::GpuBackend;
use super::reading::{FanState, Reading};

/// Result of the fan probe: a derived state plus the speed when known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FanProbe {
    pub state: FanState,
    pub speed_percent: Option<u32>,
}

/// Probe fan support and speed.
///
/// A failed fan-count query is treated as "0 fans", not an error state. Only
/// after support is confirmed does a failing speed query map to `unknown`.
pub async fn probe_fan(backend: &dyn GpuBackend) -> FanProbe {
    let count = backend.fan_count().await.unwrap_or(0);

    if count == 0 {
        return FanProbe {
            state: FanState::NotSupported,
            speed_percent: None,
        };
    }

    match backend.fan_speed_percent().await {
        Reading::Present(0) => FanProbe {
            state: FanState::Stopped,
            speed_percent: Some(0),
        },
        Reading::Present(speed) => FanProbe {
            state: FanState::Active,
            speed_percent: Some(speed),
        },
        Reading::Unavailable(_) => FanProbe {
            state: FanState::Unknown,
            speed_percent: None,
        },
    }
}
