use std::sync::Arc;

use gpumon::core::telemetry::{
    ClockDomain, FanState, RawProcess, Reading, SnapshotService, UnavailableReason,
};

use super::mock_backend::ScriptedBackend;

#[tokio::test]
async fn temperature_failure_collapses_the_metrics_response() {
    let service = SnapshotService::new(Arc::new(ScriptedBackend::failing_temperature()));
    assert!(service.gpu_metrics().await.is_err());
}

#[tokio::test]
async fn enumeration_failure_collapses_the_process_response() {
    let service = SnapshotService::new(Arc::new(ScriptedBackend::failing_enumeration()));
    assert!(service.gpu_processes().await.is_err());
}

#[tokio::test]
async fn every_degradable_field_can_fail_without_losing_temperature() {
    let backend = ScriptedBackend {
        temperature: Reading::Present(72),
        fan_count: None,
        fan_speed: Reading::Unavailable(UnavailableReason::QueryFailed),
        graphics_clock: Reading::Unavailable(UnavailableReason::NotSupported),
        memory_clock: Reading::Unavailable(UnavailableReason::QueryFailed),
        ..ScriptedBackend::default()
    };

    let snap = SnapshotService::new(Arc::new(backend))
        .gpu_metrics()
        .await
        .unwrap();

    assert_eq!(snap.temperature_c, 72);
    assert_eq!(snap.fan_mode, FanState::NotSupported);
    assert_eq!(snap.fan_speed_percent, None);
    assert_eq!(snap.gpu_clock_mhz, None);
    assert_eq!(snap.memory_clock_mhz, None);
}

#[tokio::test]
async fn cross_context_duplicates_resolve_to_the_compute_entry() {
    let mut backend = ScriptedBackend::default();
    backend.compute = Some(vec![RawProcess {
        pid: 10,
        used_memory_bytes: Some(512),
    }]);
    backend.graphics = Some(vec![
        RawProcess {
            pid: 10,
            used_memory_bytes: Some(999),
        },
        RawProcess {
            pid: 20,
            used_memory_bytes: None,
        },
    ]);
    backend.names.insert(10, "trainer".to_string());

    let procs = SnapshotService::new(Arc::new(backend))
        .gpu_processes()
        .await
        .unwrap();

    assert_eq!(procs.len(), 2);
    assert_eq!(procs[0].pid, 10);
    assert_eq!(procs[0].used_gpu_memory_bytes, 512);
    assert_eq!(procs[0].name, "trainer");
    assert_eq!(procs[1].pid, 20);
    assert_eq!(procs[1].name, "unknown");
    assert_eq!(procs[1].used_gpu_memory_bytes, 0);
}

#[tokio::test]
async fn healthy_backend_yields_a_complete_snapshot() {
    let snap = SnapshotService::new(Arc::new(ScriptedBackend::default()))
        .gpu_metrics()
        .await
        .unwrap();

    assert_eq!(snap.temperature_c, 55);
    assert_eq!(snap.fan_mode, FanState::Active);
    assert_eq!(snap.fan_speed_percent, Some(40));
    assert_eq!(snap.gpu_clock_mhz, Some(1800));
    assert_eq!(snap.memory_clock_mhz, Some(7001));
}

#[tokio::test]
async fn clock_domains_query_independently() {
    let backend = ScriptedBackend {
        graphics_clock: Reading::Unavailable(UnavailableReason::QueryFailed),
        memory_clock: Reading::Present(6000),
        ..ScriptedBackend::default()
    };
    use gpumon::core::telemetry::GpuBackend;

    assert_eq!(
        backend.clock_mhz(ClockDomain::Graphics).await.into_option(),
        None
    );
    assert_eq!(
        backend.clock_mhz(ClockDomain::Memory).await.into_option(),
        Some(6000)
    );
}
