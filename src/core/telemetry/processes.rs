use serde::Serialize;
use std::collections::HashSet;

use super::backend::GpuBackend;
use crate::error::Result;

/// A reconciled process entry. Canonical identity is `pid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessInfo {
    pub pid: u32,
    pub name: String,
    pub used_gpu_memory_bytes: u64,
}

/// Merge the compute and graphics process lists into one deduplicated set.
///
/// Both lists are fetched independently; a failure of either enumeration is a
/// hard error (the caller degrades the whole response). Compute entries are
/// concatenated first, so for a pid present in both contexts the compute
/// entry wins. Output order is first-seen, not sorted by pid.
pub async fn reconcile_processes(backend: &dyn GpuBackend) -> Result<Vec<ProcessInfo>> {
    let compute = backend.compute_processes().await?;
    let graphics = backend.graphics_processes().await?;

    let mut seen: HashSet<u32> = HashSet::new();
    let mut merged = Vec::new();

    for raw in compute.into_iter().chain(graphics) {
        if !seen.insert(raw.pid) {
            continue;
        }

        // Name lookup is independent per pid; a failure never aborts the run.
        let name = backend
            .process_name(raw.pid)
            .await
            .unwrap_or_else(|| "unknown".to_string());

        merged.push(ProcessInfo {
            pid: raw.pid,
            name,
            used_gpu_memory_bytes: raw.used_memory_bytes.unwrap_or(0),
        });
    }

    Ok(merged)
}
