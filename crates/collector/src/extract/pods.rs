// Copyright 2025 Loadscope Contributors
// SPDX-License-Identifier: Apache-2.0

//! Pod resource listing extraction.

use super::is_unavailable;
use loadscope_core::{Catalog, PodResourceSnapshot};
use tracing::debug;

/// Parse a CPU quantity into millicores: `500m` is 500, a bare `2` is 2000.
pub fn parse_cpu_millicores(raw: &str) -> Option<u64> {
    match raw.strip_suffix('m') {
        Some(millicores) => millicores.parse().ok(),
        None => {
            let cores: f64 = raw.parse().ok()?;
            (cores.is_finite() && cores >= 0.0).then(|| (cores * 1000.0).round() as u64)
        }
    }
}

/// Parse a memory quantity into mebibytes: `256Mi` is 256.
///
/// `Ki` and `Gi` are converted; anything else is rejected.
pub fn parse_memory_mebibytes(raw: &str) -> Option<u64> {
    if let Some(mebibytes) = raw.strip_suffix("Mi") {
        return mebibytes.parse().ok();
    }
    if let Some(gibibytes) = raw.strip_suffix("Gi") {
        return gibibytes.parse::<u64>().ok()?.checked_mul(1024);
    }
    if let Some(kibibytes) = raw.strip_suffix("Ki") {
        let kibibytes: u64 = kibibytes.parse().ok()?;
        return Some((kibibytes as f64 / 1024.0).round() as u64);
    }
    None
}

/// Extract per-service CPU and memory samples from a pod resource listing.
///
/// The first line is a header. Each following row is `NAME CPU MEMORY`; rows
/// whose pod name matches no catalog service, or whose quantities do not
/// parse, are discarded. Samples are accumulated, not averaged.
pub fn extract_pod_resources(content: &str, catalog: &Catalog) -> PodResourceSnapshot {
    let mut snapshot = PodResourceSnapshot::new();
    if is_unavailable(content) {
        return snapshot;
    }

    for line in content.lines().skip(1) {
        let mut columns = line.split_whitespace();
        let (Some(pod), Some(cpu), Some(memory)) = (columns.next(), columns.next(), columns.next())
        else {
            continue;
        };
        let Some(service) = catalog.service_for_pod(pod) else {
            continue;
        };
        match (parse_cpu_millicores(cpu), parse_memory_mebibytes(memory)) {
            (Some(cpu), Some(memory)) => snapshot.record(&service.name, cpu, memory),
            _ => debug!(pod, cpu, memory, "discarding pod row with unparseable quantities"),
        }
    }
    snapshot
}
