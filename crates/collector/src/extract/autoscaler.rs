// Copyright 2025 Loadscope Contributors
// SPDX-License-Identifier: Apache-2.0

//! Autoscaler status table extraction.

use super::is_unavailable;
use loadscope_core::{AutoscalerSnapshot, Catalog, ReplicaBounds};
use tracing::debug;

/// Extract replica bounds for every catalog autoscaler found in a status dump.
///
/// The table may be line-wrapped, so it is flattened to a token stream. After
/// an autoscaler's name, the first three integer tokens within the scan window
/// are its MINPODS, MAXPODS and REPLICAS columns. An autoscaler with fewer
/// than three integers in the window has not reported status and is omitted.
pub fn extract_autoscaler(content: &str, catalog: &Catalog) -> AutoscalerSnapshot {
    let mut snapshot = AutoscalerSnapshot::new();
    if is_unavailable(content) {
        return snapshot;
    }

    let tokens: Vec<&str> = content.split_whitespace().collect();
    for spec in &catalog.autoscalers {
        let Some(idx) = tokens.iter().position(|t| *t == spec.id) else {
            debug!(autoscaler = %spec.id, "autoscaler not listed");
            continue;
        };
        let end = (idx + catalog.autoscaler_scan_window)
            .min(tokens.len())
            .max(idx + 1);
        let numbers: Vec<u32> = tokens[idx + 1..end]
            .iter()
            .filter_map(|t| t.parse().ok())
            .take(3)
            .collect();

        match numbers[..] {
            [min_replicas, max_replicas, current_replicas] => snapshot.insert(
                spec.id.clone(),
                ReplicaBounds {
                    min_replicas,
                    max_replicas,
                    current_replicas,
                },
            ),
            _ => debug!(autoscaler = %spec.id, "autoscaler has not reported replica counts"),
        }
    }
    snapshot
}
