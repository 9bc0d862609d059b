// Copyright 2025 Loadscope Contributors
// SPDX-License-Identifier: Apache-2.0

//! Cluster snapshots captured around a test profile.
//!
//! Two point-in-time reads are taken per profile, one before load ("pre")
//! and one after ("post"). Either may be empty when the cluster was not
//! reachable; an empty snapshot means "data unavailable", never zero.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configured bounds and observed replica count of one autoscaler.
///
/// `current_replicas` is a live value and may transiently sit outside
/// `min_replicas..=max_replicas`; no ordering is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicaBounds {
    /// Configured minimum.
    pub min_replicas: u32,
    /// Configured maximum.
    pub max_replicas: u32,
    /// Replicas running when the snapshot was taken.
    pub current_replicas: u32,
}

/// Autoscaler state keyed by autoscaler identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AutoscalerSnapshot(BTreeMap<String, ReplicaBounds>);

impl AutoscalerSnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the bounds reported for one autoscaler.
    pub fn insert(&mut self, autoscaler: impl Into<String>, bounds: ReplicaBounds) {
        self.0.insert(autoscaler.into(), bounds);
    }

    /// Bounds for one autoscaler, if it reported status.
    pub fn get(&self, autoscaler: &str) -> Option<&ReplicaBounds> {
        self.0.get(autoscaler)
    }

    /// Whether no autoscaler reported status.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of autoscalers that reported status.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate autoscalers in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ReplicaBounds)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Sum of current replicas across all reporting autoscalers.
    ///
    /// Summed in `u64` so that no combination of `u32` counts can overflow.
    pub fn total_replicas(&self) -> Option<u64> {
        if self.0.is_empty() {
            return None;
        }
        Some(self.0.values().map(|b| u64::from(b.current_replicas)).sum())
    }
}

/// CPU and memory samples gathered for one logical service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSamples {
    /// CPU usage per pod, millicores.
    pub cpu_millicores: Vec<u64>,
    /// Memory usage per pod, mebibytes.
    pub memory_mebibytes: Vec<u64>,
}

impl ServiceSamples {
    /// Append one pod's usage.
    pub fn push(&mut self, cpu_millicores: u64, memory_mebibytes: u64) {
        self.cpu_millicores.push(cpu_millicores);
        self.memory_mebibytes.push(memory_mebibytes);
    }

    /// Mean CPU over all samples; `None` when there are none.
    pub fn avg_cpu_millicores(&self) -> Option<f64> {
        mean(&self.cpu_millicores)
    }

    /// Mean memory over all samples; `None` when there are none.
    pub fn avg_memory_mebibytes(&self) -> Option<f64> {
        mean(&self.memory_mebibytes)
    }
}

fn mean(samples: &[u64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<u64>() as f64 / samples.len() as f64)
}

/// Per-service resource usage keyed by logical service name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PodResourceSnapshot(BTreeMap<String, ServiceSamples>);

impl PodResourceSnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one pod row to its service's sample sequences.
    pub fn record(&mut self, service: &str, cpu_millicores: u64, memory_mebibytes: u64) {
        self.0
            .entry(service.to_string())
            .or_default()
            .push(cpu_millicores, memory_mebibytes);
    }

    /// Samples for one service.
    pub fn get(&self, service: &str) -> Option<&ServiceSamples> {
        self.0.get(service)
    }

    /// Whether no pod row was attributed to any service.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate services in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ServiceSamples)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// A snapshot pair taken before and after load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrePost<T> {
    /// Captured before load was applied.
    pub pre: T,
    /// Captured after load finished.
    pub post: T,
}

/// Everything read from the cluster around one test profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterCapture {
    /// Autoscaler table dumps.
    pub autoscaler: PrePost<AutoscalerSnapshot>,
    /// Pod resource listings.
    pub pods: PrePost<PodResourceSnapshot>,
}

impl ClusterCapture {
    /// Whether all four snapshots are empty.
    pub fn is_empty(&self) -> bool {
        self.autoscaler.pre.is_empty()
            && self.autoscaler.post.is_empty()
            && self.pods.pre.is_empty()
            && self.pods.post.is_empty()
    }

    /// Whether either autoscaler snapshot carries data.
    pub fn has_autoscaler_data(&self) -> bool {
        !self.autoscaler.pre.is_empty() || !self.autoscaler.post.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(min: u32, max: u32, current: u32) -> ReplicaBounds {
        ReplicaBounds {
            min_replicas: min,
            max_replicas: max,
            current_replicas: current,
        }
    }

    #[test]
    fn test_total_replicas() {
        let mut snapshot = AutoscalerSnapshot::new();
        assert_eq!(snapshot.total_replicas(), None);
        snapshot.insert("a-hpa", bounds(2, 10, 4));
        snapshot.insert("b-hpa", bounds(1, 5, 1));
        assert_eq!(snapshot.total_replicas(), Some(5));
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn test_total_replicas_beyond_u32() {
        let mut snapshot = AutoscalerSnapshot::new();
        snapshot.insert("a-hpa", bounds(1, 3_000_000_000, 3_000_000_000));
        snapshot.insert("p-hpa", bounds(1, 3_000_000_000, 3_000_000_000));
        assert_eq!(snapshot.total_replicas(), Some(6_000_000_000));
    }

    #[test]
    fn test_averages_use_all_samples() {
        let mut pods = PodResourceSnapshot::new();
        pods.record("service-a", 100, 64);
        pods.record("service-a", 300, 128);
        pods.record("service-a", 200, 96);
        let samples = pods.get("service-a").unwrap();
        assert_eq!(samples.avg_cpu_millicores(), Some(200.0));
        assert_eq!(samples.avg_memory_mebibytes(), Some(96.0));
    }

    #[test]
    fn test_empty_samples_have_no_average() {
        let samples = ServiceSamples::default();
        assert_eq!(samples.avg_cpu_millicores(), None);
        assert_eq!(samples.avg_memory_mebibytes(), None);
    }

    #[test]
    fn test_capture_emptiness() {
        let mut capture = ClusterCapture::default();
        assert!(capture.is_empty());
        assert!(!capture.has_autoscaler_data());
        capture.pods.post.record("gateway-p", 50, 32);
        assert!(!capture.is_empty());
        assert!(!capture.has_autoscaler_data());
    }
}
