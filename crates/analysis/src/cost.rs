// Copyright 2025 Loadscope Contributors
// SPDX-License-Identifier: Apache-2.0

//! Synthetic pod-time cost estimates.
//!
//! A cost estimate multiplies a blended active-pod count by an assumed
//! wall-clock duration for the full four-profile run. It is a heuristic for
//! comparing scenarios side by side, not a billing figure.
//!
//! # Policies
//!
//! - [`ObservedPodCount`] - Derives pod counts from captured autoscaler tables
//! - [`StaticPodCount`] - Looks pod counts up in a fixed per-scenario table

use loadscope_core::{ScenarioDataset, TestProfile};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Active pods during the quiet and loaded phases of a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PodCounts {
    /// Pods running before load.
    pub baseline: u64,
    /// Pods running at peak load.
    pub spike: u64,
    /// Representative count over the whole run.
    pub blended: f64,
}

impl PodCounts {
    /// Counts with `blended` set to the mean of the two phases.
    pub fn new(baseline: u64, spike: u64) -> Self {
        Self {
            baseline,
            spike,
            blended: (baseline as f64 + spike as f64) / 2.0,
        }
    }

    /// Counts with an explicit blended value.
    pub fn with_blended(baseline: u64, spike: u64, blended: f64) -> Self {
        Self {
            baseline,
            spike,
            blended,
        }
    }
}

/// Pod-hours spent by a scenario over the assumed run duration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    /// Pod counts the estimate is based on.
    pub pods: PodCounts,
    /// Assumed wall-clock minutes for the full run.
    pub run_minutes: f64,
    /// `blended × run_minutes / 60`.
    pub pod_hours: f64,
}

impl CostEstimate {
    /// Estimate pod-hours for the given counts and duration.
    pub fn new(pods: PodCounts, run_minutes: f64) -> Self {
        Self {
            pods,
            run_minutes,
            pod_hours: pods.blended * run_minutes / 60.0,
        }
    }
}

/// Source of the pod counts behind a [`CostEstimate`].
#[cfg_attr(test, mockall::automock)]
pub trait PodCountPolicy {
    /// Name shown next to every estimate produced with this policy.
    fn name(&self) -> &'static str;

    /// Pod counts for one scenario, or `None` when they cannot be determined.
    fn pod_counts(&self, dataset: &ScenarioDataset) -> Option<PodCounts>;
}

/// Pod counts read from the captured autoscaler tables.
///
/// Baseline is the total of the first non-empty pre-load snapshot in profile
/// order; spike is the largest post-load total. When only one side was
/// captured it stands in for both.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObservedPodCount;

impl PodCountPolicy for ObservedPodCount {
    fn name(&self) -> &'static str {
        "observed autoscaler replicas"
    }

    fn pod_counts(&self, dataset: &ScenarioDataset) -> Option<PodCounts> {
        let baseline = TestProfile::ALL
            .into_iter()
            .filter_map(|profile| dataset.capture(profile))
            .find_map(|capture| capture.autoscaler.pre.total_replicas());
        let spike = dataset
            .cluster
            .values()
            .filter_map(|capture| capture.autoscaler.post.total_replicas())
            .max();

        match (baseline, spike) {
            (Some(baseline), Some(spike)) => Some(PodCounts::new(baseline, spike)),
            (Some(only), None) | (None, Some(only)) => Some(PodCounts::new(only, only)),
            (None, None) => None,
        }
    }
}

/// Pod counts from a fixed table keyed by scenario id.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticPodCount {
    table: BTreeMap<String, PodCounts>,
    fallback: Option<PodCounts>,
}

impl StaticPodCount {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            table: BTreeMap::new(),
            fallback: None,
        }
    }

    /// Set the counts for one scenario.
    pub fn with_entry(mut self, scenario: impl Into<String>, pods: PodCounts) -> Self {
        self.table.insert(scenario.into(), pods);
        self
    }

    /// Counts used for scenarios missing from the table.
    pub fn with_fallback(mut self, pods: PodCounts) -> Self {
        self.fallback = Some(pods);
        self
    }

    /// Illustrative counts for the five reference scenarios.
    pub fn illustrative() -> Self {
        Self::new()
            .with_entry("1", PodCounts::with_blended(3, 11, 6.0))
            .with_entry("2", PodCounts::with_blended(6, 13, 8.0))
            .with_entry("3", PodCounts::with_blended(9, 15, 11.0))
            .with_entry("4", PodCounts::with_blended(3, 18, 9.0))
            .with_entry("5", PodCounts::with_blended(11, 11, 11.0))
            .with_fallback(PodCounts::with_blended(3, 11, 6.0))
    }
}

impl Default for StaticPodCount {
    fn default() -> Self {
        Self::new()
    }
}

impl PodCountPolicy for StaticPodCount {
    fn name(&self) -> &'static str {
        "illustrative pod table"
    }

    fn pod_counts(&self, dataset: &ScenarioDataset) -> Option<PodCounts> {
        self.table.get(dataset.id()).copied().or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadscope_core::{
        AutoscalerSnapshot, ClusterCapture, ReplicaBounds, ScenarioSpec,
    };

    fn snapshot(replicas: &[u32]) -> AutoscalerSnapshot {
        let mut snapshot = AutoscalerSnapshot::new();
        for (i, current) in replicas.iter().enumerate() {
            snapshot.insert(
                format!("hpa-{i}"),
                ReplicaBounds {
                    min_replicas: 1,
                    max_replicas: 10,
                    current_replicas: *current,
                },
            );
        }
        snapshot
    }

    fn capture(pre: &[u32], post: &[u32]) -> ClusterCapture {
        let mut capture = ClusterCapture::default();
        capture.autoscaler.pre = snapshot(pre);
        capture.autoscaler.post = snapshot(post);
        capture
    }

    #[test]
    fn test_cost_estimate_formula() {
        let estimate = CostEstimate::new(PodCounts::with_blended(3, 11, 6.0), 27.0);
        assert!((estimate.pod_hours - 2.7).abs() < 1e-9);
    }

    #[test]
    fn test_observed_counts_from_captures() {
        let mut dataset = ScenarioDataset::new(ScenarioSpec::new("1", "S1"));
        dataset
            .cluster
            .insert(TestProfile::Baseline, capture(&[1, 1, 1], &[1, 1, 1]));
        dataset
            .cluster
            .insert(TestProfile::Spike, capture(&[1, 1, 2], &[3, 5, 4]));

        let counts = ObservedPodCount.pod_counts(&dataset).unwrap();
        assert_eq!(counts.baseline, 3);
        assert_eq!(counts.spike, 12);
        assert_eq!(counts.blended, 7.5);
    }

    #[test]
    fn test_observed_counts_with_huge_replica_totals() {
        let mut dataset = ScenarioDataset::new(ScenarioSpec::new("1", "S1"));
        dataset.cluster.insert(
            TestProfile::Spike,
            capture(&[3_000_000_000, 3_000_000_000], &[3_000_000_000, 3_000_000_000]),
        );

        let counts = ObservedPodCount.pod_counts(&dataset).unwrap();
        assert_eq!(counts.baseline, 6_000_000_000);
        assert_eq!(counts.spike, 6_000_000_000);
        assert_eq!(counts.blended, 6_000_000_000.0);
        assert_eq!(PodCounts::new(u64::MAX, u64::MAX).blended, u64::MAX as f64);
    }

    #[test]
    fn test_observed_counts_with_one_side() {
        let mut dataset = ScenarioDataset::new(ScenarioSpec::new("1", "S1"));
        dataset.cluster.insert(TestProfile::Spike, capture(&[], &[2, 2]));
        assert_eq!(
            ObservedPodCount.pod_counts(&dataset),
            Some(PodCounts::new(4, 4))
        );
    }

    #[test]
    fn test_observed_counts_without_autoscaler_data() {
        let dataset = ScenarioDataset::new(ScenarioSpec::new("5", "S5"));
        assert_eq!(ObservedPodCount.pod_counts(&dataset), None);
    }

    #[test]
    fn test_static_table_lookup_and_fallback() {
        let policy = StaticPodCount::illustrative();
        let known = ScenarioDataset::new(ScenarioSpec::new("4", "S4"));
        let unknown = ScenarioDataset::new(ScenarioSpec::new("42", "scenario_42"));

        assert_eq!(policy.pod_counts(&known).unwrap().spike, 18);
        assert_eq!(policy.pod_counts(&unknown).unwrap().blended, 6.0);
        assert_eq!(StaticPodCount::new().pod_counts(&unknown), None);
    }
}
