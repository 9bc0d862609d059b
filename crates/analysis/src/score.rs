// Copyright 2025 Loadscope Contributors
// SPDX-License-Identifier: Apache-2.0

//! Five-axis scenario scorecards.
//!
//! Scores are one to five stars per axis. They summarise measured data with
//! fixed bands ([`ThresholdScoring`]) or come from a hand-written table
//! ([`StaticScoring`]); either way they are estimates and the report says so.

use crate::cost::CostEstimate;
use loadscope_core::{ScenarioDataset, TestProfile};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Axis labels in chart order.
pub const AXES: [&str; 5] = ["Throughput", "Latency p95", "Success rate", "Cost", "Availability"];

/// Star ratings of one scenario. `None` means the axis had no data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scorecard {
    /// Policy that produced the scores.
    pub policy: String,
    /// Average throughput rating.
    pub throughput: Option<u8>,
    /// Comparison-profile p95 latency rating.
    pub latency_p95: Option<u8>,
    /// Comparison-profile success-rate rating.
    pub success_rate: Option<u8>,
    /// Pod-time cost rating.
    pub cost: Option<u8>,
    /// Replica redundancy rating.
    pub availability: Option<u8>,
}

impl Scorecard {
    /// Scores in [`AXES`] order.
    pub fn values(&self) -> [Option<u8>; 5] {
        [
            self.throughput,
            self.latency_p95,
            self.success_rate,
            self.cost,
            self.availability,
        ]
    }
}

/// Everything a scoring policy may look at.
#[derive(Debug, Clone, Copy)]
pub struct ScoreInput<'a> {
    /// Raw collected data.
    pub dataset: &'a ScenarioDataset,
    /// Profile compared across scenarios.
    pub comparison_profile: TestProfile,
    /// Mean throughput over profiles that reported one.
    pub avg_throughput_rps: Option<f64>,
    /// Cost estimate, when pod counts were available.
    pub cost: Option<&'a CostEstimate>,
}

/// Turns a scenario's data into a [`Scorecard`].
pub trait ScoringPolicy {
    /// Name recorded on every scorecard.
    fn name(&self) -> &'static str;

    /// Score one scenario.
    fn score(&self, input: &ScoreInput<'_>) -> Scorecard;
}

/// Four ascending cut-offs splitting a value range into five star bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bands {
    /// Cut-offs in ascending order.
    pub cutoffs: [f64; 4],
    /// Whether larger values earn more stars.
    pub higher_is_better: bool,
}

impl Bands {
    /// Bands where larger values are better.
    pub const fn ascending(cutoffs: [f64; 4]) -> Self {
        Self {
            cutoffs,
            higher_is_better: true,
        }
    }

    /// Bands where smaller values are better.
    pub const fn descending(cutoffs: [f64; 4]) -> Self {
        Self {
            cutoffs,
            higher_is_better: false,
        }
    }

    /// Stars for a value: 1 to 5.
    pub fn stars(&self, value: f64) -> u8 {
        let passed = if self.higher_is_better {
            self.cutoffs.iter().filter(|cut| value >= **cut).count()
        } else {
            self.cutoffs.iter().filter(|cut| value <= **cut).count()
        };
        1 + passed as u8
    }
}

/// Scores derived from measured values with fixed bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdScoring {
    /// Average requests per second.
    pub throughput_rps: Bands,
    /// Comparison-profile p95 latency, milliseconds.
    pub latency_p95_ms: Bands,
    /// Comparison-profile success percentage.
    pub success_percent: Bands,
    /// Blended active pods.
    pub blended_pods: Bands,
    /// Fewest replicas of any autoscaled workload after load.
    pub min_replicas: Bands,
}

impl Default for ThresholdScoring {
    fn default() -> Self {
        Self {
            throughput_rps: Bands::ascending([10.0, 50.0, 100.0, 200.0]),
            latency_p95_ms: Bands::descending([100.0, 250.0, 500.0, 1000.0]),
            success_percent: Bands::ascending([90.0, 95.0, 99.0, 99.9]),
            blended_pods: Bands::descending([4.0, 6.0, 9.0, 12.0]),
            min_replicas: Bands::ascending([1.0, 2.0, 3.0, 4.0]),
        }
    }
}

impl ScoringPolicy for ThresholdScoring {
    fn name(&self) -> &'static str {
        "threshold bands"
    }

    fn score(&self, input: &ScoreInput<'_>) -> Scorecard {
        let record = input.dataset.record(input.comparison_profile);
        let weakest_workload = input
            .dataset
            .capture(input.comparison_profile)
            .and_then(|capture| {
                capture
                    .autoscaler
                    .post
                    .iter()
                    .map(|(_, bounds)| bounds.current_replicas)
                    .min()
            });

        Scorecard {
            policy: self.name().to_string(),
            throughput: input
                .avg_throughput_rps
                .map(|rps| self.throughput_rps.stars(rps)),
            latency_p95: record
                .and_then(|r| r.p95_duration_ms)
                .map(|p95| self.latency_p95_ms.stars(p95)),
            success_rate: record.map(|r| self.success_percent.stars(r.rates().success_percent)),
            cost: input
                .cost
                .map(|cost| self.blended_pods.stars(cost.pods.blended)),
            availability: weakest_workload.map(|replicas| self.min_replicas.stars(replicas as f64)),
        }
    }
}

/// Scores looked up in a fixed table keyed by scenario id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticScoring {
    table: BTreeMap<String, [u8; 5]>,
    fallback: [u8; 5],
}

impl StaticScoring {
    /// Create an empty table where every scenario gets `fallback`.
    pub fn new(fallback: [u8; 5]) -> Self {
        Self {
            table: BTreeMap::new(),
            fallback: fallback.map(|s| s.clamp(1, 5)),
        }
    }

    /// Set the scores for one scenario, in [`AXES`] order.
    pub fn with_entry(mut self, scenario: impl Into<String>, scores: [u8; 5]) -> Self {
        self.table.insert(scenario.into(), scores.map(|s| s.clamp(1, 5)));
        self
    }

    /// Illustrative scores for the five reference scenarios.
    pub fn illustrative() -> Self {
        Self::new([3; 5])
            .with_entry("1", [4, 4, 4, 4, 3])
            .with_entry("2", [5, 5, 5, 3, 3])
            .with_entry("3", [4, 3, 4, 2, 5])
            .with_entry("4", [3, 2, 3, 4, 3])
            .with_entry("5", [4, 4, 4, 1, 2])
    }
}

impl ScoringPolicy for StaticScoring {
    fn name(&self) -> &'static str {
        "illustrative score table"
    }

    fn score(&self, input: &ScoreInput<'_>) -> Scorecard {
        let [throughput, latency_p95, success_rate, cost, availability] = self
            .table
            .get(input.dataset.id())
            .copied()
            .unwrap_or(self.fallback);
        Scorecard {
            policy: self.name().to_string(),
            throughput: Some(throughput),
            latency_p95: Some(latency_p95),
            success_rate: Some(success_rate),
            cost: Some(cost),
            availability: Some(availability),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::PodCounts;
    use loadscope_core::{
        AutoscalerSnapshot, ClusterCapture, MetricRecord, ReplicaBounds, ScenarioSpec,
    };

    fn dataset() -> ScenarioDataset {
        let mut dataset = ScenarioDataset::new(ScenarioSpec::new("2", "S2"));
        dataset.profiles.insert(
            TestProfile::Spike,
            MetricRecord {
                p95_duration_ms: Some(180.0),
                failure_rate_percent: Some(0.5),
                ..Default::default()
            },
        );
        let mut post = AutoscalerSnapshot::new();
        for (id, current) in [("a-hpa", 4), ("b-hpa", 2)] {
            post.insert(
                id,
                ReplicaBounds {
                    min_replicas: 2,
                    max_replicas: 10,
                    current_replicas: current,
                },
            );
        }
        let mut capture = ClusterCapture::default();
        capture.autoscaler.post = post;
        dataset.cluster.insert(TestProfile::Spike, capture);
        dataset
    }

    #[test]
    fn test_band_edges() {
        let up = Bands::ascending([10.0, 50.0, 100.0, 200.0]);
        assert_eq!(up.stars(0.0), 1);
        assert_eq!(up.stars(10.0), 2);
        assert_eq!(up.stars(199.9), 4);
        assert_eq!(up.stars(250.0), 5);

        let down = Bands::descending([100.0, 250.0, 500.0, 1000.0]);
        assert_eq!(down.stars(50.0), 5);
        assert_eq!(down.stars(250.0), 4);
        assert_eq!(down.stars(5000.0), 1);
    }

    #[test]
    fn test_threshold_scoring_uses_measured_data() {
        let dataset = dataset();
        let cost = CostEstimate::new(PodCounts::new(6, 12), 27.0);
        let card = ThresholdScoring::default().score(&ScoreInput {
            dataset: &dataset,
            comparison_profile: TestProfile::Spike,
            avg_throughput_rps: Some(120.0),
            cost: Some(&cost),
        });

        assert_eq!(card.policy, "threshold bands");
        assert_eq!(card.throughput, Some(4));
        assert_eq!(card.latency_p95, Some(4));
        assert_eq!(card.success_rate, Some(4));
        assert_eq!(card.cost, Some(3));
        assert_eq!(card.availability, Some(3));
    }

    #[test]
    fn test_threshold_scoring_marks_missing_axes() {
        let dataset = ScenarioDataset::new(ScenarioSpec::new("9", "S9"));
        let card = ThresholdScoring::default().score(&ScoreInput {
            dataset: &dataset,
            comparison_profile: TestProfile::Spike,
            avg_throughput_rps: None,
            cost: None,
        });
        assert_eq!(card.values(), [None; 5]);
    }

    #[test]
    fn test_static_scoring_table() {
        let policy = StaticScoring::illustrative();
        let dataset = dataset();
        let card = policy.score(&ScoreInput {
            dataset: &dataset,
            comparison_profile: TestProfile::Spike,
            avg_throughput_rps: None,
            cost: None,
        });
        assert_eq!(
            card.values(),
            [Some(5), Some(5), Some(5), Some(3), Some(3)]
        );
        assert_eq!(card.policy, "illustrative score table");
    }

    #[test]
    fn test_static_scores_are_clamped() {
        let policy = StaticScoring::new([0, 9, 3, 3, 3]);
        let dataset = ScenarioDataset::new(ScenarioSpec::new("x", "x"));
        let card = policy.score(&ScoreInput {
            dataset: &dataset,
            comparison_profile: TestProfile::Spike,
            avg_throughput_rps: None,
            cost: None,
        });
        assert_eq!(card.throughput, Some(1));
        assert_eq!(card.latency_p95, Some(5));
    }
}
