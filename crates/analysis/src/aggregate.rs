// Copyright 2025 Loadscope Contributors
// SPDX-License-Identifier: Apache-2.0

//! Cross-scenario aggregation.
//!
//! The [`Aggregator`] reads a [`CampaignView`] and derives everything the
//! renderer needs without touching the view itself. Values that could not be
//! measured stay `None` all the way to the report.

use crate::cost::{CostEstimate, ObservedPodCount, PodCountPolicy};
use crate::score::{ScoreInput, Scorecard, ScoringPolicy, ThresholdScoring};
use loadscope_core::{
    CampaignView, Catalog, ClusterCapture, RateBreakdown, ReplicaBounds, ScenarioDataset,
    ScenarioId, ScenarioSpec, TestProfile, ViewMode,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Assumed wall-clock minutes of a full four-profile run.
pub const DEFAULT_RUN_MINUTES: f64 = 27.0;

/// Replica counts of one autoscaler around a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicaChange {
    /// Autoscaler identifier.
    pub autoscaler: String,
    /// Human-readable workload name.
    pub display_name: String,
    /// Replicas before load.
    pub pre: Option<u32>,
    /// Replicas after load.
    pub post: Option<u32>,
    /// Configured bounds, from the post snapshot when available.
    pub bounds: Option<ReplicaBounds>,
}

/// Mean resource usage of one service after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceUsage {
    /// Logical service name.
    pub service: String,
    /// Human-readable service name.
    pub display_name: String,
    /// Mean CPU, millicores. `None` when no pod was sampled.
    pub avg_cpu_millicores: Option<f64>,
    /// Mean memory, mebibytes. `None` when no pod was sampled.
    pub avg_memory_mebibytes: Option<f64>,
}

/// Cluster-side facts derived from one capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSummary {
    /// One entry per catalog autoscaler.
    pub replicas: Vec<ReplicaChange>,
    /// One entry per catalog service.
    pub resources: Vec<ResourceUsage>,
    /// Total replicas after load across all autoscalers.
    pub post_total_replicas: Option<u64>,
}

impl ClusterSummary {
    /// Whether any autoscaler reported replica counts.
    pub fn has_replica_data(&self) -> bool {
        self.replicas
            .iter()
            .any(|change| change.pre.is_some() || change.post.is_some())
    }

    /// Whether any service had resource samples.
    pub fn has_resource_data(&self) -> bool {
        self.resources
            .iter()
            .any(|usage| usage.avg_cpu_millicores.is_some() || usage.avg_memory_mebibytes.is_some())
    }
}

/// Derived values for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioAnalysis {
    /// Scenario identity.
    pub scenario: ScenarioSpec,
    /// Reconciled success/failure rates per profile with metrics.
    pub rates: BTreeMap<TestProfile, RateBreakdown>,
    /// Mean throughput over profiles with a positive value.
    pub avg_throughput_rps: Option<f64>,
    /// Cluster summaries per captured profile.
    pub cluster: BTreeMap<TestProfile, ClusterSummary>,
    /// Synthetic pod-time cost, when pod counts were available.
    pub cost: Option<CostEstimate>,
    /// Star ratings.
    pub scorecard: Scorecard,
}

impl ScenarioAnalysis {
    /// Scenario identifier.
    pub fn id(&self) -> &str {
        &self.scenario.key
    }
}

/// Derived values for a whole campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignAnalysis {
    /// Layout the view was collected from.
    pub mode: ViewMode,
    /// Profile compared across scenarios.
    pub comparison_profile: TestProfile,
    /// Run duration assumed by every cost estimate.
    pub run_minutes: f64,
    /// Name of the pod-count policy behind the cost estimates.
    pub pod_count_policy: String,
    /// Name of the scoring policy behind the scorecards.
    pub scoring_policy: String,
    /// Per-scenario values keyed by scenario id.
    pub scenarios: BTreeMap<ScenarioId, ScenarioAnalysis>,
}

impl CampaignAnalysis {
    /// Values for one scenario.
    pub fn scenario(&self, id: &str) -> Option<&ScenarioAnalysis> {
        self.scenarios.get(&ScenarioId::from(id))
    }
}

/// Mean of the positive throughput values across all profiles.
///
/// Profiles with a zero or missing throughput are left out of the
/// denominator.
pub fn average_throughput(dataset: &ScenarioDataset) -> Option<f64> {
    let observed: Vec<f64> = dataset
        .profiles
        .values()
        .filter_map(|record| record.requests_per_second)
        .filter(|rps| rps.is_finite() && *rps > 0.0)
        .collect();
    if observed.is_empty() {
        return None;
    }
    Some(observed.iter().sum::<f64>() / observed.len() as f64)
}

/// Computes a [`CampaignAnalysis`] from a [`CampaignView`].
///
/// # Example
///
/// ```
/// use loadscope_analysis::{Aggregator, StaticPodCount};
/// use loadscope_core::{CampaignView, Catalog, ViewMode};
///
/// let catalog = Catalog::default();
/// let aggregator = Aggregator::new(&catalog)
///     .with_run_minutes(30.0)
///     .with_pod_count_policy(StaticPodCount::illustrative());
///
/// let view = CampaignView::new(ViewMode::MultiScenario, Vec::new());
/// let analysis = aggregator.analyze(&view);
/// assert_eq!(analysis.run_minutes, 30.0);
/// ```
pub struct Aggregator<'a> {
    catalog: &'a Catalog,
    run_minutes: f64,
    pod_counts: Box<dyn PodCountPolicy + 'a>,
    scoring: Box<dyn ScoringPolicy + 'a>,
}

impl<'a> Aggregator<'a> {
    /// Aggregator with observed pod counts and threshold scoring.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            run_minutes: DEFAULT_RUN_MINUTES,
            pod_counts: Box::new(ObservedPodCount),
            scoring: Box::new(ThresholdScoring::default()),
        }
    }

    /// Set the assumed run duration.
    pub fn with_run_minutes(mut self, run_minutes: f64) -> Self {
        self.run_minutes = run_minutes;
        self
    }

    /// Replace the pod-count policy.
    pub fn with_pod_count_policy(mut self, policy: impl PodCountPolicy + 'a) -> Self {
        self.pod_counts = Box::new(policy);
        self
    }

    /// Replace the scoring policy.
    pub fn with_scoring_policy(mut self, policy: impl ScoringPolicy + 'a) -> Self {
        self.scoring = Box::new(policy);
        self
    }

    /// Analyse every scenario of a view.
    pub fn analyze(&self, view: &CampaignView) -> CampaignAnalysis {
        let scenarios = view
            .scenarios()
            .map(|dataset| (ScenarioId::new(dataset.id()), self.analyze_scenario(dataset)))
            .collect();

        CampaignAnalysis {
            mode: view.mode(),
            comparison_profile: self.catalog.comparison_profile,
            run_minutes: self.run_minutes,
            pod_count_policy: self.pod_counts.name().to_string(),
            scoring_policy: self.scoring.name().to_string(),
            scenarios,
        }
    }

    /// Analyse one scenario.
    pub fn analyze_scenario(&self, dataset: &ScenarioDataset) -> ScenarioAnalysis {
        let rates = dataset
            .profiles
            .iter()
            .map(|(profile, record)| (*profile, record.rates()))
            .collect();
        let cluster = dataset
            .cluster
            .iter()
            .map(|(profile, capture)| (*profile, self.summarize(capture)))
            .collect();

        let avg_throughput_rps = average_throughput(dataset);
        let cost = self
            .pod_counts
            .pod_counts(dataset)
            .map(|pods| CostEstimate::new(pods, self.run_minutes));
        if cost.is_none() {
            debug!(scenario = %dataset.id(), "no pod counts; cost estimate unavailable");
        }

        let scorecard = self.scoring.score(&ScoreInput {
            dataset,
            comparison_profile: self.catalog.comparison_profile,
            avg_throughput_rps,
            cost: cost.as_ref(),
        });

        ScenarioAnalysis {
            scenario: dataset.scenario.clone(),
            rates,
            avg_throughput_rps,
            cluster,
            cost,
            scorecard,
        }
    }

    fn summarize(&self, capture: &ClusterCapture) -> ClusterSummary {
        let replicas = self
            .catalog
            .autoscalers
            .iter()
            .map(|spec| {
                let pre = capture.autoscaler.pre.get(&spec.id);
                let post = capture.autoscaler.post.get(&spec.id);
                ReplicaChange {
                    autoscaler: spec.id.clone(),
                    display_name: spec.display_name.clone(),
                    pre: pre.map(|b| b.current_replicas),
                    post: post.map(|b| b.current_replicas),
                    bounds: post.or(pre).copied(),
                }
            })
            .collect();

        let resources = self
            .catalog
            .services
            .iter()
            .map(|spec| {
                let samples = capture.pods.post.get(&spec.name);
                ResourceUsage {
                    service: spec.name.clone(),
                    display_name: spec.display_name.clone(),
                    avg_cpu_millicores: samples.and_then(|s| s.avg_cpu_millicores()),
                    avg_memory_mebibytes: samples.and_then(|s| s.avg_memory_mebibytes()),
                }
            })
            .collect();

        ClusterSummary {
            replicas,
            resources,
            post_total_replicas: capture.autoscaler.post.total_replicas(),
        }
    }
}
