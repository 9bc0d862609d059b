// Copyright 2025 Loadscope Contributors
// SPDX-License-Identifier: Apache-2.0

//! Scenario datasets and the campaign view.
//!
//! ```text
//! CampaignView
//!   └─ ScenarioDataset (one per scenario id, sorted)
//!       ├─ profile -> MetricRecord
//!       └─ profile -> ClusterCapture (scope depends on view mode)
//! ```
//!
//! A [`CampaignView`] is built once per run and exposes read-only access;
//! absent scenarios and profiles are missing keys, never placeholders.

use crate::catalog::ScenarioSpec;
use crate::cluster::ClusterCapture;
use crate::profile::TestProfile;
use crate::record::MetricRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Order two scenario keys: numeric keys by value, then the rest by text.
///
/// `scenario_2` sorts before `scenario_10`. Keys with the same numeric
/// value but different spelling (`"2"`, `"02"`) fall back to text order.
pub fn compare_scenario_keys(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Scenario identifier used as a map key, ordered by [`compare_scenario_keys`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioId(String);

impl ScenarioId {
    /// Wrap a scenario key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The raw key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Ord for ScenarioId {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_scenario_keys(&self.0, &other.0)
    }
}

impl PartialOrd for ScenarioId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ScenarioId {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Which of the two result layouts a campaign was collected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// One scenario; cluster captured for every profile.
    SingleCampaign,
    /// Several scenarios; cluster captured for the comparison profile only.
    MultiScenario,
}

impl ViewMode {
    /// Profiles whose cluster snapshots are collected in this mode.
    pub fn captures(&self, profile: TestProfile, comparison_profile: TestProfile) -> bool {
        match self {
            Self::SingleCampaign => true,
            Self::MultiScenario => profile == comparison_profile,
        }
    }
}

/// All data collected for one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioDataset {
    /// Scenario identity.
    pub scenario: ScenarioSpec,
    /// Load-test metrics per profile that produced output.
    pub profiles: BTreeMap<TestProfile, MetricRecord>,
    /// Cluster snapshots per captured profile.
    pub cluster: BTreeMap<TestProfile, ClusterCapture>,
}

impl ScenarioDataset {
    /// Create an empty dataset for a scenario.
    pub fn new(scenario: ScenarioSpec) -> Self {
        Self {
            scenario,
            profiles: BTreeMap::new(),
            cluster: BTreeMap::new(),
        }
    }

    /// Scenario identifier.
    pub fn id(&self) -> &str {
        &self.scenario.key
    }

    /// Metrics for one profile.
    pub fn record(&self, profile: TestProfile) -> Option<&MetricRecord> {
        self.profiles.get(&profile)
    }

    /// Cluster capture for one profile.
    pub fn capture(&self, profile: TestProfile) -> Option<&ClusterCapture> {
        self.cluster.get(&profile)
    }

    /// Whether anything at all was collected.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty() && self.cluster.is_empty()
    }
}

/// Root aggregate consumed by the analysis and report stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignView {
    mode: ViewMode,
    scenarios: BTreeMap<ScenarioId, ScenarioDataset>,
}

impl CampaignView {
    /// Freeze collected datasets into a view, keyed by scenario id.
    pub fn new(mode: ViewMode, datasets: impl IntoIterator<Item = ScenarioDataset>) -> Self {
        let scenarios = datasets
            .into_iter()
            .map(|dataset| (ScenarioId::new(dataset.id()), dataset))
            .collect();
        Self { mode, scenarios }
    }

    /// Layout the view was collected from.
    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Dataset for a scenario id.
    pub fn scenario(&self, id: &str) -> Option<&ScenarioDataset> {
        self.scenarios.get(&ScenarioId::from(id))
    }

    /// Datasets sorted by scenario id, numeric ids by value.
    pub fn scenarios(&self) -> impl Iterator<Item = &ScenarioDataset> {
        self.scenarios.values()
    }

    /// Number of scenarios.
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Whether no scenario was collected.
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Profiles present in at least one scenario, in execution order.
    pub fn profiles(&self) -> Vec<TestProfile> {
        TestProfile::ALL
            .into_iter()
            .filter(|p| self.scenarios().any(|s| s.profiles.contains_key(p)))
            .collect()
    }

    /// Every `(scenario, profile, capture)` triple, sorted.
    pub fn captures(&self) -> impl Iterator<Item = (&ScenarioDataset, TestProfile, &ClusterCapture)> {
        self.scenarios()
            .flat_map(|s| s.cluster.iter().map(move |(p, c)| (s, *p, c)))
    }
}
