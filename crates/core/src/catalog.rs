// Copyright 2025 Loadscope Contributors
// SPDX-License-Identifier: Apache-2.0

//! Identifier catalog.
//!
//! Every fixed name the pipeline recognises (autoscaler workloads, pod-name
//! fragments, scenario directories) lives in one [`Catalog`] value that is
//! passed to the collector and renderer. Adding a scenario or a service is a
//! catalog entry, not a code change.

use crate::profile::TestProfile;
use serde::{Deserialize, Serialize};

/// Directory prefix of a scenario result directory (`scenario_<key>`).
pub const SCENARIO_DIR_PREFIX: &str = "scenario_";

/// An autoscaler the extractor looks for in status dumps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoscalerSpec {
    /// Name token as it appears in the status table.
    pub id: String,
    /// Human readable workload name.
    pub display_name: String,
}

/// A logical service and the pod-name fragment that identifies its pods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceSpec {
    /// Logical service name used as snapshot key.
    pub name: String,
    /// Human readable service name.
    pub display_name: String,
    /// Substring of the owning deployment's pod names.
    pub pod_fragment: String,
}

/// A known scenario of the comparison campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSpec {
    /// Scenario identifier.
    pub key: String,
    /// Human readable scenario name.
    pub display_name: String,
}

impl ScenarioSpec {
    /// Create a scenario entry.
    pub fn new(key: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            display_name: display_name.into(),
        }
    }

    /// Result directory name for this scenario.
    pub fn dir_name(&self) -> String {
        format!("{}{}", SCENARIO_DIR_PREFIX, self.key)
    }
}

/// Enumerated identifier configuration for one campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Autoscalers to extract from status dumps, in chart order.
    pub autoscalers: Vec<AutoscalerSpec>,
    /// Services in match-priority order; the first fragment found in a pod
    /// name wins.
    pub services: Vec<ServiceSpec>,
    /// Known scenarios of the multi-scenario comparison.
    pub scenarios: Vec<ScenarioSpec>,
    /// Profile whose cluster capture is compared across scenarios.
    pub comparison_profile: TestProfile,
    /// Lines at the end of a load-test log that hold the summary.
    pub tail_lines: usize,
    /// Tokens scanned after an autoscaler name for its replica columns.
    pub autoscaler_scan_window: usize,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            autoscalers: vec![
                AutoscalerSpec {
                    id: "p-hpa".to_string(),
                    display_name: "Gateway P".to_string(),
                },
                AutoscalerSpec {
                    id: "a-hpa".to_string(),
                    display_name: "Service A".to_string(),
                },
                AutoscalerSpec {
                    id: "b-hpa".to_string(),
                    display_name: "Service B".to_string(),
                },
            ],
            services: vec![
                ServiceSpec {
                    name: "gateway-p".to_string(),
                    display_name: "Gateway P".to_string(),
                    pod_fragment: "p-deploy".to_string(),
                },
                ServiceSpec {
                    name: "service-a".to_string(),
                    display_name: "Service A".to_string(),
                    pod_fragment: "a-deploy".to_string(),
                },
                ServiceSpec {
                    name: "service-b".to_string(),
                    display_name: "Service B".to_string(),
                    pod_fragment: "b-deploy".to_string(),
                },
            ],
            scenarios: vec![
                ScenarioSpec::new("1", "S1: Base (HPA)"),
                ScenarioSpec::new("2", "S2: 2 Replicas"),
                ScenarioSpec::new("3", "S3: Distributed"),
                ScenarioSpec::new("4", "S4: Resources -50%"),
                ScenarioSpec::new("5", "S5: No HPA"),
            ],
            comparison_profile: TestProfile::Spike,
            tail_lines: 100,
            autoscaler_scan_window: 20,
        }
    }
}

impl Catalog {
    /// Resolve the logical service owning a pod.
    pub fn service_for_pod(&self, pod_name: &str) -> Option<&ServiceSpec> {
        self.services
            .iter()
            .find(|service| pod_name.contains(&service.pod_fragment))
    }

    /// Look up a known scenario by key.
    pub fn scenario(&self, key: &str) -> Option<&ScenarioSpec> {
        self.scenarios.iter().find(|s| s.key == key)
    }

    /// Scenario entry for a `scenario_<key>` directory name.
    ///
    /// Unknown keys get an ad-hoc entry named after the directory.
    pub fn scenario_for_dir(&self, dir_name: &str) -> Option<ScenarioSpec> {
        let key = dir_name.strip_prefix(SCENARIO_DIR_PREFIX)?;
        if key.is_empty() {
            return None;
        }
        Some(
            self.scenario(key)
                .cloned()
                .unwrap_or_else(|| ScenarioSpec::new(key, dir_name)),
        )
    }

    /// Display name of an autoscaler, falling back to its id.
    pub fn autoscaler_display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.autoscalers
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.display_name.as_str())
            .unwrap_or(id)
    }

    /// Display name of a service, falling back to its logical name.
    pub fn service_display_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.services
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.display_name.as_str())
            .unwrap_or(name)
    }
}
