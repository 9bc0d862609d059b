// Copyright 2025 Loadscope Contributors
// SPDX-License-Identifier: Apache-2.0

//! Scenario data collection.
//!
//! Walks a discovered [`CampaignLayout`] and runs the extractors over every
//! artifact that exists. Each file is read exactly once; absent scenario and
//! profile directories are skipped without comment.

use crate::error::Result;
use crate::extract::{extract_file, ArtifactKind};
use crate::layout::{
    CampaignLayout, ScenarioLocation, AUTOSCALER_POST, AUTOSCALER_PRE, LOAD_TEST_OUTPUT,
    PODS_POST, PODS_PRE,
};
use loadscope_core::{
    AutoscalerSnapshot, Catalog, CampaignView, ClusterCapture, PodResourceSnapshot, PrePost,
    ScenarioDataset, TestProfile, ViewMode,
};
use std::path::Path;
use tracing::{debug, info};

/// Builds a [`CampaignView`] from a result tree.
///
/// # Example
///
/// ```no_run
/// use loadscope_collector::{CampaignLayout, Collector};
/// use loadscope_core::Catalog;
/// use std::path::Path;
///
/// let catalog = Catalog::default();
/// if let Some(layout) = CampaignLayout::discover(Path::new("results"), &catalog)? {
///     let view = Collector::new(&catalog).collect(&layout)?;
///     println!("{} scenario(s)", view.len());
/// }
/// # Ok::<(), loadscope_collector::CollectError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Collector<'a> {
    catalog: &'a Catalog,
}

impl<'a> Collector<'a> {
    /// Create a collector over the given identifier catalog.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Collect every scenario of a layout.
    ///
    /// Scenarios whose directory does not exist, or which yield nothing, are
    /// absent from the view.
    pub fn collect(&self, layout: &CampaignLayout) -> Result<CampaignView> {
        let mut datasets = Vec::with_capacity(layout.scenarios.len());
        for location in &layout.scenarios {
            if !location.dir.is_dir() {
                debug!(scenario = %location.scenario.key, "scenario directory missing");
                continue;
            }
            let dataset = self.collect_scenario(location, layout.mode)?;
            if dataset.is_empty() {
                debug!(scenario = %location.scenario.key, "scenario produced no data");
                continue;
            }
            info!(
                scenario = %dataset.id(),
                profiles = dataset.profiles.len(),
                captures = dataset.cluster.len(),
                "collected scenario"
            );
            datasets.push(dataset);
        }
        Ok(CampaignView::new(layout.mode, datasets))
    }

    /// Collect one scenario directory.
    pub fn collect_scenario(
        &self,
        location: &ScenarioLocation,
        mode: ViewMode,
    ) -> Result<ScenarioDataset> {
        let mut dataset = ScenarioDataset::new(location.scenario.clone());

        for profile in TestProfile::ALL {
            let dir = location.dir.join(profile.as_str());
            if !dir.is_dir() {
                continue;
            }

            let output = dir.join(LOAD_TEST_OUTPUT);
            let extracted = extract_file(ArtifactKind::LoadTestOutput, &output, self.catalog)?;
            match extracted.into_load_test() {
                Some(record) => {
                    dataset.profiles.insert(profile, record);
                }
                None => debug!(%profile, "no load-test summary"),
            }

            if mode.captures(profile, self.catalog.comparison_profile) {
                let capture = self.collect_cluster(&dir)?;
                if !capture.is_empty() {
                    dataset.cluster.insert(profile, capture);
                }
            }
        }
        Ok(dataset)
    }

    fn collect_cluster(&self, dir: &Path) -> Result<ClusterCapture> {
        Ok(ClusterCapture {
            autoscaler: PrePost {
                pre: self.autoscaler(&dir.join(AUTOSCALER_PRE))?,
                post: self.autoscaler(&dir.join(AUTOSCALER_POST))?,
            },
            pods: PrePost {
                pre: self.pods(&dir.join(PODS_PRE))?,
                post: self.pods(&dir.join(PODS_POST))?,
            },
        })
    }

    fn autoscaler(&self, path: &Path) -> Result<AutoscalerSnapshot> {
        Ok(extract_file(ArtifactKind::AutoscalerStatus, path, self.catalog)?.into_autoscaler())
    }

    fn pods(&self, path: &Path) -> Result<PodResourceSnapshot> {
        Ok(extract_file(ArtifactKind::PodResources, path, self.catalog)?.into_pod_resources())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadscope_core::ScenarioSpec;
    use std::fs;

    const HPA: &str = "NAME REFERENCE TARGETS MINPODS MAXPODS REPLICAS AGE\na-hpa Deployment/a-deploy 10%/50% 1 5 2 1m\n";

    fn location(dir: &Path) -> ScenarioLocation {
        ScenarioLocation {
            scenario: ScenarioSpec::new("1", "S1"),
            dir: dir.to_path_buf(),
        }
    }

    #[test]
    fn test_multi_mode_captures_comparison_profile_only() {
        let dir = tempfile::tempdir().unwrap();
        for profile in ["baseline", "spike"] {
            let profile_dir = dir.path().join(profile);
            fs::create_dir_all(&profile_dir).unwrap();
            fs::write(profile_dir.join(AUTOSCALER_POST), HPA).unwrap();
        }

        let catalog = Catalog::default();
        let dataset = Collector::new(&catalog)
            .collect_scenario(&location(dir.path()), ViewMode::MultiScenario)
            .unwrap();
        assert!(dataset.capture(TestProfile::Spike).is_some());
        assert!(dataset.capture(TestProfile::Baseline).is_none());

        let dataset = Collector::new(&catalog)
            .collect_scenario(&location(dir.path()), ViewMode::SingleCampaign)
            .unwrap();
        assert!(dataset.capture(TestProfile::Baseline).is_some());
    }

    #[test]
    fn test_output_without_summary_leaves_no_record() {
        let dir = tempfile::tempdir().unwrap();
        let soak = dir.path().join("soak");
        fs::create_dir_all(&soak).unwrap();
        fs::write(soak.join(LOAD_TEST_OUTPUT), "running (0m10.0s), 10/10 VUs\n").unwrap();

        let catalog = Catalog::default();
        let dataset = Collector::new(&catalog)
            .collect_scenario(&location(dir.path()), ViewMode::MultiScenario)
            .unwrap();
        assert!(dataset.record(TestProfile::Soak).is_none());
    }

    #[test]
    fn test_unreachable_cluster_leaves_no_capture() {
        let dir = tempfile::tempdir().unwrap();
        let spike = dir.path().join("spike");
        fs::create_dir_all(&spike).unwrap();
        fs::write(spike.join(AUTOSCALER_PRE), "The connection to the server was refused").unwrap();
        fs::write(spike.join(PODS_POST), "").unwrap();

        let catalog = Catalog::default();
        let dataset = Collector::new(&catalog)
            .collect_scenario(&location(dir.path()), ViewMode::MultiScenario)
            .unwrap();
        assert!(dataset.is_empty());
    }
}
