// Copyright 2025 Loadscope Contributors
// SPDX-License-Identifier: Apache-2.0

//! Result-tree layout and scenario discovery.
//!
//! Two layouts are recognised:
//!
//! ```text
//! single campaign            multi-scenario
//! <root>/                    <root>/[test_results/]
//!   baseline/output.txt        scenario_1/
//!   spike/hpa-status-pre.txt     baseline/output.txt
//!   plots/        (output)       spike/hpa-status-post.txt
//!                              scenario_2/...
//!                              scenario-comparison/   (output)
//! ```

use crate::error::{CollectError, Result};
use loadscope_core::{compare_scenario_keys, Catalog, ScenarioSpec, TestProfile, ViewMode};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Load-generator console output.
pub const LOAD_TEST_OUTPUT: &str = "output.txt";
/// Autoscaler status captured before load.
pub const AUTOSCALER_PRE: &str = "hpa-status-pre.txt";
/// Autoscaler status captured after load.
pub const AUTOSCALER_POST: &str = "hpa-status-post.txt";
/// Pod resources captured before load.
pub const PODS_PRE: &str = "pod-metrics-pre.txt";
/// Pod resources captured after load.
pub const PODS_POST: &str = "pod-metrics-post.txt";

/// Root used when no path is given on the command line.
pub const DEFAULT_RESULTS_ROOT: &str = "results";
/// Subdirectory that may hold the scenario directories of a campaign.
pub const TEST_RESULTS_DIR: &str = "test_results";
/// Output directory of the single-campaign view.
pub const SINGLE_OUTPUT_DIR: &str = "plots";
/// Output directory of the multi-scenario view.
pub const COMPARISON_OUTPUT_DIR: &str = "scenario-comparison";
/// Report file of the single-campaign view.
pub const SINGLE_REPORT_FILE: &str = "SUMMARY_REPORT.txt";
/// Report file of the multi-scenario view.
pub const COMPARISON_REPORT_FILE: &str = "SCENARIO_COMPARISON_REPORT.txt";

/// Where one scenario's results live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioLocation {
    /// Scenario identity.
    pub scenario: ScenarioSpec,
    /// Directory holding the profile subdirectories.
    pub dir: PathBuf,
}

/// A discovered campaign: its mode and the scenarios to collect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignLayout {
    /// View mode implied by the directory structure.
    pub mode: ViewMode,
    /// Directory the scenarios were found in.
    pub root: PathBuf,
    /// Scenarios sorted by key, numeric keys by value.
    pub scenarios: Vec<ScenarioLocation>,
}

impl CampaignLayout {
    /// Inspect `root` and work out which layout it holds.
    ///
    /// Returns `None` when the root does not exist or holds no scenario data.
    pub fn discover(root: &Path, catalog: &Catalog) -> Result<Option<Self>> {
        if !root.is_dir() {
            return Ok(None);
        }
        if has_profile_dirs(root) {
            return Ok(Some(Self::single(root)));
        }

        let nested = root.join(TEST_RESULTS_DIR);
        for candidate in [root, nested.as_path()] {
            if !candidate.is_dir() {
                continue;
            }
            let scenarios = scan_scenarios(candidate, catalog)?;
            if !scenarios.is_empty() {
                return Ok(Some(Self {
                    mode: ViewMode::MultiScenario,
                    root: candidate.to_path_buf(),
                    scenarios,
                }));
            }
        }
        Ok(None)
    }

    /// Single-campaign layout rooted at `root`.
    pub fn single(root: &Path) -> Self {
        let key = root
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "campaign".to_string());
        Self {
            mode: ViewMode::SingleCampaign,
            root: root.to_path_buf(),
            scenarios: vec![ScenarioLocation {
                scenario: ScenarioSpec::new(key.clone(), key),
                dir: root.to_path_buf(),
            }],
        }
    }

    /// Multi-scenario layout over an explicit set of scenarios.
    ///
    /// Scenarios whose directory is missing are kept; the collector skips
    /// them.
    pub fn multi(root: &Path, scenarios: &[ScenarioSpec]) -> Self {
        let mut scenarios: Vec<ScenarioLocation> = scenarios
            .iter()
            .map(|spec| ScenarioLocation {
                dir: root.join(spec.dir_name()),
                scenario: spec.clone(),
            })
            .collect();
        scenarios.sort_by(|a, b| compare_scenario_keys(&a.scenario.key, &b.scenario.key));
        Self {
            mode: ViewMode::MultiScenario,
            root: root.to_path_buf(),
            scenarios,
        }
    }

    /// Directory charts and the report are written to.
    pub fn output_dir(&self) -> PathBuf {
        match self.mode {
            ViewMode::SingleCampaign => self.root.join(SINGLE_OUTPUT_DIR),
            ViewMode::MultiScenario => self.root.join(COMPARISON_OUTPUT_DIR),
        }
    }

    /// File name of the textual report.
    pub fn report_file_name(&self) -> &'static str {
        match self.mode {
            ViewMode::SingleCampaign => SINGLE_REPORT_FILE,
            ViewMode::MultiScenario => COMPARISON_REPORT_FILE,
        }
    }
}

fn has_profile_dirs(dir: &Path) -> bool {
    TestProfile::ALL
        .iter()
        .any(|profile| dir.join(profile.as_str()).is_dir())
}

fn scan_scenarios(dir: &Path, catalog: &Catalog) -> Result<Vec<ScenarioLocation>> {
    let entries = fs::read_dir(dir).map_err(|source| CollectError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut scenarios = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| CollectError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let Some(scenario) = catalog.scenario_for_dir(&name) else {
            continue;
        };
        if !has_profile_dirs(&path) {
            debug!(scenario = %scenario.key, "scenario directory has no profile results");
            continue;
        }
        scenarios.push(ScenarioLocation { scenario, dir: path });
    }
    scenarios.sort_by(|a, b| compare_scenario_keys(&a.scenario.key, &b.scenario.key));
    Ok(scenarios)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_root_is_not_a_campaign() {
        let dir = tempfile::tempdir().unwrap();
        let layout = CampaignLayout::discover(&dir.path().join("nope"), &Catalog::default());
        assert_eq!(layout.unwrap(), None);
    }

    #[test]
    fn test_empty_root_is_not_a_campaign() {
        let dir = tempfile::tempdir().unwrap();
        let layout = CampaignLayout::discover(dir.path(), &Catalog::default()).unwrap();
        assert_eq!(layout, None);
    }

    #[test]
    fn test_single_campaign_detection() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("results");
        fs::create_dir_all(root.join("ramp")).unwrap();

        let layout = CampaignLayout::discover(&root, &Catalog::default())
            .unwrap()
            .unwrap();
        assert_eq!(layout.mode, ViewMode::SingleCampaign);
        assert_eq!(layout.scenarios.len(), 1);
        assert_eq!(layout.scenarios[0].scenario.key, "results");
        assert_eq!(layout.output_dir(), root.join("plots"));
        assert_eq!(layout.report_file_name(), "SUMMARY_REPORT.txt");
    }

    #[test]
    fn test_multi_scenario_detection_under_test_results() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("test_results");
        fs::create_dir_all(nested.join("scenario_3/spike")).unwrap();
        fs::create_dir_all(nested.join("scenario_1/baseline")).unwrap();
        fs::create_dir_all(nested.join("scenario_2")).unwrap();
        fs::create_dir_all(nested.join("scenario-comparison")).unwrap();

        let layout = CampaignLayout::discover(dir.path(), &Catalog::default())
            .unwrap()
            .unwrap();
        assert_eq!(layout.mode, ViewMode::MultiScenario);
        assert_eq!(layout.root, nested);
        let keys: Vec<_> = layout.scenarios.iter().map(|s| s.scenario.key.as_str()).collect();
        assert_eq!(keys, vec!["1", "3"]);
        assert_eq!(layout.output_dir(), nested.join("scenario-comparison"));
        assert_eq!(layout.report_file_name(), "SCENARIO_COMPARISON_REPORT.txt");
    }

    #[test]
    fn test_scenarios_sort_numerically() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["scenario_10", "scenario_2", "scenario_1"] {
            fs::create_dir_all(dir.path().join(name).join("spike")).unwrap();
        }

        let layout = CampaignLayout::discover(dir.path(), &Catalog::default())
            .unwrap()
            .unwrap();
        let keys: Vec<_> = layout.scenarios.iter().map(|s| s.scenario.key.as_str()).collect();
        assert_eq!(keys, vec!["1", "2", "10"]);
    }

    #[test]
    fn test_explicit_multi_layout_keeps_requested_scenarios() {
        let catalog = Catalog::default();
        let layout = CampaignLayout::multi(Path::new("/tmp/x"), &catalog.scenarios[..2]);
        assert_eq!(layout.scenarios.len(), 2);
        assert_eq!(layout.scenarios[1].dir, Path::new("/tmp/x/scenario_2"));
    }
}
