// Copyright 2025 Loadscope Contributors
// SPDX-License-Identifier: Apache-2.0

//! CLI for Loadscope.
//!
//! Thin pipeline driver: discover the results layout, collect, aggregate,
//! render, and print what was produced.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use colored::Colorize;
use loadscope_analysis::Aggregator;
use loadscope_collector::{CampaignLayout, Collector, DEFAULT_RESULTS_ROOT};
use loadscope_core::{Catalog, Settings, ViewMode};
use loadscope_report::{ArtifactKind, RenderOutcome, RenderRequest, ReportRenderer, Style};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Exit code when the run completed.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for unrecoverable errors.
pub const EXIT_FAILURE: i32 = 1;
/// Exit code when no scenario data was found.
pub const EXIT_NO_DATA: i32 = 2;

const BANNER_WIDTH: usize = 70;

/// Loadscope CLI.
#[derive(Parser, Debug)]
#[command(name = "loadscope")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Results root: a campaign directory holding profile directories, or a
    /// directory holding `scenario_<n>` directories (default: `results`).
    #[arg(value_name = "RESULTS_ROOT")]
    pub root: Option<PathBuf>,
}

impl Cli {
    /// Results root, falling back to the legacy default.
    pub fn results_root(&self) -> PathBuf {
        self.root
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_RESULTS_ROOT))
    }
}

/// Failures the driver reports with a dedicated exit code.
#[derive(Debug, Error)]
pub enum DriverError {
    /// Nothing to analyse under the results root.
    #[error(
        "No scenario data found under {}. Run the load tests first, or pass the results root as the first argument (profile directories such as baseline/ and spike/, or scenario_<n>/ directories).",
        .root.display()
    )]
    NoScenarioData {
        /// Root that was searched.
        root: PathBuf,
    },
}

/// Map a driver error to a process exit code.
pub fn exit_code(error: &anyhow::Error) -> i32 {
    match error.downcast_ref::<DriverError>() {
        Some(DriverError::NoScenarioData { .. }) => EXIT_NO_DATA,
        None => EXIT_FAILURE,
    }
}

/// Install the stderr log subscriber; `RUST_LOG` overrides the settings.
pub fn init_logging(settings: &Settings) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.log));
    // A subscriber may already be installed when embedded; keep it.
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Parse arguments and run the pipeline.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::from_env().context("Failed to load LOADSCOPE_* settings")?;
    init_logging(&settings);

    let outcome = execute(&cli.results_root(), &settings)?;
    print_outcome(&outcome);
    Ok(())
}

/// Run discovery, collection, aggregation and rendering for one root.
pub fn execute(root: &Path, settings: &Settings) -> Result<RenderOutcome> {
    let catalog = Catalog::default();
    let no_data = || DriverError::NoScenarioData {
        root: root.to_path_buf(),
    };

    println!("{}", "═".repeat(BANNER_WIDTH).bold());
    println!("{}", "LOADSCOPE RESULT ANALYSIS".bold());
    println!("{}", "═".repeat(BANNER_WIDTH).bold());

    stage(1, "Discovering results", &root.display().to_string());
    let layout = CampaignLayout::discover(root, &catalog)
        .with_context(|| format!("Failed to scan {}", root.display()))?
        .ok_or_else(no_data)?;
    let mode = match layout.mode {
        ViewMode::SingleCampaign => "single campaign",
        ViewMode::MultiScenario => "multi-scenario comparison",
    };
    println!(
        "  {} {mode}, {} scenario director{}",
        "✓".green(),
        layout.scenarios.len(),
        if layout.scenarios.len() == 1 { "y" } else { "ies" }
    );

    stage(2, "Collecting artifacts", &layout.root.display().to_string());
    let view = Collector::new(&catalog)
        .collect(&layout)
        .context("Failed to collect results")?;
    if view.is_empty() {
        return Err(no_data().into());
    }
    for dataset in view.scenarios() {
        let profiles: Vec<String> = dataset.profiles.keys().map(|p| p.label()).collect();
        println!(
            "  {} {}: {}",
            "✓".green(),
            dataset.scenario.display_name,
            if profiles.is_empty() {
                "no load-test output".yellow().to_string()
            } else {
                profiles.join(", ")
            }
        );
    }

    stage(3, "Aggregating", &format!("{:.0} min run assumed", settings.run_minutes));
    let analysis = Aggregator::new(&catalog)
        .with_run_minutes(settings.run_minutes)
        .analyze(&view);
    info!(
        scenarios = analysis.scenarios.len(),
        pod_counts = %analysis.pod_count_policy,
        scoring = %analysis.scoring_policy,
        "analysis complete"
    );

    let output_dir = layout.output_dir();
    stage(4, "Rendering", &output_dir.display().to_string());
    let outcome = ReportRenderer::svg(Style::default())
        .render(&RenderRequest {
            view: &view,
            analysis: &analysis,
            catalog: &catalog,
            output_dir: &output_dir,
            report_file: layout.report_file_name(),
            generated_at: Utc::now(),
        })
        .context("Failed to write report")?;
    Ok(outcome)
}

fn stage(step: usize, title: &str, detail: &str) {
    println!();
    println!("{} {} {}", format!("[{step}/4]").cyan().bold(), title.bold(), detail.dimmed());
}

fn print_outcome(outcome: &RenderOutcome) {
    for artifact in &outcome.produced {
        let name = artifact
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let kind = match artifact.kind {
            ArtifactKind::Chart => "chart",
            ArtifactKind::Report => "report",
            ArtifactKind::Data => "data",
        };
        println!("  {} saved {kind}: {name}", "✓".green());
    }
    for failure in &outcome.failures {
        println!("  {} {}: {}", "✗".red(), failure.name, failure.error);
    }

    println!();
    println!("{}", "═".repeat(BANNER_WIDTH).bold());
    if outcome.is_complete() {
        println!("{}", "✓ ANALYSIS COMPLETE".green().bold());
    } else {
        println!(
            "{}",
            format!("✓ ANALYSIS COMPLETE ({} outputs skipped)", outcome.failures.len())
                .yellow()
                .bold()
        );
    }
    println!("{}", "═".repeat(BANNER_WIDTH).bold());
    println!("  Output: {}", outcome.output_dir.display());
}
