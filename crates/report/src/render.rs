// Copyright 2025 Loadscope Contributors
// SPDX-License-Identifier: Apache-2.0

//! Writing every artifact of a campaign to disk.
//!
//! Charts are produced independently: one chart failing is recorded in the
//! [`RenderOutcome`] and the remaining charts, the text report and the data
//! dump are still written. Failing to create the output directory or to
//! write the text report aborts the run.

use crate::chart::ChartKind;
use crate::charts::{build_chart, ChartContext};
use crate::error::{RenderError, Result};
use crate::style::Style;
use crate::svg::{ChartRenderer, SvgRenderer};
use crate::text::render_text_report;
use chrono::{DateTime, Utc};
use loadscope_analysis::CampaignAnalysis;
use loadscope_core::{CampaignView, Catalog};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// JSON dump of the collected view and derived analysis.
pub const DATA_FILE: &str = "campaign.json";

/// What an output file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// A rendered chart.
    Chart,
    /// The text report.
    Report,
    /// The JSON data dump.
    Data,
}

/// One file written by a render run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    /// Content type.
    pub kind: ArtifactKind,
    /// Written path.
    pub path: PathBuf,
}

/// An output that could not be produced.
#[derive(Debug)]
pub struct ArtifactFailure {
    /// File that was not written.
    pub name: String,
    /// Why.
    pub error: RenderError,
}

/// Result of a render run.
#[derive(Debug)]
pub struct RenderOutcome {
    /// Directory everything was written to.
    pub output_dir: PathBuf,
    /// Files written, in production order.
    pub produced: Vec<Artifact>,
    /// Outputs skipped after an error.
    pub failures: Vec<ArtifactFailure>,
}

impl RenderOutcome {
    /// Written charts.
    pub fn charts(&self) -> impl Iterator<Item = &Artifact> {
        self.produced.iter().filter(|a| a.kind == ArtifactKind::Chart)
    }

    /// Whether every output was produced.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Inputs of one render run.
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    /// Collected data.
    pub view: &'a CampaignView,
    /// Derived values.
    pub analysis: &'a CampaignAnalysis,
    /// Identifier configuration.
    pub catalog: &'a Catalog,
    /// Target directory, created when missing.
    pub output_dir: &'a Path,
    /// Text report file name.
    pub report_file: &'a str,
    /// Timestamp printed in the report.
    pub generated_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct CampaignDump<'a> {
    generated_at: DateTime<Utc>,
    view: &'a CampaignView,
    analysis: &'a CampaignAnalysis,
}

/// Produces charts, the text report and the data dump.
#[derive(Debug, Clone)]
pub struct ReportRenderer<R> {
    renderer: R,
    style: Style,
}

impl ReportRenderer<SvgRenderer> {
    /// Renderer writing SVG charts.
    pub fn svg(style: Style) -> Self {
        Self::new(SvgRenderer::new(style.clone()), style)
    }
}

impl<R: ChartRenderer> ReportRenderer<R> {
    /// Create a renderer around a chart backend.
    pub fn new(renderer: R, style: Style) -> Self {
        Self { renderer, style }
    }

    /// Write every artifact for a campaign.
    pub fn render(&self, request: &RenderRequest<'_>) -> Result<RenderOutcome> {
        fs::create_dir_all(request.output_dir).map_err(|source| RenderError::Io {
            path: request.output_dir.to_path_buf(),
            source,
        })?;

        let ctx = ChartContext {
            view: request.view,
            analysis: request.analysis,
            catalog: request.catalog,
            style: &self.style,
        };
        let mut outcome = RenderOutcome {
            output_dir: request.output_dir.to_path_buf(),
            produced: Vec::new(),
            failures: Vec::new(),
        };

        for kind in ChartKind::ALL {
            let name = format!("{}.{}", kind.file_stem(), self.renderer.extension());
            let path = request.output_dir.join(&name);
            match self.chart(kind, &ctx, &path) {
                Ok(()) => {
                    debug!(chart = %name, "chart written");
                    outcome.produced.push(Artifact {
                        kind: ArtifactKind::Chart,
                        path,
                    });
                }
                Err(error) => {
                    warn!(chart = %name, error = %error, "skipping chart");
                    outcome.failures.push(ArtifactFailure { name, error });
                }
            }
        }

        let report_path = request.output_dir.join(request.report_file);
        let report = render_text_report(&ctx, request.generated_at)?;
        write_file(&report_path, &report)?;
        outcome.produced.push(Artifact {
            kind: ArtifactKind::Report,
            path: report_path,
        });

        let data_path = request.output_dir.join(DATA_FILE);
        match write_campaign_json(request, &data_path) {
            Ok(()) => outcome.produced.push(Artifact {
                kind: ArtifactKind::Data,
                path: data_path,
            }),
            Err(error) => {
                warn!(error = %error, "skipping data dump");
                outcome.failures.push(ArtifactFailure {
                    name: DATA_FILE.to_string(),
                    error,
                });
            }
        }

        info!(
            output_dir = %outcome.output_dir.display(),
            produced = outcome.produced.len(),
            failed = outcome.failures.len(),
            "render complete"
        );
        Ok(outcome)
    }

    fn chart(&self, kind: ChartKind, ctx: &ChartContext<'_>, path: &Path) -> Result<()> {
        let chart = build_chart(kind, ctx);
        if chart.is_placeholder() {
            debug!(chart = kind.file_stem(), "no data; drawing placeholder");
        }
        let content = self.renderer.render(&chart)?;
        write_file(path, &content)
    }
}

/// Serialise the view and analysis to pretty JSON.
pub fn write_campaign_json(request: &RenderRequest<'_>, path: &Path) -> Result<()> {
    let dump = CampaignDump {
        generated_at: request.generated_at,
        view: request.view,
        analysis: request.analysis,
    };
    let json = serde_json::to_string_pretty(&dump)?;
    write_file(path, &json)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })
}
