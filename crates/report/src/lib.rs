// Copyright 2025 Loadscope Contributors
// SPDX-License-Identifier: Apache-2.0

//! Charts and text reports for Loadscope campaigns.
//!
//! # Quick Start
//!
//! ```no_run
//! use chrono::Utc;
//! use loadscope_analysis::Aggregator;
//! use loadscope_core::{CampaignView, Catalog, ViewMode};
//! use loadscope_report::{RenderRequest, ReportRenderer, Style};
//! use std::path::Path;
//!
//! let catalog = Catalog::default();
//! let view = CampaignView::new(ViewMode::SingleCampaign, Vec::new());
//! let analysis = Aggregator::new(&catalog).analyze(&view);
//!
//! let outcome = ReportRenderer::svg(Style::default())
//!     .render(&RenderRequest {
//!         view: &view,
//!         analysis: &analysis,
//!         catalog: &catalog,
//!         output_dir: Path::new("results/plots"),
//!         report_file: "SUMMARY_REPORT.txt",
//!         generated_at: Utc::now(),
//!     })
//!     .unwrap();
//! println!("{} charts", outcome.charts().count());
//! ```
//!
//! # Modules
//!
//! - [`chart`] - Backend-neutral chart model
//! - [`charts`] - One builder per numbered chart
//! - [`svg`] - The [`ChartRenderer`] seam and its SVG backend
//! - [`text`] - Plain-text summary report
//! - [`render`] - Writing all artifacts with per-chart failure isolation

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod chart;
pub mod charts;
pub mod error;
pub mod render;
pub mod style;
pub mod svg;
pub mod text;

pub use chart::{Category, Chart, ChartKind, Panel, PanelKind, Series};
pub use charts::{build_chart, ChartContext};
pub use error::{RenderError, Result};
pub use render::{
    write_campaign_json, Artifact, ArtifactFailure, ArtifactKind, RenderOutcome, RenderRequest,
    ReportRenderer, DATA_FILE,
};
pub use style::Style;
pub use svg::{ChartRenderer, SvgRenderer};
pub use text::render_text_report;
