// Copyright 2025 Loadscope Contributors
// SPDX-License-Identifier: Apache-2.0

//! Backend-neutral chart model.
//!
//! Builders in [`crate::charts`] produce a [`Chart`]; a
//! [`ChartRenderer`](crate::svg::ChartRenderer) turns it into file content.
//! Every value is optional: `None` is drawn as an `n/a` marker, never as a
//! zero-height bar.

use serde::Serialize;

/// The fixed, numbered chart set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Mean, p90 and p95 latency per profile.
    LatencyComparison,
    /// Per-profile and aggregate throughput.
    ThroughputComparison,
    /// Stacked success and failure shares.
    SuccessRate,
    /// Autoscaler replicas before and after load.
    AutoscalerScaling,
    /// CPU and memory per service.
    ResourceUsage,
    /// Latency ladder on a logarithmic axis.
    LatencyPercentiles,
    /// Synthetic pod-time cost.
    CostEstimate,
    /// Five-axis star ratings.
    ScenarioScorecard,
}

impl ChartKind {
    /// Every chart, in file-number order.
    pub const ALL: [ChartKind; 8] = [
        ChartKind::LatencyComparison,
        ChartKind::ThroughputComparison,
        ChartKind::SuccessRate,
        ChartKind::AutoscalerScaling,
        ChartKind::ResourceUsage,
        ChartKind::LatencyPercentiles,
        ChartKind::CostEstimate,
        ChartKind::ScenarioScorecard,
    ];

    /// Output file name without extension.
    pub fn file_stem(&self) -> &'static str {
        match self {
            Self::LatencyComparison => "01_latency_comparison",
            Self::ThroughputComparison => "02_throughput_comparison",
            Self::SuccessRate => "03_success_rate",
            Self::AutoscalerScaling => "04_autoscaler_scaling",
            Self::ResourceUsage => "05_resource_usage",
            Self::LatencyPercentiles => "06_latency_percentiles",
            Self::CostEstimate => "07_cost_estimate",
            Self::ScenarioScorecard => "08_scenario_scorecard",
        }
    }
}

/// One named sequence of values, aligned with a panel's categories.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    /// Legend label.
    pub name: String,
    /// Fill or stroke colour.
    pub color: String,
    /// One value per category.
    pub values: Vec<Option<f64>>,
}

impl Series {
    /// Create a series.
    pub fn new(name: impl Into<String>, color: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            values,
        }
    }

    /// Whether at least one value is present.
    pub fn has_values(&self) -> bool {
        self.values.iter().any(Option::is_some)
    }
}

/// An x-axis category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    /// Axis label.
    pub label: String,
    /// Colour used instead of the series colour when a panel has one series.
    pub color: Option<String>,
}

impl Category {
    /// A plain category.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            color: None,
        }
    }

    /// A category with its own bar colour.
    pub fn colored(label: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            color: Some(color.into()),
        }
    }
}

/// What a panel draws.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PanelKind {
    /// Side-by-side bars per category.
    Bars {
        /// X-axis categories.
        categories: Vec<Category>,
        /// Bar series.
        series: Vec<Series>,
        /// Decimal places of value labels.
        precision: usize,
        /// Unit appended to value labels.
        unit: String,
    },
    /// Bars stacked per category, bottom series first.
    Stacked {
        /// X-axis categories.
        categories: Vec<Category>,
        /// Stack layers.
        series: Vec<Series>,
        /// Fixed axis maximum.
        max: f64,
    },
    /// Connected points per category.
    Lines {
        /// X-axis categories.
        categories: Vec<Category>,
        /// Line series.
        series: Vec<Series>,
        /// Logarithmic y axis.
        log_scale: bool,
    },
    /// Polygon per series over radial axes.
    Radar {
        /// Spoke labels.
        axes: Vec<String>,
        /// Value at the outer ring.
        max: f64,
        /// One polygon per series, one value per axis.
        series: Vec<Series>,
    },
    /// Clearly labelled "no data" box.
    Placeholder {
        /// Message lines.
        message: String,
    },
}

/// One sub-plot of a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    /// Panel heading.
    pub title: String,
    /// Y-axis label.
    pub y_label: String,
    /// Content.
    pub kind: PanelKind,
}

impl Panel {
    /// Create a panel.
    pub fn new(title: impl Into<String>, y_label: impl Into<String>, kind: PanelKind) -> Self {
        Self {
            title: title.into(),
            y_label: y_label.into(),
            kind,
        }
    }

    /// A "no data" panel.
    pub fn placeholder(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            title,
            "",
            PanelKind::Placeholder {
                message: message.into(),
            },
        )
    }

    /// Whether this panel only reports missing data.
    pub fn is_placeholder(&self) -> bool {
        matches!(self.kind, PanelKind::Placeholder { .. })
    }
}

/// A complete chart: a title and one or more panels stacked vertically.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    /// Which chart this is.
    pub kind: ChartKind,
    /// Heading.
    pub title: String,
    /// Footnote, e.g. an estimate disclaimer.
    pub note: Option<String>,
    /// Sub-plots.
    pub panels: Vec<Panel>,
}

impl Chart {
    /// Create a chart; a title suffix marks charts with no data at all.
    pub fn new(kind: ChartKind, title: impl Into<String>, panels: Vec<Panel>) -> Self {
        let mut title = title.into();
        if !panels.is_empty() && panels.iter().all(Panel::is_placeholder) {
            title.push_str(" (data not available)");
        }
        Self {
            kind,
            title,
            note: None,
            panels,
        }
    }

    /// Attach a footnote.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Whether every panel is a placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.panels.iter().all(Panel::is_placeholder)
    }
}
