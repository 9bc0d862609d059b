// Copyright 2025 Loadscope Contributors
// SPDX-License-Identifier: Apache-2.0

//! SVG chart rendering.
//!
//! Charts are written as standalone SVG documents, one panel below the
//! other:
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ title                        │  HEADER_HEIGHT
//! ├──────────────────────────────┤
//! │ panel 1                      │  style.panel_height
//! ├──────────────────────────────┤
//! │ panel n                      │
//! ├──────────────────────────────┤
//! │ note                         │  NOTE_HEIGHT (optional)
//! └──────────────────────────────┘
//! ```

use crate::chart::{Category, Chart, Panel, PanelKind, Series};
use crate::error::{RenderError, Result};
use crate::style::Style;
use std::f64::consts::PI;
use std::fmt::Write;

const HEADER_HEIGHT: f64 = 48.0;
const NOTE_HEIGHT: f64 = 28.0;
const MARGIN_LEFT: f64 = 72.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 68.0;
const GRID_STEPS: usize = 5;

/// Turns a [`Chart`] into file content.
#[cfg_attr(test, mockall::automock)]
pub trait ChartRenderer {
    /// File extension of rendered charts, without the dot.
    fn extension(&self) -> &'static str;

    /// Render one chart.
    fn render(&self, chart: &Chart) -> Result<String>;
}

/// Hand-written SVG backend.
#[derive(Debug, Clone, Default)]
pub struct SvgRenderer {
    style: Style,
}

impl SvgRenderer {
    /// Create a renderer with the given style.
    pub fn new(style: Style) -> Self {
        Self { style }
    }

    /// Style in use.
    pub fn style(&self) -> &Style {
        &self.style
    }
}

impl ChartRenderer for SvgRenderer {
    fn extension(&self) -> &'static str {
        "svg"
    }

    fn render(&self, chart: &Chart) -> Result<String> {
        let fail = |reason: String| RenderError::Chart {
            chart: chart.kind.file_stem().to_string(),
            reason,
        };
        if chart.panels.is_empty() {
            return Err(fail("chart has no panels".to_string()));
        }
        for panel in &chart.panels {
            check_finite(panel).map_err(fail)?;
        }

        let width = f64::from(self.style.width);
        let panel_height = f64::from(self.style.panel_height);
        let note_height = if chart.note.is_some() { NOTE_HEIGHT } else { 0.0 };
        let height = HEADER_HEIGHT + panel_height * chart.panels.len() as f64 + note_height;

        let mut out = String::new();
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="{}">"#,
            escape(&self.style.font_family)
        )?;
        writeln!(out, r#"<rect width="100%" height="100%" fill="white"/>"#)?;
        writeln!(
            out,
            r#"<text x="{}" y="30" text-anchor="middle" font-size="20" font-weight="bold">{}</text>"#,
            width / 2.0,
            escape(&chart.title)
        )?;

        for (i, panel) in chart.panels.iter().enumerate() {
            let frame = Frame::new(0.0, HEADER_HEIGHT + panel_height * i as f64, width, panel_height);
            self.panel(&mut out, panel, &frame)?;
        }

        if let Some(note) = &chart.note {
            writeln!(
                out,
                r#"<text x="{}" y="{}" text-anchor="middle" font-size="12" font-style="italic" fill="{}">{}</text>"#,
                width / 2.0,
                height - NOTE_HEIGHT / 2.0,
                self.style.muted_color,
                escape(note)
            )?;
        }
        writeln!(out, "</svg>")?;
        Ok(out)
    }
}

/// Plot area of one panel.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: f64,
    y: f64,
    width: f64,
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

impl Frame {
    fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            left: x + MARGIN_LEFT,
            right: x + width - MARGIN_RIGHT,
            top: y + MARGIN_TOP,
            bottom: y + height - MARGIN_BOTTOM,
        }
    }

    fn plot_width(&self) -> f64 {
        (self.right - self.left).max(1.0)
    }

    fn plot_height(&self) -> f64 {
        (self.bottom - self.top).max(1.0)
    }

    fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Horizontal centre of the `index`-th of `count` slots.
    fn slot(&self, index: usize, count: usize) -> f64 {
        let step = self.plot_width() / count.max(1) as f64;
        self.left + step * (index as f64 + 0.5)
    }
}

/// Maps values onto the vertical axis.
#[derive(Debug, Clone, Copy)]
enum Scale {
    Linear { max: f64 },
    Log { lo: i32, hi: i32, floor: f64 },
}

impl Scale {
    fn y(&self, value: f64, frame: &Frame) -> f64 {
        let fraction = match *self {
            Self::Linear { max } => value / max,
            Self::Log { lo, hi, floor } => {
                (value.max(floor).log10() - f64::from(lo)) / f64::from(hi - lo)
            }
        };
        frame.bottom - fraction.clamp(0.0, 1.0) * frame.plot_height()
    }

    fn ticks(&self) -> Vec<f64> {
        match *self {
            Self::Linear { max } => (0..=GRID_STEPS)
                .map(|k| max * k as f64 / GRID_STEPS as f64)
                .collect(),
            Self::Log { lo, hi, .. } => (lo..=hi).map(|k| 10f64.powi(k)).collect(),
        }
    }
}

impl SvgRenderer {
    fn panel(&self, out: &mut String, panel: &Panel, frame: &Frame) -> Result<()> {
        writeln!(
            out,
            r#"<text x="{}" y="{}" text-anchor="middle" font-size="15" font-weight="bold">{}</text>"#,
            frame.center_x(),
            frame.y + 24.0,
            escape(&panel.title)
        )?;
        if !panel.y_label.is_empty() && !matches!(panel.kind, PanelKind::Radar { .. }) {
            let mid = (frame.top + frame.bottom) / 2.0;
            writeln!(
                out,
                r#"<text x="{x}" y="{mid}" text-anchor="middle" font-size="12" transform="rotate(-90 {x} {mid})">{}</text>"#,
                escape(&panel.y_label),
                x = frame.x + 16.0,
            )?;
        }

        match &panel.kind {
            PanelKind::Bars {
                categories,
                series,
                precision,
                unit,
            } => self.bars(out, frame, categories, series, *precision, unit),
            PanelKind::Stacked {
                categories,
                series,
                max,
            } => self.stacked(out, frame, categories, series, *max),
            PanelKind::Lines {
                categories,
                series,
                log_scale,
            } => self.lines(out, frame, categories, series, *log_scale),
            PanelKind::Radar { axes, max, series } => self.radar(out, frame, axes, *max, series),
            PanelKind::Placeholder { message } => self.placeholder(out, frame, message),
        }
    }

    fn grid(&self, out: &mut String, frame: &Frame, scale: &Scale) -> Result<()> {
        for tick in scale.ticks() {
            let y = scale.y(tick, frame);
            writeln!(
                out,
                r##"<line x1="{}" y1="{y:.1}" x2="{}" y2="{y:.1}" stroke="#dddddd" stroke-width="1"/>"##,
                frame.left, frame.right
            )?;
            writeln!(
                out,
                r#"<text x="{}" y="{:.1}" text-anchor="end" font-size="11">{}</text>"#,
                frame.left - 6.0,
                y + 4.0,
                format_tick(tick)
            )?;
        }
        writeln!(
            out,
            r#"<line x1="{l}" y1="{b}" x2="{r}" y2="{b}" stroke="black" stroke-width="1"/>"#,
            l = frame.left,
            r = frame.right,
            b = frame.bottom
        )?;
        Ok(())
    }

    fn category_labels(&self, out: &mut String, frame: &Frame, categories: &[Category]) -> Result<()> {
        for (i, category) in categories.iter().enumerate() {
            writeln!(
                out,
                r#"<text x="{:.1}" y="{}" text-anchor="middle" font-size="12">{}</text>"#,
                frame.slot(i, categories.len()),
                frame.bottom + 18.0,
                escape(&category.label)
            )?;
        }
        Ok(())
    }

    fn legend<'s>(
        &self,
        out: &mut String,
        frame: &Frame,
        entries: impl IntoIterator<Item = (&'s str, &'s str)>,
    ) -> Result<()> {
        let y = frame.bottom + 42.0;
        let mut x = frame.left;
        for (name, color) in entries {
            writeln!(
                out,
                r#"<rect x="{x:.1}" y="{}" width="12" height="12" fill="{color}"/>"#,
                y - 10.0
            )?;
            writeln!(
                out,
                r#"<text x="{:.1}" y="{y}" font-size="12">{}</text>"#,
                x + 16.0,
                escape(name)
            )?;
            x += 28.0 + 7.0 * name.chars().count() as f64;
        }
        Ok(())
    }

    fn missing(&self, out: &mut String, x: f64, y: f64) -> Result<()> {
        writeln!(
            out,
            r#"<text x="{x:.1}" y="{y:.1}" text-anchor="middle" font-size="10" fill="{}">n/a</text>"#,
            self.style.muted_color
        )?;
        Ok(())
    }

    fn bars(
        &self,
        out: &mut String,
        frame: &Frame,
        categories: &[Category],
        series: &[Series],
        precision: usize,
        unit: &str,
    ) -> Result<()> {
        let scale = Scale::Linear {
            max: nice_ceiling(max_value(series) * 1.1),
        };
        self.grid(out, frame, &scale)?;

        let group = frame.plot_width() / categories.len().max(1) as f64;
        let bar = group * 0.8 / series.len().max(1) as f64;
        for (c, category) in categories.iter().enumerate() {
            let start = frame.slot(c, categories.len()) - group * 0.4;
            for (s, entry) in series.iter().enumerate() {
                let x = start + bar * s as f64;
                let Some(value) = entry.values.get(c).copied().flatten() else {
                    self.missing(out, x + bar / 2.0, frame.bottom - 4.0)?;
                    continue;
                };
                let color = match (&category.color, series.len()) {
                    (Some(color), 1) => color.as_str(),
                    _ => entry.color.as_str(),
                };
                let y = scale.y(value, frame);
                writeln!(
                    out,
                    r#"<rect x="{x:.1}" y="{y:.1}" width="{:.1}" height="{:.1}" fill="{color}" fill-opacity="0.85" stroke="black" stroke-width="0.5"/>"#,
                    (bar - 2.0).max(1.0),
                    frame.bottom - y
                )?;
                writeln!(
                    out,
                    r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="10">{value:.precision$}{}</text>"#,
                    x + bar / 2.0,
                    y - 4.0,
                    escape(unit)
                )?;
            }
        }
        self.category_labels(out, frame, categories)?;
        self.legend(out, frame, series.iter().map(|s| (s.name.as_str(), s.color.as_str())))
    }

    fn stacked(
        &self,
        out: &mut String,
        frame: &Frame,
        categories: &[Category],
        series: &[Series],
        max: f64,
    ) -> Result<()> {
        let scale = Scale::Linear {
            max: if max > 0.0 { max } else { 1.0 },
        };
        self.grid(out, frame, &scale)?;

        let width = (frame.plot_width() / categories.len().max(1) as f64 * 0.6).max(1.0);
        for c in 0..categories.len() {
            let x = frame.slot(c, categories.len()) - width / 2.0;
            let layers: Vec<(f64, &str)> = series
                .iter()
                .filter_map(|s| s.values.get(c).copied().flatten().map(|v| (v, s.color.as_str())))
                .collect();
            if layers.is_empty() {
                self.missing(out, x + width / 2.0, frame.bottom - 4.0)?;
                continue;
            }

            let mut base = 0.0;
            for (value, color) in layers {
                let y_low = scale.y(base, frame);
                let y_high = scale.y(base + value, frame);
                writeln!(
                    out,
                    r#"<rect x="{x:.1}" y="{y_high:.1}" width="{width:.1}" height="{:.1}" fill="{color}" stroke="black" stroke-width="0.5"/>"#,
                    y_low - y_high
                )?;
                if y_low - y_high > 14.0 {
                    writeln!(
                        out,
                        r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="11" fill="white" font-weight="bold">{value:.1}%</text>"#,
                        x + width / 2.0,
                        (y_low + y_high) / 2.0 + 4.0
                    )?;
                }
                base += value;
            }
        }
        self.category_labels(out, frame, categories)?;
        self.legend(out, frame, series.iter().map(|s| (s.name.as_str(), s.color.as_str())))
    }

    fn lines(
        &self,
        out: &mut String,
        frame: &Frame,
        categories: &[Category],
        series: &[Series],
        log_scale: bool,
    ) -> Result<()> {
        let scale = if log_scale {
            let floor = self.style.log_epsilon.max(f64::MIN_POSITIVE);
            let values = series
                .iter()
                .flat_map(|s| s.values.iter().flatten())
                .map(|v| v.max(floor));
            let (min, max) = values.fold((f64::INFINITY, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
            let lo = if min.is_finite() { min.log10().floor() as i32 } else { 0 };
            let hi = (max.max(floor).log10().ceil() as i32).max(lo + 1);
            Scale::Log { lo, hi, floor }
        } else {
            Scale::Linear {
                max: nice_ceiling(max_value(series) * 1.1),
            }
        };
        self.grid(out, frame, &scale)?;

        for entry in series {
            let points: Vec<Option<(f64, f64)>> = entry
                .values
                .iter()
                .enumerate()
                .map(|(i, v)| v.map(|v| (frame.slot(i, categories.len()), scale.y(v, frame))))
                .collect();

            // Gaps split the line rather than dropping to zero.
            for run in points.split(Option::is_none) {
                if run.len() < 2 {
                    continue;
                }
                let coords: Vec<String> = run
                    .iter()
                    .flatten()
                    .map(|(x, y)| format!("{x:.1},{y:.1}"))
                    .collect();
                writeln!(
                    out,
                    r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="2"/>"#,
                    coords.join(" "),
                    entry.color
                )?;
            }
            for (x, y) in points.iter().flatten() {
                writeln!(
                    out,
                    r#"<circle cx="{x:.1}" cy="{y:.1}" r="4" fill="{}"/>"#,
                    entry.color
                )?;
            }
        }
        self.category_labels(out, frame, categories)?;
        self.legend(out, frame, series.iter().map(|s| (s.name.as_str(), s.color.as_str())))
    }

    fn radar(&self, out: &mut String, frame: &Frame, axes: &[String], max: f64, series: &[Series]) -> Result<()> {
        let max = if max > 0.0 { max } else { 1.0 };
        let cx = frame.center_x();
        let cy = (frame.top + frame.bottom) / 2.0;
        let radius = (frame.plot_width().min(frame.plot_height()) / 2.0 - 16.0).max(8.0);
        let n = axes.len().max(1);
        let point = |axis: usize, value: f64| {
            let angle = -PI / 2.0 + 2.0 * PI * axis as f64 / n as f64;
            let r = radius * (value / max).clamp(0.0, 1.0);
            (cx + r * angle.cos(), cy + r * angle.sin())
        };

        let rings = max.round().max(1.0) as usize;
        for ring in 1..=rings {
            let value = max * ring as f64 / rings as f64;
            let coords: Vec<String> = (0..n)
                .map(|a| {
                    let (x, y) = point(a, value);
                    format!("{x:.1},{y:.1}")
                })
                .collect();
            writeln!(
                out,
                r##"<polygon points="{}" fill="none" stroke="#cccccc" stroke-width="1"/>"##,
                coords.join(" ")
            )?;
        }
        for (a, axis) in axes.iter().enumerate() {
            let (x, y) = point(a, max);
            writeln!(
                out,
                r##"<line x1="{cx:.1}" y1="{cy:.1}" x2="{x:.1}" y2="{y:.1}" stroke="#cccccc" stroke-width="1"/>"##
            )?;
            let (lx, ly) = point(a, max * 1.12);
            writeln!(
                out,
                r#"<text x="{lx:.1}" y="{:.1}" text-anchor="middle" font-size="12">{}</text>"#,
                ly + 4.0,
                escape(axis)
            )?;
        }

        let mut legend = Vec::with_capacity(series.len());
        for entry in series {
            let coords: Vec<String> = (0..n)
                .map(|a| {
                    let value = entry.values.get(a).copied().flatten().unwrap_or(0.0);
                    let (x, y) = point(a, value);
                    format!("{x:.1},{y:.1}")
                })
                .collect();
            writeln!(
                out,
                r#"<polygon points="{}" fill="{c}" fill-opacity="0.15" stroke="{c}" stroke-width="2"/>"#,
                coords.join(" "),
                c = entry.color
            )?;
            let complete = entry.values.len() >= axes.len() && entry.values.iter().all(Option::is_some);
            let name = if complete {
                entry.name.clone()
            } else {
                format!("{} (n/a axes at centre)", entry.name)
            };
            legend.push((name, entry.color.as_str()));
        }
        self.legend(out, frame, legend.iter().map(|(name, color)| (name.as_str(), *color)))
    }

    fn placeholder(&self, out: &mut String, frame: &Frame, message: &str) -> Result<()> {
        writeln!(
            out,
            r#"<rect x="{}" y="{}" width="{:.1}" height="{:.1}" rx="8" fill="{}" fill-opacity="0.5" stroke="{}"/>"#,
            frame.left,
            frame.top,
            frame.plot_width(),
            frame.plot_height(),
            self.style.placeholder_fill,
            self.style.muted_color
        )?;
        let lines: Vec<&str> = message.lines().collect();
        let first = (frame.top + frame.bottom) / 2.0 - 10.0 * (lines.len() as f64 - 1.0);
        for (i, line) in lines.iter().enumerate() {
            writeln!(
                out,
                r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="14" fill="{}">{}</text>"#,
                frame.center_x(),
                first + 20.0 * i as f64,
                self.style.muted_color,
                escape(line)
            )?;
        }
        Ok(())
    }
}

fn check_finite(panel: &Panel) -> std::result::Result<(), String> {
    let series = match &panel.kind {
        PanelKind::Bars { series, .. }
        | PanelKind::Stacked { series, .. }
        | PanelKind::Lines { series, .. }
        | PanelKind::Radar { series, .. } => series,
        PanelKind::Placeholder { .. } => return Ok(()),
    };
    for entry in series {
        if entry.values.iter().flatten().any(|v| !v.is_finite()) {
            return Err(format!(
                "non-finite value in series '{}' of panel '{}'",
                entry.name, panel.title
            ));
        }
    }
    Ok(())
}

fn max_value(series: &[Series]) -> f64 {
    series
        .iter()
        .flat_map(|s| s.values.iter().flatten())
        .fold(0.0, |acc: f64, v| acc.max(*v))
}

/// Smallest "round" number (1, 2, 2.5 or 5 times a power of ten) at or
/// above `value`; 1 for non-positive input.
pub(crate) fn nice_ceiling(value: f64) -> f64 {
    if value.is_nan() || value <= 0.0 || value.is_infinite() {
        return 1.0;
    }
    let magnitude = 10f64.powf(value.log10().floor());
    let normalized = value / magnitude;
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .into_iter()
        .find(|step| normalized <= *step + 1e-9)
        .unwrap_or(10.0);
    step * magnitude
}

fn format_tick(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else if value.abs() >= 1.0 && value.fract().abs() < 1e-9 {
        format!("{value:.0}")
    } else if value.abs() >= 0.1 {
        format!("{value:.1}")
    } else {
        let fixed = format!("{value:.4}");
        fixed.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Escape text for XML content and attribute values.
pub(crate) fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartKind;

    fn bars(values: Vec<Option<f64>>) -> Chart {
        Chart::new(
            ChartKind::ThroughputComparison,
            "Throughput & more",
            vec![Panel::new(
                "By profile",
                "req/s",
                PanelKind::Bars {
                    categories: vec![Category::new("BASELINE"), Category::new("SPIKE")],
                    series: vec![Series::new("S1", "#3498db", values)],
                    precision: 1,
                    unit: String::new(),
                },
            )],
        )
    }

    #[test]
    fn test_renders_complete_document() {
        let svg = SvgRenderer::default()
            .render(&bars(vec![Some(120.5), Some(300.0)]))
            .unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("Throughput &amp; more"));
        assert!(svg.contains(">120.5<"));
        assert_eq!(svg.matches("fill-opacity=\"0.85\"").count(), 2);
    }

    #[test]
    fn test_missing_value_is_marked_not_zero() {
        let svg = SvgRenderer::default()
            .render(&bars(vec![Some(10.0), None]))
            .unwrap();
        assert!(svg.contains(">n/a<"));
        assert_eq!(svg.matches("fill-opacity=\"0.85\"").count(), 1);
    }

    #[test]
    fn test_non_finite_value_is_rejected() {
        let err = SvgRenderer::default()
            .render(&bars(vec![Some(f64::NAN), None]))
            .unwrap_err();
        assert!(matches!(err, RenderError::Chart { ref chart, .. } if chart == "02_throughput_comparison"));
    }

    #[test]
    fn test_placeholder_lines_are_drawn() {
        let chart = Chart::new(
            ChartKind::ResourceUsage,
            "Resources",
            vec![Panel::placeholder("CPU", "CPU data not available\nCheck <metrics-server>")],
        );
        let svg = SvgRenderer::default().render(&chart).unwrap();
        assert!(svg.contains("CPU data not available"));
        assert!(svg.contains("Check &lt;metrics-server&gt;"));
        assert!(svg.contains("(data not available)"));
    }

    #[test]
    fn test_log_scale_gridlines_cover_decades() {
        let chart = Chart::new(
            ChartKind::LatencyPercentiles,
            "Ladder",
            vec![Panel::new(
                "Ladder",
                "ms",
                PanelKind::Lines {
                    categories: vec![Category::new("Min"), Category::new("Avg"), Category::new("Max")],
                    series: vec![Series::new("S1", "#3498db", vec![Some(0.01), None, Some(250.0)])],
                    log_scale: true,
                },
            )],
        );
        let svg = SvgRenderer::default().render(&chart).unwrap();
        assert!(svg.contains(">0.01<"));
        assert!(svg.contains(">1000<"));
        // The gap leaves no two-point run to connect.
        assert!(!svg.contains("<polyline"));
        assert_eq!(svg.matches("<circle").count(), 2);
    }

    #[test]
    fn test_radar_marks_incomplete_series() {
        let chart = Chart::new(
            ChartKind::ScenarioScorecard,
            "Scorecard",
            vec![Panel::new(
                "Comparison",
                "Stars",
                PanelKind::Radar {
                    axes: vec!["A".into(), "B".into(), "C".into()],
                    max: 5.0,
                    series: vec![Series::new("S1", "#3498db", vec![Some(4.0), None, Some(2.0)])],
                },
            )],
        )
        .with_note("Estimate");
        let svg = SvgRenderer::default().render(&chart).unwrap();
        assert!(svg.contains("S1 (n/a axes at centre)"));
        assert!(svg.contains(">Estimate<"));
    }

    #[test]
    fn test_nice_ceiling() {
        assert_eq!(nice_ceiling(0.0), 1.0);
        assert_eq!(nice_ceiling(7.3), 10.0);
        assert_eq!(nice_ceiling(110.0), 200.0);
        assert_eq!(nice_ceiling(2.2), 2.5);
        assert_eq!(nice_ceiling(f64::NAN), 1.0);
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"a<b>&"c'"#), "a&lt;b&gt;&amp;&quot;c&apos;");
    }
}
