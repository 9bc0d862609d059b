// Copyright 2025 Loadscope Contributors
// SPDX-License-Identifier: Apache-2.0

//! Chart palette and geometry.
//!
//! A [`Style`] is built once by the caller and passed by reference to every
//! chart builder and renderer; nothing reads style from global state.

use loadscope_core::TestProfile;
use serde::{Deserialize, Serialize};

/// Immutable palette and geometry for charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    /// Colour per test profile, in [`TestProfile::ALL`] order.
    pub profile_colors: [String; 4],
    /// Colours cycled over scenarios and other series.
    pub series_colors: Vec<String>,
    /// Pre-load snapshot colour.
    pub pre_color: String,
    /// Post-load snapshot colour.
    pub post_color: String,
    /// Success share colour.
    pub success_color: String,
    /// Failure share colour.
    pub failure_color: String,
    /// Colour of `n/a` markers and placeholder text.
    pub muted_color: String,
    /// Placeholder box fill.
    pub placeholder_fill: String,
    /// Font family.
    pub font_family: String,
    /// Chart width in pixels.
    pub width: u32,
    /// Height of one panel in pixels.
    pub panel_height: u32,
    /// Floor applied to values on logarithmic axes.
    pub log_epsilon: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            profile_colors: [
                "#2ecc71".to_string(),
                "#3498db".to_string(),
                "#e74c3c".to_string(),
                "#f39c12".to_string(),
            ],
            series_colors: vec![
                "#3498db".to_string(),
                "#2ecc71".to_string(),
                "#e74c3c".to_string(),
                "#f39c12".to_string(),
                "#9b59b6".to_string(),
                "#1abc9c".to_string(),
            ],
            pre_color: "#3498db".to_string(),
            post_color: "#e74c3c".to_string(),
            success_color: "#2ecc71".to_string(),
            failure_color: "#e74c3c".to_string(),
            muted_color: "#7f8c8d".to_string(),
            placeholder_fill: "#f5deb3".to_string(),
            font_family: "DejaVu Sans, Arial, sans-serif".to_string(),
            width: 960,
            panel_height: 360,
            log_epsilon: 0.01,
        }
    }
}

impl Style {
    /// Colour of a test profile.
    pub fn profile_color(&self, profile: TestProfile) -> &str {
        let idx = TestProfile::ALL
            .iter()
            .position(|p| *p == profile)
            .unwrap_or(0);
        &self.profile_colors[idx]
    }

    /// Colour of the `index`-th series, cycling through the palette.
    pub fn series_color(&self, index: usize) -> &str {
        if self.series_colors.is_empty() {
            return &self.muted_color;
        }
        &self.series_colors[index % self.series_colors.len()]
    }
}
