// Copyright 2025 Loadscope Contributors
// SPDX-License-Identifier: Apache-2.0

//! Per-profile load-test metrics.
//!
//! A [`MetricRecord`] holds whatever the load generator's summary exposed for
//! one test profile. Every field is optional: partial records are expected,
//! since not every profile emits every metric.
//!
//! # Invariants
//!
//! Success and failure rates are reconciled by [`MetricRecord::rates`]:
//!
//! ```text
//! failure present, success absent  ->  success = 100 - failure
//! both absent                      ->  (success, failure) = (100.0, 0.0)
//! ```
//!
//! The same function backs both the extractor and the aggregator, so the
//! single-campaign and multi-scenario views can never disagree.

use serde::{Deserialize, Serialize};

/// Extracted summary statistics for a single test profile.
///
/// Durations are milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    /// Minimum request duration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_duration_ms: Option<f64>,
    /// Mean request duration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_duration_ms: Option<f64>,
    /// Median request duration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median_duration_ms: Option<f64>,
    /// Maximum request duration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_duration_ms: Option<f64>,
    /// 90th percentile request duration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p90_duration_ms: Option<f64>,
    /// 95th percentile request duration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p95_duration_ms: Option<f64>,
    /// 99th percentile request duration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p99_duration_ms: Option<f64>,
    /// Total HTTP requests issued.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_requests: Option<u64>,
    /// Request throughput.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requests_per_second: Option<f64>,
    /// Successful share, from checks when observed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_rate_percent: Option<f64>,
    /// Failed request share.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_rate_percent: Option<f64>,
    /// Peak virtual users.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_virtual_users: Option<u64>,
    /// Completed script iterations.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iterations: Option<u64>,
}

/// Success/failure percentages after the fallback policy has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateBreakdown {
    /// Success percentage.
    pub success_percent: f64,
    /// Failure percentage.
    pub failure_percent: f64,
}

impl RateBreakdown {
    /// Split of a stacked 100% bar: the failure share and its complement.
    ///
    /// Independent of an observed check rate, so the two parts always sum
    /// to exactly 100.
    pub fn stacked(&self) -> (f64, f64) {
        let failure = self.failure_percent.clamp(0.0, 100.0);
        (100.0 - failure, failure)
    }
}

impl MetricRecord {
    /// Whether no field at all was extracted.
    pub fn is_empty(&self) -> bool {
        *self == MetricRecord::default()
    }

    /// Reconcile success and failure rates.
    pub fn rates(&self) -> RateBreakdown {
        let failure_percent = self.failure_rate_percent.unwrap_or(0.0);
        let success_percent = self
            .success_rate_percent
            .unwrap_or(100.0 - failure_percent);
        RateBreakdown {
            success_percent,
            failure_percent,
        }
    }

    /// Return this record with both rate fields populated via [`Self::rates`].
    #[must_use]
    pub fn with_reconciled_rates(mut self) -> Self {
        let rates = self.rates();
        self.success_rate_percent = Some(rates.success_percent);
        self.failure_rate_percent = Some(rates.failure_percent);
        self
    }

    /// Latency percentile ladder in chart order: min, avg, median, p90, p95, max.
    pub fn latency_ladder(&self) -> [(&'static str, Option<f64>); 6] {
        [
            ("Min", self.min_duration_ms),
            ("Avg", self.avg_duration_ms),
            ("Median", self.median_duration_ms),
            ("p90", self.p90_duration_ms),
            ("p95", self.p95_duration_ms),
            ("Max", self.max_duration_ms),
        ]
    }
}
