// Copyright 2025 Loadscope Contributors
// SPDX-License-Identifier: Apache-2.0

//! Cross-scenario aggregation for Loadscope.
//!
//! Turns a collected [`CampaignView`](loadscope_core::CampaignView) into the
//! derived values the report needs.
//!
//! # Features
//!
//! - Success/failure reconciliation applied uniformly to every profile
//! - Per-service resource means that stay undefined when nothing was sampled
//! - Average throughput that ignores untested profiles
//! - Pod-time cost estimates behind a swappable [`PodCountPolicy`]
//! - Five-axis scorecards behind a swappable [`ScoringPolicy`]

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod aggregate;
pub mod cost;
pub mod score;

pub use aggregate::{
    average_throughput, Aggregator, CampaignAnalysis, ClusterSummary, ReplicaChange,
    ResourceUsage, ScenarioAnalysis, DEFAULT_RUN_MINUTES,
};
pub use cost::{CostEstimate, ObservedPodCount, PodCountPolicy, PodCounts, StaticPodCount};
pub use score::{
    Bands, ScoreInput, Scorecard, ScoringPolicy, StaticScoring, ThresholdScoring, AXES,
};
