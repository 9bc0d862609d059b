// Copyright 2025 Loadscope Contributors
// SPDX-License-Identifier: Apache-2.0

//! Core data model for Loadscope.
//!
//! Loadscope analyses the artifacts a Kubernetes load-test campaign leaves on
//! disk: load-generator console summaries, autoscaler status dumps and pod
//! resource listings. This crate holds the types every stage shares.
//!
//! # Modules
//!
//! - [`profile`] - The four fixed test profiles
//! - [`record`] - Per-profile load-test metrics and rate reconciliation
//! - [`cluster`] - Autoscaler and pod resource snapshots
//! - [`dataset`] - Scenario datasets and the campaign view
//! - [`catalog`] - The enumerated identifier configuration
//! - [`settings`] - Environment-driven runtime settings

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod catalog;
pub mod cluster;
pub mod dataset;
pub mod profile;
pub mod record;
pub mod settings;

pub use catalog::{AutoscalerSpec, Catalog, ScenarioSpec, ServiceSpec};
pub use cluster::{
    AutoscalerSnapshot, ClusterCapture, PodResourceSnapshot, PrePost, ReplicaBounds,
    ServiceSamples,
};
pub use dataset::{compare_scenario_keys, CampaignView, ScenarioDataset, ScenarioId, ViewMode};
pub use profile::TestProfile;
pub use record::{MetricRecord, RateBreakdown};
pub use settings::{Settings, SettingsError};
