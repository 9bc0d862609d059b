// Copyright 2025 Loadscope Contributors
// SPDX-License-Identifier: Apache-2.0

//! Artifact extraction and result-tree collection for Loadscope.
//!
//! A load-test campaign leaves three kinds of plain-text artifact behind for
//! every profile it runs. This crate turns them into the structured
//! [`CampaignView`](loadscope_core::CampaignView):
//!
//! - [`extract`] - Best-effort decoding of one artifact's content
//! - [`layout`] - Single-campaign vs multi-scenario discovery
//! - [`collect`] - Walking a layout and reading every artifact once
//!
//! # Invariants
//!
//! - Missing or malformed content is never an error, only an absent value
//! - Connection-refused cluster dumps are treated as "data unavailable"
//! - Each artifact file is read at most once per collection

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod collect;
pub mod error;
pub mod extract;
pub mod layout;

pub use collect::Collector;
pub use error::{CollectError, Result};
pub use extract::{extract, extract_file, read_artifact, ArtifactKind, Extracted};
pub use layout::{CampaignLayout, ScenarioLocation, DEFAULT_RESULTS_ROOT};
