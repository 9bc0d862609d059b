// Copyright 2025 Loadscope Contributors
// SPDX-License-Identifier: Apache-2.0

//! Renderer error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while producing charts and reports.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A chart could not be drawn.
    #[error("Failed to draw {chart}: {reason}")]
    Chart {
        /// Chart file stem.
        chart: String,
        /// What went wrong.
        reason: String,
    },

    /// Writing an output file failed.
    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        /// Path being written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Serialising the data dump failed.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Formatting into a buffer failed.
    #[error("Formatting error")]
    Format(#[from] std::fmt::Error),
}

/// Result type for renderer operations.
pub type Result<T> = std::result::Result<T, RenderError>;
