// Copyright 2025 Loadscope Contributors
// SPDX-License-Identifier: Apache-2.0

//! Collector error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while collecting results.
///
/// Missing or malformed artifact content is never an error; only I/O
/// failures on files and directories that do exist are.
#[derive(Debug, Error)]
pub enum CollectError {
    /// Reading a file or directory failed.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for collector operations.
pub type Result<T> = std::result::Result<T, CollectError>;
