// Copyright 2025 Loadscope Contributors
// SPDX-License-Identifier: Apache-2.0

//! Text metric extraction.
//!
//! Pure functions mapping the content of one raw artifact to a structured
//! record. Missing or malformed fields are absent from the result; nothing in
//! this module fails on content.

mod autoscaler;
mod load_test;
mod pods;

pub use autoscaler::extract_autoscaler;
pub use load_test::{extract_load_test, normalize_tail, to_millis};
pub use pods::{extract_pod_resources, parse_cpu_millicores, parse_memory_mebibytes};

use crate::error::{CollectError, Result};
use loadscope_core::{AutoscalerSnapshot, Catalog, MetricRecord, PodResourceSnapshot};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

/// The three artifact kinds produced during a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    /// Load-generator console output.
    LoadTestOutput,
    /// Autoscaler status table dump.
    AutoscalerStatus,
    /// Pod resource table dump.
    PodResources,
}

/// Structured result of extracting one artifact.
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted {
    /// Summary metrics, absent when the output held none.
    LoadTest(Option<MetricRecord>),
    /// Autoscaler bounds; empty when unavailable.
    Autoscaler(AutoscalerSnapshot),
    /// Pod resource samples; empty when unavailable.
    PodResources(PodResourceSnapshot),
}

impl Extracted {
    /// The load-test record, if this is one.
    pub fn into_load_test(self) -> Option<MetricRecord> {
        match self {
            Self::LoadTest(record) => record,
            _ => None,
        }
    }

    /// The autoscaler snapshot; empty for any other kind.
    pub fn into_autoscaler(self) -> AutoscalerSnapshot {
        match self {
            Self::Autoscaler(snapshot) => snapshot,
            _ => AutoscalerSnapshot::new(),
        }
    }

    /// The pod resource snapshot; empty for any other kind.
    pub fn into_pod_resources(self) -> PodResourceSnapshot {
        match self {
            Self::PodResources(snapshot) => snapshot,
            _ => PodResourceSnapshot::new(),
        }
    }
}

/// Whether cluster-inspection output signals that no data was captured.
///
/// Blank output, or a connection-refused message from the cluster client.
pub(crate) fn is_unavailable(content: &str) -> bool {
    if content.trim().is_empty() {
        return true;
    }
    let lower = content.to_lowercase();
    lower.contains("connection") && lower.contains("refused")
}

/// Extract one artifact's content according to its kind.
pub fn extract(kind: ArtifactKind, content: &str, catalog: &Catalog) -> Extracted {
    match kind {
        ArtifactKind::LoadTestOutput => {
            Extracted::LoadTest(extract_load_test(content, catalog.tail_lines))
        }
        ArtifactKind::AutoscalerStatus => {
            Extracted::Autoscaler(extract_autoscaler(content, catalog))
        }
        ArtifactKind::PodResources => {
            Extracted::PodResources(extract_pod_resources(content, catalog))
        }
    }
}

/// Read an artifact fully, or `None` when the file does not exist.
///
/// Invalid UTF-8 is replaced rather than rejected; any other I/O failure is
/// an error.
pub fn read_artifact(path: &Path) -> Result<Option<String>> {
    match fs::read(path) {
        Ok(bytes) => {
            debug!(path = %path.display(), bytes = bytes.len(), "read artifact");
            Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
        }
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(CollectError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Read and extract one artifact file.
///
/// A missing file extracts as if it were empty.
pub fn extract_file(kind: ArtifactKind, path: &Path, catalog: &Catalog) -> Result<Extracted> {
    let content = read_artifact(path)?.unwrap_or_default();
    Ok(extract(kind, &content, catalog))
}
