// crates/contract-graph-core/src/core/change.rs
// ============================================================================
// Module: Change Records
// Description: Classified diff between the registry and the persisted graph.
// Purpose: Carry change records, registry anomalies, and the base revision.
// Dependencies: crate::core::{graph, identifiers}, serde
// ============================================================================

//! ## Overview
//! A [`ChangeSet`] is derived on every detection pass and never persisted by
//! the core. It records the graph revision it was computed against so that
//! apply can refuse to commit over a graph that has moved on.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::graph::GraphRevision;
use crate::core::identifiers::FilePath;
use crate::core::identifiers::ModuleId;

// ============================================================================
// SECTION: Change Status
// ============================================================================

/// Classification of a contract relative to the persisted graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeStatus {
    /// Path present in the registry, absent from the graph.
    Added,
    /// Path present in both with differing content.
    Modified,
    /// Path present in the graph, absent from the registry.
    Removed,
}

impl ChangeStatus {
    /// Returns a stable label for the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Modified => "modified",
            Self::Removed => "removed",
        }
    }
}

// ============================================================================
// SECTION: Change Records
// ============================================================================

/// Single classified contract change.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Contract file path.
    pub file_path: FilePath,
    /// Change classification.
    pub status: ChangeStatus,
    /// Module identifier (registry id for added/modified, graph id for removed).
    pub module_id: ModuleId,
}

/// Registry or graph condition that does not stop detection but should be
/// surfaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegistryAnomaly {
    /// More than one contract file declares the same module id.
    DuplicateModuleId {
        /// Shared module identifier.
        module_id: ModuleId,
        /// Files declaring the identifier, sorted.
        file_paths: Vec<FilePath>,
    },
    /// The registry listed the same file path more than once.
    DuplicateFilePath {
        /// Repeated path; the first occurrence was used.
        file_path: FilePath,
    },
    /// The persisted graph holds more than one module applied from one path.
    ///
    /// The path is classified as modified so that apply replaces every
    /// module listed here with the current contract.
    DuplicateSourcePath {
        /// Shared source path.
        file_path: FilePath,
        /// Modules applied from the path, sorted.
        module_ids: Vec<ModuleId>,
    },
}

/// Diff result together with the graph revision it was computed against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    /// Graph revision observed during detection.
    pub base_revision: GraphRevision,
    /// Changed contracts; unchanged contracts never appear.
    pub records: Vec<ChangeRecord>,
    /// Registry anomalies observed during detection.
    #[serde(default)]
    pub anomalies: Vec<RegistryAnomaly>,
}

impl ChangeSet {
    /// Returns true when no contract changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Counts records with the given status.
    #[must_use]
    pub fn count(&self, status: ChangeStatus) -> usize {
        self.records.iter().filter(|record| record.status == status).count()
    }

    /// Looks up the record for a file path.
    #[must_use]
    pub fn record(&self, file_path: &FilePath) -> Option<&ChangeRecord> {
        self.records.iter().find(|record| &record.file_path == file_path)
    }
}
