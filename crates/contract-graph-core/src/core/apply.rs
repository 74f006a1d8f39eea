// crates/contract-graph-core/src/core/apply.rs
// ============================================================================
// Module: Apply Results
// Description: Summary of a committed change set and apply conflict details.
// Purpose: Report apply outcomes and optimistic-concurrency failures.
// Dependencies: crate::core::{graph, identifiers}, serde
// ============================================================================

//! ## Overview
//! An [`ApplyResult`] is produced once per successful apply and is terminal.
//! An [`ApplyConflict`] carries enough detail for the caller to re-fetch and
//! retry; the core itself never retries.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::graph::GraphRevision;
use crate::core::identifiers::FilePath;

// ============================================================================
// SECTION: Apply Result
// ============================================================================

/// Summary of a committed change set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyResult {
    /// Human-readable summary.
    pub message: String,
    /// Distinct modules touched (added, modified, or removed).
    pub modules_processed: usize,
    /// Parts across the touched modules.
    pub parts_processed: usize,
    /// Graph revision after the commit.
    pub revision: GraphRevision,
}

// ============================================================================
// SECTION: Conflicts
// ============================================================================

/// Reason an apply precondition failed against the live graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ApplyConflict {
    /// The graph revision moved since the diff was computed.
    StaleRevision {
        /// Revision the diff was computed against.
        expected: GraphRevision,
        /// Revision observed at commit time.
        actual: GraphRevision,
    },
    /// An added path is already present in the graph.
    AlreadyApplied {
        /// Offending contract path.
        file_path: FilePath,
    },
    /// A modified or removed path is no longer present in the graph.
    NotApplied {
        /// Offending contract path.
        file_path: FilePath,
    },
    /// An added or modified contract is no longer present in the registry.
    ContractMissing {
        /// Offending contract path.
        file_path: FilePath,
    },
    /// The store rejected the commit.
    Rejected {
        /// Store-provided reason.
        reason: String,
    },
}

impl fmt::Display for ApplyConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaleRevision {
                expected,
                actual,
            } => write!(f, "graph revision changed (expected {expected}, found {actual})"),
            Self::AlreadyApplied {
                file_path,
            } => write!(f, "{file_path} is already present in the graph"),
            Self::NotApplied {
                file_path,
            } => write!(f, "{file_path} is no longer present in the graph"),
            Self::ContractMissing {
                file_path,
            } => write!(f, "{file_path} is no longer present in the registry"),
            Self::Rejected {
                reason,
            } => write!(f, "graph store rejected commit: {reason}"),
        }
    }
}
