// crates/contract-graph-core/src/core/relation.rs
// ============================================================================
// Module: Relation Views
// Description: Outgoing and incoming dependency edges for a subject module.
// Purpose: Describe persisted dependency relations at part granularity.
// Dependencies: crate::core::{contract, identifiers}, serde
// ============================================================================

//! ## Overview
//! Relation views describe the persisted graph exactly as stored. Data
//! quality problems are reported separately as [`RelationIssue`] values and
//! never folded back into the views.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::contract::PartRef;
use crate::core::identifiers::ModuleId;
use crate::core::identifiers::PartId;

// ============================================================================
// SECTION: Edges
// ============================================================================

/// Dependency edge annotated with the parts involved.
///
/// On an outgoing edge `module_id` is the provider; on an incoming edge it is
/// the consumer of the subject's parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyEdge {
    /// Counterpart module identifier.
    pub module_id: ModuleId,
    /// Parts used across the edge, in recorded order.
    pub parts: Vec<PartRef>,
}

/// Bidirectional relation view scoped to one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationView {
    /// Subject module identifier.
    pub module_id: ModuleId,
    /// Modules the subject consumes parts from.
    pub outgoing: Vec<DependencyEdge>,
    /// Modules consuming parts of the subject.
    pub incoming: Vec<DependencyEdge>,
}

impl RelationView {
    /// Returns an empty view for a module.
    #[must_use]
    pub const fn empty(module_id: ModuleId) -> Self {
        Self {
            module_id,
            outgoing: Vec::new(),
            incoming: Vec::new(),
        }
    }

    /// Returns true when the module has no relations in either direction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outgoing.is_empty() && self.incoming.is_empty()
    }
}

// ============================================================================
// SECTION: Data Quality
// ============================================================================

/// Inconsistency found in persisted dependency data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RelationIssue {
    /// A dependency names a module absent from the graph.
    MissingModule {
        /// Consuming module.
        from: ModuleId,
        /// Missing provider module.
        to: ModuleId,
    },
    /// A dependency names a part the provider does not export.
    MissingPart {
        /// Consuming module.
        from: ModuleId,
        /// Provider module.
        to: ModuleId,
        /// Missing part identifier.
        part_id: PartId,
    },
    /// A dependency records a part type that differs from the provider's.
    PartTypeMismatch {
        /// Consuming module.
        from: ModuleId,
        /// Provider module.
        to: ModuleId,
        /// Part identifier.
        part_id: PartId,
        /// Type recorded by the consumer.
        declared: String,
        /// Type exported by the provider.
        actual: String,
    },
}
