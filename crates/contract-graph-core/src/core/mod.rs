// crates/contract-graph-core/src/core/mod.rs
// ============================================================================
// Module: Contract Graph Core Types
// Description: Canonical contract, graph, diff, relation, and validation types.
// Purpose: Provide stable, serializable shapes for the reconciliation core.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Core types are plain structured values with no behavior beyond
//! construction and normalization. They are the shapes handed to the
//! presentation layer and the payloads exchanged with collaborators.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod apply;
pub mod change;
pub mod contract;
pub mod graph;
pub mod hashing;
pub mod identifiers;
pub mod relation;
pub mod validation;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use apply::ApplyConflict;
pub use apply::ApplyResult;
pub use change::ChangeRecord;
pub use change::ChangeSet;
pub use change::ChangeStatus;
pub use change::RegistryAnomaly;
pub use contract::ContractContent;
pub use contract::ContractFile;
pub use contract::ModuleDependency;
pub use contract::ModuleShape;
pub use contract::Part;
pub use contract::PartRef;
pub use graph::GraphCommit;
pub use graph::GraphModule;
pub use graph::GraphRevision;
pub use graph::GraphSnapshot;
pub use hashing::HashDigest;
pub use hashing::HashError;
pub use identifiers::FilePath;
pub use identifiers::ModuleId;
pub use identifiers::PartId;
pub use relation::DependencyEdge;
pub use relation::RelationIssue;
pub use relation::RelationView;
pub use validation::ValidationIssue;
pub use validation::ValidationOutcome;
pub use validation::ValidationSummary;
