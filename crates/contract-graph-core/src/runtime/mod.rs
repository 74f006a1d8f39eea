// crates/contract-graph-core/src/runtime/mod.rs
// ============================================================================
// Module: Contract Graph Runtime
// Description: Change detection, relation assembly, validation, and apply.
// Purpose: Implement reconciliation over registry and graph snapshots.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! Runtime modules hold the reconciliation logic. The free functions are pure
//! over explicit snapshots; [`Reconciler`] loads those snapshots from the
//! collaborators on every call so no state is shared between calls.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod apply;
pub mod audit;
pub mod detector;
pub mod engine;
pub mod relations;
pub mod store;
pub mod validation;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use apply::CommitPlan;
pub use apply::plan_commit;
pub use audit::AuditEvent;
pub use audit::AuditSink;
pub use audit::JsonlAuditSink;
pub use audit::NoopAuditSink;
pub use audit::StderrAuditSink;
pub use detector::detect_changes;
pub use engine::ReconcileError;
pub use engine::Reconciler;
pub use relations::assemble_relations;
pub use relations::audit_relations;
pub use store::InMemoryContractRegistry;
pub use store::InMemoryGraphStore;
pub use validation::CompositeValidator;
pub use validation::StructuralValidator;
pub use validation::validate_contracts;
