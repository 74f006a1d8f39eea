// crates/contract-graph-core/src/lib.rs
// ============================================================================
// Module: Contract Graph Core Library
// Description: Public API surface for the contract graph reconciliation core.
// Purpose: Expose core types, collaborator interfaces, and runtime entry points.
// Dependencies: crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! Contract graph core compares declarative module contracts against a
//! previously applied dependency graph. It classifies contracts as added,
//! modified, or removed, assembles part-level dependency views for
//! navigation, rolls up per-file validation, and commits change sets under an
//! optimistic revision check. The core is backend-agnostic and reaches its
//! registry, graph store, and validator only through explicit interfaces.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::*;

pub use interfaces::ContractRegistry;
pub use interfaces::ContractValidator;
pub use interfaces::GraphStore;
pub use interfaces::GraphStoreError;
pub use interfaces::RegistryError;
pub use runtime::AuditEvent;
pub use runtime::AuditSink;
pub use runtime::CommitPlan;
pub use runtime::CompositeValidator;
pub use runtime::InMemoryContractRegistry;
pub use runtime::InMemoryGraphStore;
pub use runtime::JsonlAuditSink;
pub use runtime::NoopAuditSink;
pub use runtime::ReconcileError;
pub use runtime::Reconciler;
pub use runtime::StderrAuditSink;
pub use runtime::StructuralValidator;
pub use runtime::assemble_relations;
pub use runtime::audit_relations;
pub use runtime::detect_changes;
pub use runtime::plan_commit;
pub use runtime::validate_contracts;
