// crates/contract-graph-core/src/runtime/engine.rs
// ============================================================================
// Module: Reconciler
// Description: Entry points wiring collaborators into detect, relations, validate, apply.
// Purpose: Load fresh snapshots per call and delegate to the pure core functions.
// Dependencies: crate::{core, interfaces, runtime}, thiserror
// ============================================================================

//! ## Overview
//! The [`Reconciler`] holds no state across calls beyond its collaborators.
//! Each entry point reads fresh snapshots, runs a pure function over them,
//! and records one audit event. Connectivity and conflict failures surface
//! as distinguishable [`ReconcileError`] variants and are never retried.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use thiserror::Error;

use crate::core::ApplyConflict;
use crate::core::ApplyResult;
use crate::core::ChangeSet;
use crate::core::ContractFile;
use crate::core::FilePath;
use crate::core::GraphModule;
use crate::core::GraphSnapshot;
use crate::core::ModuleId;
use crate::core::RelationIssue;
use crate::core::RelationView;
use crate::core::ValidationSummary;
use crate::interfaces::ContractRegistry;
use crate::interfaces::ContractValidator;
use crate::interfaces::GraphStore;
use crate::interfaces::GraphStoreError;
use crate::interfaces::RegistryError;
use crate::runtime::apply::plan_commit;
use crate::runtime::audit::AuditEvent;
use crate::runtime::audit::AuditSink;
use crate::runtime::audit::NoopAuditSink;
use crate::runtime::detector::detect_changes;
use crate::runtime::relations::assemble_relations;
use crate::runtime::relations::audit_relations;
use crate::runtime::validation::validate_contracts;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Reconciliation errors surfaced to callers.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Registry or graph store could not be reached.
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),
    /// Requested module or path is absent from the graph.
    #[error("not found: {0}")]
    NotFound(String),
    /// Apply precondition failed against live state.
    #[error("apply conflict: {0}")]
    Conflict(ApplyConflict),
    /// Source data is corrupted or unusable.
    #[error("invalid source data: {0}")]
    Invalid(String),
}

impl From<RegistryError> for ReconcileError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::Unavailable(message) => Self::SourceUnavailable(message),
            RegistryError::Invalid(message) => Self::Invalid(message),
        }
    }
}

impl From<GraphStoreError> for ReconcileError {
    fn from(err: GraphStoreError) -> Self {
        match err {
            GraphStoreError::Unavailable(message) => Self::SourceUnavailable(message),
            GraphStoreError::Corrupt(message) => Self::Invalid(message),
            GraphStoreError::StaleRevision {
                expected,
                actual,
            } => Self::Conflict(ApplyConflict::StaleRevision {
                expected,
                actual,
            }),
            GraphStoreError::Conflict(reason) => Self::Conflict(ApplyConflict::Rejected {
                reason,
            }),
        }
    }
}

// ============================================================================
// SECTION: Reconciler
// ============================================================================

/// Reconciliation entry points over a registry and a graph store.
pub struct Reconciler<R, G> {
    /// Contract registry collaborator.
    registry: R,
    /// Graph store collaborator.
    graph: G,
    /// Audit sink for reconciliation events.
    audit: Arc<dyn AuditSink>,
}

impl<R, G> Reconciler<R, G>
where
    R: ContractRegistry,
    G: GraphStore,
{
    /// Creates a reconciler with a no-op audit sink.
    #[must_use]
    pub fn new(registry: R, graph: G) -> Self {
        Self {
            registry,
            graph,
            audit: Arc::new(NoopAuditSink),
        }
    }

    /// Replaces the audit sink.
    #[must_use]
    pub fn with_audit(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Returns the registry collaborator.
    #[must_use]
    pub const fn registry(&self) -> &R {
        &self.registry
    }

    /// Returns the graph store collaborator.
    #[must_use]
    pub const fn graph(&self) -> &G {
        &self.graph
    }

    /// Detects changes between the current registry and the persisted graph.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::SourceUnavailable`] when either source cannot
    /// be read; no partial diff is produced.
    pub fn detect_changes(&self) -> Result<ChangeSet, ReconcileError> {
        let contracts = self.load_contracts("detect_changes")?;
        let snapshot = self.load_snapshot("detect_changes")?;
        let change_set = detect_changes(&contracts, &snapshot);
        self.audit.record(&AuditEvent::changes_detected(&change_set));
        Ok(change_set)
    }

    /// Assembles the persisted relation view for a module.
    ///
    /// Unknown modules yield an empty view.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError`] when the graph cannot be read.
    pub fn relations(&self, module_id: &ModuleId) -> Result<RelationView, ReconcileError> {
        let snapshot = self.load_snapshot("relations")?;
        let view = assemble_relations(module_id, &snapshot);
        self.audit.record(&AuditEvent::relations_assembled(&view));
        Ok(view)
    }

    /// Loads the persisted detail of a module.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::NotFound`] when the module is not in the graph.
    pub fn module_detail(&self, module_id: &ModuleId) -> Result<GraphModule, ReconcileError> {
        self.graph
            .get_module(module_id)?
            .ok_or_else(|| ReconcileError::NotFound(format!("module {module_id}")))
    }

    /// Resolves the module applied from a contract path.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::NotFound`] when no module was applied from the path.
    pub fn module_for_path(&self, file_path: &FilePath) -> Result<ModuleId, ReconcileError> {
        self.graph
            .module_id_by_path(file_path)?
            .ok_or_else(|| ReconcileError::NotFound(format!("path {file_path}")))
    }

    /// Reports unresolved dependency references in the persisted graph.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError`] when the graph cannot be read.
    pub fn audit_relations(&self) -> Result<Vec<RelationIssue>, ReconcileError> {
        let snapshot = self.load_snapshot("audit_relations")?;
        Ok(audit_relations(&snapshot))
    }

    /// Validates every registry file and aggregates the outcomes.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError`] when the registry cannot be read.
    pub fn validate<V>(&self, validator: &V) -> Result<ValidationSummary, ReconcileError>
    where
        V: ContractValidator + ?Sized,
    {
        let contracts = self.load_contracts("validate")?;
        let summary = validate_contracts(validator, &contracts);
        self.audit.record(&AuditEvent::validation_completed(&summary));
        Ok(summary)
    }

    /// Commits a change set to the graph.
    ///
    /// The change set must have been computed from the current registry and
    /// graph; it is re-checked against live state and never re-derived.
    ///
    /// An empty change set is a no-op commit. The revision is a hash of the
    /// module list, so it does not move and replaying the same empty set
    /// succeeds for as long as the graph is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::Conflict`] when the graph moved since the diff
    /// was computed or a record no longer matches live state, and
    /// [`ReconcileError::SourceUnavailable`] when a source cannot be read.
    pub fn apply(&self, change_set: &ChangeSet) -> Result<ApplyResult, ReconcileError> {
        let snapshot = self.load_snapshot("apply")?;
        let contracts = self.load_contracts("apply")?;
        let plan = plan_commit(change_set, &contracts, &snapshot).map_err(|conflict| {
            self.audit.record(&AuditEvent::apply_rejected(conflict.to_string()));
            ReconcileError::Conflict(conflict)
        })?;
        let revision = self.graph.commit(&plan.commit).map_err(|err| {
            self.audit.record(&AuditEvent::apply_rejected(err.to_string()));
            ReconcileError::from(err)
        })?;
        let result = ApplyResult {
            message: plan.describe(change_set),
            modules_processed: plan.modules_processed,
            parts_processed: plan.parts_processed,
            revision,
        };
        self.audit.record(&AuditEvent::apply_committed(&result));
        Ok(result)
    }

    /// Reads the registry, auditing failures.
    fn load_contracts(&self, operation: &'static str) -> Result<Vec<ContractFile>, ReconcileError> {
        self.registry.list_contracts().map_err(|err| {
            self.audit.record(&AuditEvent::source_failed(operation, err.to_string()));
            ReconcileError::from(err)
        })
    }

    /// Reads a graph snapshot, auditing failures.
    fn load_snapshot(&self, operation: &'static str) -> Result<GraphSnapshot, ReconcileError> {
        self.graph.snapshot().map_err(|err| {
            self.audit.record(&AuditEvent::source_failed(operation, err.to_string()));
            ReconcileError::from(err)
        })
    }
}
