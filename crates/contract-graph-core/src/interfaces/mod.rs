// crates/contract-graph-core/src/interfaces/mod.rs
// ============================================================================
// Module: Contract Graph Interfaces
// Description: Backend-agnostic interfaces for registry, graph store, and validation.
// Purpose: Define the collaborator surfaces consumed by the reconciliation core.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Interfaces describe how the core reaches the contract registry, the
//! persisted graph, and the structural validator without embedding backend
//! details. Implementations must fail closed: an unreachable source is an
//! error, never an empty result.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::ContractFile;
use crate::core::FilePath;
use crate::core::GraphCommit;
use crate::core::GraphModule;
use crate::core::GraphRevision;
use crate::core::GraphSnapshot;
use crate::core::ModuleId;
use crate::core::ValidationOutcome;

// ============================================================================
// SECTION: Contract Registry
// ============================================================================

/// Contract registry errors.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Registry source could not be reached or read.
    #[error("contract registry unavailable: {0}")]
    Unavailable(String),
    /// Registry content exceeds limits or is otherwise unusable as a whole.
    #[error("contract registry invalid: {0}")]
    Invalid(String),
}

/// Source of the current contract definitions.
pub trait ContractRegistry {
    /// Lists every currently-known contract file.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] when the registry cannot be read.
    fn list_contracts(&self) -> Result<Vec<ContractFile>, RegistryError>;
}

// ============================================================================
// SECTION: Graph Store
// ============================================================================

/// Graph store errors.
#[derive(Debug, Error)]
pub enum GraphStoreError {
    /// Store could not be reached.
    #[error("graph store unavailable: {0}")]
    Unavailable(String),
    /// Store data is corrupted or fails integrity checks.
    #[error("graph store corruption: {0}")]
    Corrupt(String),
    /// Commit was prepared against an outdated revision.
    #[error("graph store revision mismatch (expected {expected}, found {actual})")]
    StaleRevision {
        /// Revision named by the commit.
        expected: GraphRevision,
        /// Current revision of the store.
        actual: GraphRevision,
    },
    /// Store refused the commit for another reason.
    #[error("graph store conflict: {0}")]
    Conflict(String),
}

/// Read and commit access to the persisted module graph.
pub trait GraphStore {
    /// Returns a consistent snapshot of all modules with its revision.
    ///
    /// # Errors
    ///
    /// Returns [`GraphStoreError`] when the graph cannot be read.
    fn snapshot(&self) -> Result<GraphSnapshot, GraphStoreError>;

    /// Lists all persisted modules.
    ///
    /// # Errors
    ///
    /// Returns [`GraphStoreError`] when the graph cannot be read.
    fn list_modules(&self) -> Result<Vec<GraphModule>, GraphStoreError> {
        Ok(self.snapshot()?.into_modules())
    }

    /// Loads a module by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`GraphStoreError`] when the graph cannot be read.
    fn get_module(&self, module_id: &ModuleId) -> Result<Option<GraphModule>, GraphStoreError>;

    /// Resolves the module applied from a contract path.
    ///
    /// # Errors
    ///
    /// Returns [`GraphStoreError`] when the graph cannot be read.
    fn module_id_by_path(&self, file_path: &FilePath)
    -> Result<Option<ModuleId>, GraphStoreError>;

    /// Commits a change set atomically, returning the new revision.
    ///
    /// Implementations must reject the commit with
    /// [`GraphStoreError::StaleRevision`] when the current revision differs
    /// from [`GraphCommit::expected_revision`].
    ///
    /// # Errors
    ///
    /// Returns [`GraphStoreError`] when the commit is rejected or fails.
    fn commit(&self, commit: &GraphCommit) -> Result<GraphRevision, GraphStoreError>;
}

// ============================================================================
// SECTION: Contract Validator
// ============================================================================

/// Structural validator invoked once per contract file.
///
/// Failures are reported as data in the returned outcome, never as errors.
pub trait ContractValidator {
    /// Validates a single contract file.
    fn validate_file(&self, file: &ContractFile) -> ValidationOutcome;
}
