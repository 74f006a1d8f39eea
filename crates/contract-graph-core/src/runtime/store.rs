// crates/contract-graph-core/src/runtime/store.rs
// ============================================================================
// Module: In-Memory Collaborators
// Description: In-memory contract registry and graph store.
// Purpose: Provide deterministic collaborators for tests and local demos.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! These implementations back the [`ContractRegistry`] and [`GraphStore`]
//! interfaces with mutex-guarded vectors. The graph store enforces the same
//! revision check a production store must perform on commit.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;

use crate::core::ContractFile;
use crate::core::FilePath;
use crate::core::GraphCommit;
use crate::core::GraphModule;
use crate::core::GraphRevision;
use crate::core::GraphSnapshot;
use crate::core::ModuleId;
use crate::interfaces::ContractRegistry;
use crate::interfaces::GraphStore;
use crate::interfaces::GraphStoreError;
use crate::interfaces::RegistryError;

// ============================================================================
// SECTION: In-Memory Registry
// ============================================================================

/// In-memory contract registry for tests and examples.
#[derive(Debug, Default, Clone)]
pub struct InMemoryContractRegistry {
    /// Contract list protected by a mutex.
    contracts: Arc<Mutex<Vec<ContractFile>>>,
}

impl InMemoryContractRegistry {
    /// Creates a registry holding the given contracts.
    #[must_use]
    pub fn new(contracts: Vec<ContractFile>) -> Self {
        Self {
            contracts: Arc::new(Mutex::new(contracts)),
        }
    }

    /// Inserts a contract, replacing any contract with the same path.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unavailable`] when the registry lock is poisoned.
    pub fn upsert(&self, file: ContractFile) -> Result<(), RegistryError> {
        let mut guard = self
            .contracts
            .lock()
            .map_err(|_| RegistryError::Unavailable("registry mutex poisoned".to_string()))?;
        guard.retain(|existing| existing.file_path != file.file_path);
        guard.push(file);
        drop(guard);
        Ok(())
    }

    /// Removes the contract at a path, returning whether one was present.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Unavailable`] when the registry lock is poisoned.
    pub fn remove(&self, file_path: &FilePath) -> Result<bool, RegistryError> {
        let mut guard = self
            .contracts
            .lock()
            .map_err(|_| RegistryError::Unavailable("registry mutex poisoned".to_string()))?;
        let before = guard.len();
        guard.retain(|existing| &existing.file_path != file_path);
        let removed = guard.len() != before;
        drop(guard);
        Ok(removed)
    }
}

impl ContractRegistry for InMemoryContractRegistry {
    fn list_contracts(&self) -> Result<Vec<ContractFile>, RegistryError> {
        let guard = self
            .contracts
            .lock()
            .map_err(|_| RegistryError::Unavailable("registry mutex poisoned".to_string()))?;
        Ok(guard.clone())
    }
}

// ============================================================================
// SECTION: In-Memory Graph Store
// ============================================================================

/// In-memory graph store for tests and examples.
#[derive(Debug, Default, Clone)]
pub struct InMemoryGraphStore {
    /// Module list protected by a mutex.
    modules: Arc<Mutex<Vec<GraphModule>>>,
}

impl InMemoryGraphStore {
    /// Creates an empty graph store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a graph store seeded with modules.
    #[must_use]
    pub fn with_modules(modules: Vec<GraphModule>) -> Self {
        Self {
            modules: Arc::new(Mutex::new(modules)),
        }
    }

    /// Returns a copy of the stored modules.
    fn read(&self) -> Result<Vec<GraphModule>, GraphStoreError> {
        let guard = self
            .modules
            .lock()
            .map_err(|_| GraphStoreError::Unavailable("graph store mutex poisoned".to_string()))?;
        Ok(guard.clone())
    }
}

impl GraphStore for InMemoryGraphStore {
    fn snapshot(&self) -> Result<GraphSnapshot, GraphStoreError> {
        GraphSnapshot::from_modules(self.read()?)
            .map_err(|err| GraphStoreError::Corrupt(err.to_string()))
    }

    fn get_module(&self, module_id: &ModuleId) -> Result<Option<GraphModule>, GraphStoreError> {
        Ok(self.read()?.into_iter().find(|module| &module.id == module_id))
    }

    fn module_id_by_path(
        &self,
        file_path: &FilePath,
    ) -> Result<Option<ModuleId>, GraphStoreError> {
        Ok(self
            .read()?
            .into_iter()
            .find(|module| &module.source_path == file_path)
            .map(|module| module.id))
    }

    fn commit(&self, commit: &GraphCommit) -> Result<GraphRevision, GraphStoreError> {
        let mut guard = self
            .modules
            .lock()
            .map_err(|_| GraphStoreError::Unavailable("graph store mutex poisoned".to_string()))?;
        let actual = GraphRevision::of_modules(&guard)
            .map_err(|err| GraphStoreError::Corrupt(err.to_string()))?;
        if actual != commit.expected_revision {
            return Err(GraphStoreError::StaleRevision {
                expected: commit.expected_revision.clone(),
                actual,
            });
        }
        let next = commit.apply_to(guard.clone());
        let revision = GraphRevision::of_modules(&next)
            .map_err(|err| GraphStoreError::Corrupt(err.to_string()))?;
        *guard = next;
        drop(guard);
        Ok(revision)
    }
}
