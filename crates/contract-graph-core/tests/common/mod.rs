// crates/contract-graph-core/tests/common/mod.rs
// =============================================================================
// Module: Core Test Helpers
// Description: Shared fixtures for contract graph core tests.
// Purpose: Reduce duplication across integration tests for contract-graph-core.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]
#![allow(
    clippy::expect_used,
    clippy::missing_docs_in_private_items,
    reason = "Test-only fixtures use panic-based assertions for clarity."
)]

use std::sync::Mutex;

use contract_graph_core::AuditEvent;
use contract_graph_core::AuditSink;
use contract_graph_core::ContractContent;
use contract_graph_core::ContractFile;
use contract_graph_core::ContractRegistry;
use contract_graph_core::FilePath;
use contract_graph_core::GraphCommit;
use contract_graph_core::GraphModule;
use contract_graph_core::GraphRevision;
use contract_graph_core::GraphSnapshot;
use contract_graph_core::GraphStore;
use contract_graph_core::GraphStoreError;
use contract_graph_core::ModuleDependency;
use contract_graph_core::ModuleId;
use contract_graph_core::Part;
use contract_graph_core::PartRef;
use contract_graph_core::RegistryError;

/// Dependency fixture: provider module id and consumed `(part, type)` pairs.
pub type DepDecl<'a> = (&'a str, &'a [(&'a str, &'a str)]);

/// Builds contract content with the given parts and dependencies.
pub fn content(id: &str, parts: &[(&str, &str)], deps: &[DepDecl<'_>]) -> ContractContent {
    ContractContent {
        id: ModuleId::new(id),
        module_type: "service".to_string(),
        category: "core".to_string(),
        description: format!("{id} module"),
        parts: parts.iter().map(|(part_id, kind)| Part::new(*part_id, *kind)).collect(),
        dependencies: deps
            .iter()
            .map(|(module_id, consumed)| {
                ModuleDependency::new(
                    *module_id,
                    consumed.iter().map(|(part_id, kind)| PartRef::new(*part_id, *kind)).collect(),
                )
            })
            .collect(),
    }
}

/// Builds a contract file without dependencies.
pub fn contract(path: &str, id: &str, parts: &[(&str, &str)]) -> ContractFile {
    ContractFile::new(path, content(id, parts, &[]))
}

/// Builds a contract file with dependencies.
pub fn contract_with_deps(
    path: &str,
    id: &str,
    parts: &[(&str, &str)],
    deps: &[DepDecl<'_>],
) -> ContractFile {
    ContractFile::new(path, content(id, parts, deps))
}

/// Builds the persisted module for a contract file.
pub fn module_of(file: &ContractFile) -> GraphModule {
    GraphModule::from_contract(file)
}

/// Builds a graph module with dependencies.
pub fn module(
    path: &str,
    id: &str,
    parts: &[(&str, &str)],
    deps: &[DepDecl<'_>],
) -> GraphModule {
    module_of(&contract_with_deps(path, id, parts, deps))
}

/// Builds a snapshot from modules.
pub fn snapshot(modules: Vec<GraphModule>) -> GraphSnapshot {
    GraphSnapshot::from_modules(modules).expect("snapshot")
}

/// Audit sink capturing events in memory.
#[derive(Default)]
pub struct RecordingAuditSink {
    pub events: Mutex<Vec<AuditEvent>>,
}

impl RecordingAuditSink {
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events.lock().expect("audit lock").clone()
    }
}

impl AuditSink for RecordingAuditSink {
    fn record(&self, event: &AuditEvent) {
        self.events.lock().expect("audit lock").push(event.clone());
    }
}

/// Registry that is never reachable.
pub struct UnavailableRegistry;

impl ContractRegistry for UnavailableRegistry {
    fn list_contracts(&self) -> Result<Vec<ContractFile>, RegistryError> {
        Err(RegistryError::Unavailable("registry offline".to_string()))
    }
}

/// Graph store that is never reachable.
pub struct UnavailableGraphStore;

impl GraphStore for UnavailableGraphStore {
    fn snapshot(&self) -> Result<GraphSnapshot, GraphStoreError> {
        Err(GraphStoreError::Unavailable("graph offline".to_string()))
    }

    fn get_module(&self, _module_id: &ModuleId) -> Result<Option<GraphModule>, GraphStoreError> {
        Err(GraphStoreError::Unavailable("graph offline".to_string()))
    }

    fn module_id_by_path(
        &self,
        _file_path: &FilePath,
    ) -> Result<Option<ModuleId>, GraphStoreError> {
        Err(GraphStoreError::Unavailable("graph offline".to_string()))
    }

    fn commit(&self, _commit: &GraphCommit) -> Result<GraphRevision, GraphStoreError> {
        Err(GraphStoreError::Unavailable("graph offline".to_string()))
    }
}
