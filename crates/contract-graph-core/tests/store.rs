// crates/contract-graph-core/tests/store.rs
// ============================================================================
// Module: In-Memory Store Tests
// Description: Tests for the in-memory registry and graph store.
// Purpose: Validate revision checks and path-keyed commit semantics.
// Dependencies: contract-graph-core
// ============================================================================
//! ## Overview
//! Ensures the in-memory graph store behaves like a production store: commits
//! are keyed by source path and rejected when the expected revision is stale.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::missing_docs_in_private_items,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use common::contract;
use common::module;
use contract_graph_core::ContractRegistry;
use contract_graph_core::FilePath;
use contract_graph_core::GraphCommit;
use contract_graph_core::GraphRevision;
use contract_graph_core::GraphStore;
use contract_graph_core::GraphStoreError;
use contract_graph_core::InMemoryContractRegistry;
use contract_graph_core::InMemoryGraphStore;
use contract_graph_core::ModuleId;

/// Verifies the revision is independent of insertion order.
#[test]
fn revision_ignores_insertion_order() {
    let a = module("/a.yml", "A", &[], &[]);
    let b = module("/b.yml", "B", &[], &[]);

    let forward = InMemoryGraphStore::with_modules(vec![a.clone(), b.clone()]);
    let backward = InMemoryGraphStore::with_modules(vec![b, a]);

    assert_eq!(
        forward.snapshot().unwrap().revision(),
        backward.snapshot().unwrap().revision()
    );
}

/// Verifies commits replace modules by source path and move the revision.
#[test]
fn commit_upserts_by_source_path() {
    let store = InMemoryGraphStore::with_modules(vec![
        module("/a.yml", "A", &[("p", "fn")], &[]),
        module("/b.yml", "B", &[], &[]),
    ]);
    let before = store.snapshot().unwrap();

    let revision = store
        .commit(&GraphCommit {
            expected_revision: before.revision().clone(),
            upserts: vec![module("/a.yml", "Renamed", &[], &[])],
            removals: vec![FilePath::new("/b.yml")],
        })
        .unwrap();

    let after = store.snapshot().unwrap();
    assert_eq!(after.revision(), &revision);
    assert_ne!(before.revision(), &revision);
    assert_eq!(after.modules().len(), 1);
    assert_eq!(
        store.module_id_by_path(&FilePath::new("/a.yml")).unwrap(),
        Some(ModuleId::new("Renamed"))
    );
    assert!(store.get_module(&ModuleId::new("A")).unwrap().is_none());
}

/// Verifies a commit against a stale revision leaves the store untouched.
#[test]
fn stale_commit_is_rejected() {
    let store = InMemoryGraphStore::with_modules(vec![module("/a.yml", "A", &[], &[])]);

    let err = store
        .commit(&GraphCommit {
            expected_revision: GraphRevision::new("stale"),
            upserts: Vec::new(),
            removals: vec![FilePath::new("/a.yml")],
        })
        .unwrap_err();

    assert!(matches!(err, GraphStoreError::StaleRevision { .. }));
    assert_eq!(store.list_modules().unwrap().len(), 1);
}

/// Verifies registry upserts replace by path and removals report presence.
#[test]
fn registry_upsert_and_remove() {
    let registry = InMemoryContractRegistry::new(vec![contract("/a.yml", "A", &[])]);

    registry.upsert(contract("/a.yml", "A2", &[])).unwrap();
    registry.upsert(contract("/b.yml", "B", &[])).unwrap();
    let ids: Vec<_> = registry
        .list_contracts()
        .unwrap()
        .into_iter()
        .map(|file| file.content.id.to_string())
        .collect();
    assert_eq!(ids, vec!["A2", "B"]);

    assert!(registry.remove(&FilePath::new("/a.yml")).unwrap());
    assert!(!registry.remove(&FilePath::new("/a.yml")).unwrap());
}
