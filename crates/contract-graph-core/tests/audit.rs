// crates/contract-graph-core/tests/audit.rs
// ============================================================================
// Module: Audit Sink Tests
// Description: Tests for JSON-lines audit output.
// Purpose: Validate audit event serialization and file sink behavior.
// Dependencies: contract-graph-core, serde_json, tempfile
// ============================================================================
//! ## Overview
//! Drives a reconciler with a file-backed audit sink and checks that each
//! entry point writes one tagged JSON record.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::missing_docs_in_private_items,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use std::sync::Arc;

use common::contract;
use contract_graph_core::InMemoryContractRegistry;
use contract_graph_core::InMemoryGraphStore;
use contract_graph_core::JsonlAuditSink;
use contract_graph_core::ModuleId;
use contract_graph_core::Reconciler;
use contract_graph_core::StructuralValidator;
use serde_json::Value;

/// Verifies each entry point appends one tagged JSON line.
#[test]
fn jsonl_sink_appends_tagged_events() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("audit.jsonl");
    let sink = Arc::new(JsonlAuditSink::new(&path).unwrap());
    let reconciler = Reconciler::new(
        InMemoryContractRegistry::new(vec![contract("/a.yml", "A", &[("p", "fn")])]),
        InMemoryGraphStore::new(),
    )
    .with_audit(sink);

    let change_set = reconciler.detect_changes().unwrap();
    reconciler.validate(&StructuralValidator).unwrap();
    reconciler.apply(&change_set).unwrap();
    reconciler.relations(&ModuleId::new("A")).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let events: Vec<Value> =
        contents.lines().map(|line| serde_json::from_str(line).unwrap()).collect();
    let tags: Vec<_> = events.iter().map(|event| event["event"].as_str().unwrap()).collect();
    assert_eq!(
        tags,
        vec!["changes_detected", "validation_completed", "apply_committed", "relations_assembled"]
    );
    assert_eq!(events[0]["added"], 1);
    assert_eq!(events[2]["parts_processed"], 1);
    assert_eq!(events[3]["module_id"], "A");
}

/// Verifies reopening the sink appends rather than truncates.
#[test]
fn jsonl_sink_appends_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("audit.jsonl");

    for _ in 0 .. 2 {
        let sink = Arc::new(JsonlAuditSink::new(&path).unwrap());
        let reconciler =
            Reconciler::new(InMemoryContractRegistry::default(), InMemoryGraphStore::new())
                .with_audit(sink);
        reconciler.detect_changes().unwrap();
    }

    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 2);
}
