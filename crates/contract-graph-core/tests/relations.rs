// crates/contract-graph-core/tests/relations.rs
// ============================================================================
// Module: Relation Assembly Tests
// Description: Tests for outgoing and incoming dependency views.
// Purpose: Validate relation views reproduce persisted data exactly.
// Dependencies: contract-graph-core
// ============================================================================
//! ## Overview
//! Covers relation views for present and absent modules, the ordering of
//! incoming edges, dangling references, and the relation audit report.

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

use common::RecordingAuditSink;
use common::contract;
use common::contract_with_deps;
use common::module;
use common::snapshot;
use contract_graph_core::AuditEvent;
use contract_graph_core::DependencyEdge;
use contract_graph_core::InMemoryContractRegistry;
use contract_graph_core::InMemoryGraphStore;
use contract_graph_core::ModuleId;
use contract_graph_core::PartRef;
use contract_graph_core::ReconcileError;
use contract_graph_core::Reconciler;
use contract_graph_core::RelationIssue;
use contract_graph_core::assemble_relations;
use contract_graph_core::audit_relations;

fn edge(module_id: &str, parts: &[(&str, &str)]) -> DependencyEdge {
    DependencyEdge {
        module_id: ModuleId::new(module_id),
        parts: parts.iter().map(|(id, kind)| PartRef::new(*id, *kind)).collect(),
    }
}

/// Verifies a consumer shows up as an incoming edge on its provider.
#[test]
fn consumer_appears_as_incoming_edge() {
    let graph = snapshot(vec![
        module("/a.yml", "A", &[], &[("B", &[("p1", "fn")])]),
        module("/b.yml", "B", &[("p1", "fn")], &[]),
    ]);

    let provider = assemble_relations(&ModuleId::new("B"), &graph);
    assert!(provider.outgoing.is_empty());
    assert_eq!(provider.incoming, vec![edge("A", &[("p1", "fn")])]);

    let consumer = assemble_relations(&ModuleId::new("A"), &graph);
    assert_eq!(consumer.outgoing, vec![edge("B", &[("p1", "fn")])]);
    assert!(consumer.incoming.is_empty());
}

/// Verifies outgoing edges keep declared order and incoming edges sort by consumer.
#[test]
fn edge_ordering_is_deterministic() {
    let graph = snapshot(vec![
        module("/z.yml", "Z", &[], &[("Hub", &[("p", "fn")])]),
        module("/hub.yml", "Hub", &[("p", "fn")], &[("Y", &[("q", "fn")]), ("X", &[("r", "fn")])]),
        module("/c.yml", "C", &[], &[("Hub", &[("p", "fn")])]),
        module("/x.yml", "X", &[("r", "fn")], &[]),
        module("/y.yml", "Y", &[("q", "fn")], &[]),
    ]);

    let view = assemble_relations(&ModuleId::new("Hub"), &graph);

    let outgoing: Vec<_> = view.outgoing.iter().map(|edge| edge.module_id.as_str()).collect();
    assert_eq!(outgoing, vec!["Y", "X"]);
    let incoming: Vec<_> = view.incoming.iter().map(|edge| edge.module_id.as_str()).collect();
    assert_eq!(incoming, vec!["C", "Z"]);
}

/// Verifies an unknown module yields an empty view rather than an error.
#[test]
fn unknown_module_yields_empty_view() {
    let graph = snapshot(vec![module("/a.yml", "A", &[], &[("Ghost", &[("p", "fn")])])]);

    let view = assemble_relations(&ModuleId::new("Ghost"), &graph);

    assert!(view.is_empty());
    assert_eq!(view.module_id, ModuleId::new("Ghost"));
}

/// Verifies dangling references are reproduced as stored.
#[test]
fn dangling_references_are_surfaced() {
    let graph = snapshot(vec![
        module("/a.yml", "A", &[], &[("B", &[("missing", "fn")]), ("Nowhere", &[("p", "fn")])]),
        module("/b.yml", "B", &[("p1", "fn")], &[]),
    ]);

    let view = assemble_relations(&ModuleId::new("A"), &graph);

    assert_eq!(
        view.outgoing,
        vec![edge("B", &[("missing", "fn")]), edge("Nowhere", &[("p", "fn")])]
    );
}

/// Verifies the relation audit reports each class of unresolved reference.
#[test]
fn audit_reports_unresolved_references() {
    let graph = snapshot(vec![
        module(
            "/a.yml",
            "A",
            &[],
            &[("B", &[("p1", "event"), ("p2", "fn")]), ("Nowhere", &[("p", "fn")])],
        ),
        module("/b.yml", "B", &[("p1", "fn")], &[]),
    ]);

    let issues = audit_relations(&graph);

    assert_eq!(
        issues,
        vec![
            RelationIssue::PartTypeMismatch {
                from: ModuleId::new("A"),
                to: ModuleId::new("B"),
                part_id: "p1".into(),
                declared: "event".to_string(),
                actual: "fn".to_string(),
            },
            RelationIssue::MissingPart {
                from: ModuleId::new("A"),
                to: ModuleId::new("B"),
                part_id: "p2".into(),
            },
            RelationIssue::MissingModule {
                from: ModuleId::new("A"),
                to: ModuleId::new("Nowhere"),
            },
        ]
    );
}

/// Verifies a consistent graph produces no audit issues.
#[test]
fn consistent_graph_has_no_issues() {
    let graph = snapshot(vec![
        module("/a.yml", "A", &[], &[("B", &[("p1", "fn")])]),
        module("/b.yml", "B", &[("p1", "fn")], &[]),
    ]);

    assert!(audit_relations(&graph).is_empty());
}

/// Verifies relations read the persisted graph, not unapplied registry edits.
#[test]
fn relations_ignore_unapplied_registry_edits() {
    let audit = Arc::new(RecordingAuditSink::default());
    let reconciler = Reconciler::new(
        InMemoryContractRegistry::new(vec![
            contract("/a.yml", "A", &[]),
            contract("/b.yml", "B", &[("p1", "fn"), ("p2", "fn")]),
            contract_with_deps("/c.yml", "C", &[], &[("B", &[("p2", "fn")])]),
        ]),
        InMemoryGraphStore::with_modules(vec![
            module("/a.yml", "A", &[], &[("B", &[("p1", "fn")])]),
            module("/b.yml", "B", &[("p1", "fn")], &[]),
        ]),
    )
    .with_audit(audit.clone());

    let view = reconciler.relations(&ModuleId::new("B")).unwrap();
    let detail = reconciler.module_detail(&ModuleId::new("B")).unwrap();

    assert_eq!(view.incoming, vec![edge("A", &[("p1", "fn")])]);
    assert!(view.outgoing.is_empty());
    assert_eq!(detail.parts.len(), 1);
    assert!(matches!(
        audit.events().as_slice(),
        [AuditEvent::RelationsAssembled { incoming: 1, outgoing: 0, .. }]
    ));
}

/// Verifies module detail distinguishes absent modules from empty relations.
#[test]
fn module_detail_reports_not_found() {
    let reconciler = Reconciler::new(
        InMemoryContractRegistry::default(),
        InMemoryGraphStore::with_modules(vec![module("/a.yml", "A", &[("p", "fn")], &[])]),
    );

    let detail = reconciler.module_detail(&ModuleId::new("A")).unwrap();
    assert_eq!(detail.parts.len(), 1);

    let err = reconciler.module_detail(&ModuleId::new("B")).unwrap_err();
    assert!(matches!(err, ReconcileError::NotFound(_)));

    let view = reconciler.relations(&ModuleId::new("B")).unwrap();
    assert!(view.is_empty());
}

/// Verifies a contract path resolves to the module applied from it.
#[test]
fn module_for_path_resolves_applied_module() {
    let reconciler = Reconciler::new(
        InMemoryContractRegistry::default(),
        InMemoryGraphStore::with_modules(vec![module("/a.yml", "A", &[], &[])]),
    );

    assert_eq!(reconciler.module_for_path(&"/a.yml".into()).unwrap(), ModuleId::new("A"));
    assert!(matches!(
        reconciler.module_for_path(&"/b.yml".into()),
        Err(ReconcileError::NotFound(_))
    ));
}
