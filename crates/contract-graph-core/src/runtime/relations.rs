// crates/contract-graph-core/src/runtime/relations.rs
// ============================================================================
// Module: Relation Assembler
// Description: Builds outgoing and incoming dependency views from the graph.
// Purpose: Support per-module navigation over persisted dependency data.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Relations describe the persisted graph, not the live registry, so
//! unapplied registry edits never show up here. The assembler reproduces the
//! stored data exactly: asymmetric or dangling references are surfaced as-is,
//! and [`audit_relations`] reports them separately for tooling that cares.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::DependencyEdge;
use crate::core::GraphSnapshot;
use crate::core::ModuleId;
use crate::core::RelationIssue;
use crate::core::RelationView;

// ============================================================================
// SECTION: Assembly
// ============================================================================

/// Assembles the relation view for a module.
///
/// A module absent from the snapshot yields an empty view rather than an
/// error, since it may be known only from the registry.
#[must_use]
pub fn assemble_relations(module_id: &ModuleId, snapshot: &GraphSnapshot) -> RelationView {
    let Some(subject) = snapshot.module(module_id) else {
        return RelationView::empty(module_id.clone());
    };

    let outgoing = subject
        .dependencies
        .iter()
        .map(|dependency| DependencyEdge {
            module_id: dependency.module_id.clone(),
            parts: dependency.parts.clone(),
        })
        .collect();

    let mut incoming: Vec<DependencyEdge> = snapshot
        .modules()
        .iter()
        .flat_map(|consumer| {
            consumer
                .dependencies
                .iter()
                .filter(move |dependency| &dependency.module_id == module_id)
                .map(move |dependency| DependencyEdge {
                    module_id: consumer.id.clone(),
                    parts: dependency.parts.clone(),
                })
        })
        .collect();
    incoming.sort_by(|a, b| a.module_id.cmp(&b.module_id));

    RelationView {
        module_id: module_id.clone(),
        outgoing,
        incoming,
    }
}

// ============================================================================
// SECTION: Data Quality
// ============================================================================

/// Reports dependency references that do not resolve against the snapshot.
#[must_use]
pub fn audit_relations(snapshot: &GraphSnapshot) -> Vec<RelationIssue> {
    let mut issues = Vec::new();
    for consumer in snapshot.modules() {
        for dependency in &consumer.dependencies {
            let Some(provider) = snapshot.module(&dependency.module_id) else {
                issues.push(RelationIssue::MissingModule {
                    from: consumer.id.clone(),
                    to: dependency.module_id.clone(),
                });
                continue;
            };
            for part_ref in &dependency.parts {
                match provider.parts.iter().find(|part| part.id == part_ref.part_id) {
                    None => issues.push(RelationIssue::MissingPart {
                        from: consumer.id.clone(),
                        to: provider.id.clone(),
                        part_id: part_ref.part_id.clone(),
                    }),
                    Some(part) if part.part_type != part_ref.part_type => {
                        issues.push(RelationIssue::PartTypeMismatch {
                            from: consumer.id.clone(),
                            to: provider.id.clone(),
                            part_id: part_ref.part_id.clone(),
                            declared: part_ref.part_type.clone(),
                            actual: part.part_type.clone(),
                        });
                    }
                    Some(_) => {}
                }
            }
        }
    }
    issues
}
