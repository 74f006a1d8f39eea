//! Change detector property-based tests.
//!
//! ## Purpose
//! These tests drive the detector and apply planner with randomized registry
//! and graph contents to show classification is total and apply converges.
//!
//! ## What is covered
//! - Every differing path is classified exactly once; identical paths are omitted.
//! - Applying a fresh change set leaves nothing to detect.
//! - Detection is independent of registry ordering.
// crates/contract-graph-core/tests/proptest_detector.rs
// ============================================================================
// Module: Change Detector Property-Based Tests
// Description: Randomized checks for classification and apply convergence.
// Purpose: Ensure detection is exhaustive and apply reaches a fixed point.
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    clippy::missing_docs_in_private_items,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use contract_graph_core::ChangeStatus;
use contract_graph_core::ContractFile;
use contract_graph_core::GraphModule;
use contract_graph_core::GraphSnapshot;
use contract_graph_core::detect_changes;
use contract_graph_core::plan_commit;
use proptest::prelude::*;

mod common;
use crate::common::content;

/// Generated module: id index and `(part index, type index)` pairs.
type ModuleSeed = (usize, Vec<(usize, usize)>);

const PART_TYPES: [&str; 2] = ["fn", "event"];

fn seeds() -> impl Strategy<Value = BTreeMap<usize, ModuleSeed>> {
    prop::collection::btree_map(
        0usize .. 6,
        (0usize .. 3, prop::collection::vec((0usize .. 3, 0usize .. 2), 0 .. 3)),
        0 .. 6,
    )
}

fn contract_of(path_index: usize, seed: &ModuleSeed) -> ContractFile {
    let (id_index, parts) = seed;
    let parts: Vec<(String, &str)> = parts
        .iter()
        .map(|(part_index, type_index)| (format!("p{part_index}"), PART_TYPES[*type_index]))
        .collect();
    let borrowed: Vec<(&str, &str)> = parts.iter().map(|(id, kind)| (id.as_str(), *kind)).collect();
    ContractFile::new(format!("/m{path_index}.yml"), content(&format!("M{id_index}"), &borrowed, &[]))
}

fn contracts(seeds: &BTreeMap<usize, ModuleSeed>) -> Vec<ContractFile> {
    seeds.iter().map(|(index, seed)| contract_of(*index, seed)).collect()
}

fn graph(seeds: &BTreeMap<usize, ModuleSeed>) -> GraphSnapshot {
    let modules: Vec<GraphModule> =
        contracts(seeds).iter().map(GraphModule::from_contract).collect();
    GraphSnapshot::from_modules(modules).unwrap()
}

proptest! {
    #[test]
    fn classification_is_exhaustive_and_exclusive(
        registry_seeds in seeds(),
        graph_seeds in seeds(),
    ) {
        let registry = contracts(&registry_seeds);
        let snapshot = graph(&graph_seeds);
        let change_set = detect_changes(&registry, &snapshot);

        let mut seen = BTreeSet::new();
        for record in &change_set.records {
            prop_assert!(seen.insert(record.file_path.clone()));
        }
        let union: BTreeSet<usize> =
            registry_seeds.keys().chain(graph_seeds.keys()).copied().collect();
        for index in union {
            let path = format!("/m{index}.yml");
            let record = change_set.record(&path.as_str().into());
            let expected = match (registry_seeds.get(&index), graph_seeds.get(&index)) {
                (Some(_), None) => Some(ChangeStatus::Added),
                (None, Some(_)) => Some(ChangeStatus::Removed),
                (Some(current), Some(persisted)) => {
                    let current = contract_of(index, current);
                    let persisted = contract_of(index, persisted);
                    (current.content.shape() != persisted.content.shape())
                        .then_some(ChangeStatus::Modified)
                }
                (None, None) => None,
            };
            prop_assert_eq!(record.map(|record| record.status), expected);
        }
    }

    #[test]
    fn apply_reaches_fixed_point(registry_seeds in seeds(), graph_seeds in seeds()) {
        let registry = contracts(&registry_seeds);
        let snapshot = graph(&graph_seeds);
        let change_set = detect_changes(&registry, &snapshot);

        let plan = plan_commit(&change_set, &registry, &snapshot).unwrap();
        let next = GraphSnapshot::from_modules(plan.commit.apply_to(snapshot.into_modules())).unwrap();

        prop_assert!(detect_changes(&registry, &next).is_empty());
        prop_assert!(plan.modules_processed <= change_set.records.len());
    }

    #[test]
    fn registry_order_does_not_matter(registry_seeds in seeds(), graph_seeds in seeds()) {
        let registry = contracts(&registry_seeds);
        let mut reversed = registry.clone();
        reversed.reverse();
        let snapshot = graph(&graph_seeds);

        prop_assert_eq!(
            detect_changes(&registry, &snapshot).records,
            detect_changes(&reversed, &snapshot).records
        );
    }
}
