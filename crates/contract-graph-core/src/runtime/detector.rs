// crates/contract-graph-core/src/runtime/detector.rs
// ============================================================================
// Module: Change Detector
// Description: Classifies registry contracts against the persisted graph.
// Purpose: Produce the added/modified/removed diff for a snapshot pair.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Detection is a pure function of a registry snapshot and a graph snapshot.
//! Contracts are correlated with persisted modules by file path (the graph
//! records the path each module was applied from), so every path in the
//! union lands in exactly one of added, modified, removed, or unchanged.
//! Unchanged contracts are omitted from the result.
//!
//! Duplicate module ids and duplicate file paths in the registry are tolerated
//! and reported as [`RegistryAnomaly`] values. A graph path holding more than
//! one module is reported as well and classified as modified, so that apply
//! collapses it back to a single module.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::collections::btree_map::Entry;

use crate::core::ChangeRecord;
use crate::core::ChangeSet;
use crate::core::ChangeStatus;
use crate::core::ContractFile;
use crate::core::FilePath;
use crate::core::GraphModule;
use crate::core::GraphSnapshot;
use crate::core::ModuleId;
use crate::core::RegistryAnomaly;

// ============================================================================
// SECTION: Detection
// ============================================================================

/// Computes the change set between a registry snapshot and a graph snapshot.
#[must_use]
pub fn detect_changes(registry: &[ContractFile], graph: &GraphSnapshot) -> ChangeSet {
    let (contracts, mut anomalies) = index_registry(registry);
    anomalies.extend(duplicate_module_ids(&contracts));

    let mut applied: BTreeMap<&FilePath, Vec<&GraphModule>> = BTreeMap::new();
    for module in graph.modules() {
        applied.entry(&module.source_path).or_default().push(module);
    }
    anomalies.extend(duplicate_source_paths(&applied));

    let mut records = Vec::new();
    for (file_path, file) in &contracts {
        let status = match applied.get(file_path).map(Vec::as_slice) {
            None | Some([]) => Some(ChangeStatus::Added),
            Some([module]) if file.content.shape() == module.shape() => None,
            Some(_) => Some(ChangeStatus::Modified),
        };
        if let Some(status) = status {
            records.push(ChangeRecord {
                file_path: (*file_path).clone(),
                status,
                module_id: file.content.id.clone(),
            });
        }
    }
    for (file_path, modules) in &applied {
        let Some(module) = modules.first() else {
            continue;
        };
        if !contracts.contains_key(file_path) {
            records.push(ChangeRecord {
                file_path: (*file_path).clone(),
                status: ChangeStatus::Removed,
                module_id: module.id.clone(),
            });
        }
    }
    records.sort();

    ChangeSet {
        base_revision: graph.revision().clone(),
        records,
        anomalies,
    }
}

/// Indexes registry files by path, keeping the first occurrence of each path.
pub(crate) fn index_registry(
    registry: &[ContractFile],
) -> (BTreeMap<&FilePath, &ContractFile>, Vec<RegistryAnomaly>) {
    let mut contracts: BTreeMap<&FilePath, &ContractFile> = BTreeMap::new();
    let mut repeated: BTreeSet<&FilePath> = BTreeSet::new();
    for file in registry {
        match contracts.entry(&file.file_path) {
            Entry::Vacant(slot) => {
                slot.insert(file);
            }
            Entry::Occupied(_) => {
                repeated.insert(&file.file_path);
            }
        }
    }
    let anomalies = repeated
        .into_iter()
        .map(|file_path| RegistryAnomaly::DuplicateFilePath {
            file_path: file_path.clone(),
        })
        .collect();
    (contracts, anomalies)
}

/// Reports module ids declared by more than one contract file.
fn duplicate_module_ids(contracts: &BTreeMap<&FilePath, &ContractFile>) -> Vec<RegistryAnomaly> {
    let mut by_module: BTreeMap<&ModuleId, Vec<FilePath>> = BTreeMap::new();
    for (file_path, file) in contracts {
        by_module.entry(&file.content.id).or_default().push((*file_path).clone());
    }
    by_module
        .into_iter()
        .filter(|(_, file_paths)| file_paths.len() > 1)
        .map(|(module_id, file_paths)| RegistryAnomaly::DuplicateModuleId {
            module_id: module_id.clone(),
            file_paths,
        })
        .collect()
}

/// Reports graph paths that more than one persisted module was applied from.
fn duplicate_source_paths(
    applied: &BTreeMap<&FilePath, Vec<&GraphModule>>,
) -> Vec<RegistryAnomaly> {
    applied
        .iter()
        .filter(|(_, modules)| modules.len() > 1)
        .map(|(file_path, modules)| {
            let mut module_ids: Vec<ModuleId> =
                modules.iter().map(|module| module.id.clone()).collect();
            module_ids.sort();
            RegistryAnomaly::DuplicateSourcePath {
                file_path: (*file_path).clone(),
                module_ids,
            }
        })
        .collect()
}
