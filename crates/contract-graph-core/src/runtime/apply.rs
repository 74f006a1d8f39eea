// crates/contract-graph-core/src/runtime/apply.rs
// ============================================================================
// Module: Apply Planning
// Description: Re-validates a change set against live state and builds a commit.
// Purpose: Enforce the optimistic-concurrency preconditions of apply.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! The caller-supplied change set is trusted as the intended change, but it
//! is checked against the live graph before anything is committed:
//! - The live revision must equal the revision the diff was computed against.
//! - Added paths must be absent from the graph; modified and removed paths
//!   must be present.
//! - Added and modified contracts must still exist in the registry.
//!
//! Any violation is an [`ApplyConflict`]. A successfully applied non-empty
//! change set moves the graph revision, so replaying it conflicts. An empty
//! change set leaves the revision where it was and replays as a no-op.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::core::ApplyConflict;
use crate::core::ChangeSet;
use crate::core::ChangeStatus;
use crate::core::ContractFile;
use crate::core::GraphCommit;
use crate::core::GraphModule;
use crate::core::GraphSnapshot;
use crate::core::ModuleId;
use crate::runtime::detector::index_registry;

// ============================================================================
// SECTION: Commit Plan
// ============================================================================

/// Commit payload together with the counts reported after it lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitPlan {
    /// Commit handed to the graph store.
    pub commit: GraphCommit,
    /// Distinct modules touched by the commit.
    pub modules_processed: usize,
    /// Parts across the touched modules.
    pub parts_processed: usize,
}

impl CommitPlan {
    /// Returns a one-line description of the planned commit.
    #[must_use]
    pub fn describe(&self, change_set: &ChangeSet) -> String {
        format!(
            "applied {} change(s): {} added, {} modified, {} removed",
            change_set.records.len(),
            change_set.count(ChangeStatus::Added),
            change_set.count(ChangeStatus::Modified),
            change_set.count(ChangeStatus::Removed)
        )
    }
}

/// Checks a change set against live snapshots and builds the commit.
///
/// Removed modules count their persisted parts; added and modified modules
/// count the parts of their current registry contract. When a path holds more
/// than one persisted module, every module the commit replaces or removes is
/// counted with its persisted parts. A module id touched by more than one
/// record is counted once.
///
/// # Errors
///
/// Returns [`ApplyConflict`] when any precondition fails.
pub fn plan_commit(
    change_set: &ChangeSet,
    registry: &[ContractFile],
    live: &GraphSnapshot,
) -> Result<CommitPlan, ApplyConflict> {
    if live.revision() != &change_set.base_revision {
        return Err(ApplyConflict::StaleRevision {
            expected: change_set.base_revision.clone(),
            actual: live.revision().clone(),
        });
    }
    let (contracts, _) = index_registry(registry);

    let mut upserts = Vec::new();
    let mut removals = Vec::new();
    let mut touched: BTreeMap<&ModuleId, usize> = BTreeMap::new();
    for record in &change_set.records {
        let file_path = &record.file_path;
        let applied = live.module_by_path(file_path);
        match record.status {
            ChangeStatus::Added | ChangeStatus::Modified => {
                match (record.status, applied) {
                    (ChangeStatus::Added, Some(_)) => {
                        return Err(ApplyConflict::AlreadyApplied {
                            file_path: file_path.clone(),
                        });
                    }
                    (ChangeStatus::Modified, None) => {
                        return Err(ApplyConflict::NotApplied {
                            file_path: file_path.clone(),
                        });
                    }
                    _ => {}
                }
                let Some(file) = contracts.get(file_path) else {
                    return Err(ApplyConflict::ContractMissing {
                        file_path: file_path.clone(),
                    });
                };
                touched.entry(&file.content.id).or_insert(file.content.parts.len());
                for replaced in live.modules_by_path(file_path) {
                    touched.entry(&replaced.id).or_insert(replaced.parts.len());
                }
                upserts.push(GraphModule::from_contract(file));
            }
            ChangeStatus::Removed => {
                if applied.is_none() {
                    return Err(ApplyConflict::NotApplied {
                        file_path: file_path.clone(),
                    });
                }
                for module in live.modules_by_path(file_path) {
                    touched.entry(&module.id).or_insert(module.parts.len());
                }
                removals.push(file_path.clone());
            }
        }
    }

    Ok(CommitPlan {
        modules_processed: touched.len(),
        parts_processed: touched.values().sum(),
        commit: GraphCommit {
            expected_revision: change_set.base_revision.clone(),
            upserts,
            removals,
        },
    })
}
