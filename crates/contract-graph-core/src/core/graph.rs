// crates/contract-graph-core/src/core/graph.rs
// ============================================================================
// Module: Persisted Graph Types
// Description: Graph modules, revisions, snapshots, and commit payloads.
// Purpose: Model the previously applied module graph as read-only input.
// Dependencies: crate::core::{contract, hashing, identifiers}, serde
// ============================================================================

//! ## Overview
//! A [`GraphSnapshot`] is a consistent read of the persisted graph together
//! with its content revision. The core never mutates graph modules; changes
//! travel to the store as a [`GraphCommit`] guarded by the revision the diff
//! was computed against.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::contract::ContractFile;
use crate::core::contract::ModuleDependency;
use crate::core::contract::ModuleShape;
use crate::core::contract::Part;
use crate::core::hashing::HashError;
use crate::core::hashing::hash_canonical_json;
use crate::core::identifiers::FilePath;
use crate::core::identifiers::ModuleId;

// ============================================================================
// SECTION: Graph Module
// ============================================================================

/// Persisted counterpart of a contract module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphModule {
    /// Module identifier.
    pub id: ModuleId,
    /// Module category label.
    pub category: String,
    /// Module type label.
    #[serde(rename = "type")]
    pub module_type: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Exported parts as last applied.
    #[serde(default)]
    pub parts: Vec<Part>,
    /// Outgoing dependencies as last applied.
    #[serde(default)]
    pub dependencies: Vec<ModuleDependency>,
    /// Contract file path the module was applied from.
    pub source_path: FilePath,
}

impl GraphModule {
    /// Builds the persisted form of a registry contract.
    #[must_use]
    pub fn from_contract(file: &ContractFile) -> Self {
        let content = &file.content;
        Self {
            id: content.id.clone(),
            category: content.category.clone(),
            module_type: content.module_type.clone(),
            description: content.description.clone(),
            parts: content.parts.clone(),
            dependencies: content.dependencies.clone(),
            source_path: file.file_path.clone(),
        }
    }

    /// Returns the normalized comparison shape of this module.
    #[must_use]
    pub fn shape(&self) -> ModuleShape<'_> {
        ModuleShape::new(
            &self.id,
            &self.module_type,
            &self.category,
            &self.description,
            &self.parts,
            &self.dependencies,
        )
    }
}

// ============================================================================
// SECTION: Revision
// ============================================================================

/// Content revision of a persisted graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphRevision(String);

impl GraphRevision {
    /// Wraps an existing revision string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Computes the content revision of a module set.
    ///
    /// The revision is independent of the order modules are listed in.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] when canonicalization fails.
    pub fn of_modules(modules: &[GraphModule]) -> Result<Self, HashError> {
        let mut ordered: Vec<&GraphModule> = modules.iter().collect();
        ordered.sort_by(|a, b| (&a.source_path, &a.id).cmp(&(&b.source_path, &b.id)));
        let digest = hash_canonical_json(&ordered)?;
        Ok(Self(digest.as_str().to_string()))
    }

    /// Returns the revision as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GraphRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SECTION: Snapshot
// ============================================================================

/// Consistent read of the persisted graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphSnapshot {
    /// Revision of the captured content.
    revision: GraphRevision,
    /// Modules ordered by source path.
    modules: Vec<GraphModule>,
}

impl GraphSnapshot {
    /// Captures a snapshot from a module list, computing its revision.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] when the revision cannot be computed.
    pub fn from_modules(mut modules: Vec<GraphModule>) -> Result<Self, HashError> {
        let revision = GraphRevision::of_modules(&modules)?;
        modules.sort_by(|a, b| (&a.source_path, &a.id).cmp(&(&b.source_path, &b.id)));
        Ok(Self {
            revision,
            modules,
        })
    }

    /// Returns an empty snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`HashError`] when the revision cannot be computed.
    pub fn empty() -> Result<Self, HashError> {
        Self::from_modules(Vec::new())
    }

    /// Returns the snapshot revision.
    #[must_use]
    pub const fn revision(&self) -> &GraphRevision {
        &self.revision
    }

    /// Returns all modules ordered by source path.
    #[must_use]
    pub fn modules(&self) -> &[GraphModule] {
        &self.modules
    }

    /// Consumes the snapshot and returns its modules.
    #[must_use]
    pub fn into_modules(self) -> Vec<GraphModule> {
        self.modules
    }

    /// Looks up a module by identifier.
    #[must_use]
    pub fn module(&self, module_id: &ModuleId) -> Option<&GraphModule> {
        self.modules.iter().find(|module| &module.id == module_id)
    }

    /// Looks up the module applied from a file path.
    #[must_use]
    pub fn module_by_path(&self, file_path: &FilePath) -> Option<&GraphModule> {
        self.modules.iter().find(|module| &module.source_path == file_path)
    }

    /// Iterates every module applied from a file path.
    pub fn modules_by_path<'a>(
        &'a self,
        file_path: &'a FilePath,
    ) -> impl Iterator<Item = &'a GraphModule> + 'a {
        self.modules.iter().filter(move |module| &module.source_path == file_path)
    }
}

// ============================================================================
// SECTION: Commit
// ============================================================================

/// Change set payload handed to a graph store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphCommit {
    /// Revision the commit was prepared against.
    pub expected_revision: GraphRevision,
    /// Modules to insert or replace, keyed by source path.
    pub upserts: Vec<GraphModule>,
    /// Source paths whose modules are deleted.
    pub removals: Vec<FilePath>,
}

impl GraphCommit {
    /// Returns the module set produced by applying this commit to `modules`.
    ///
    /// Upserts replace any module sharing their source path.
    #[must_use]
    pub fn apply_to(&self, modules: Vec<GraphModule>) -> Vec<GraphModule> {
        let replaced: BTreeSet<&FilePath> = self
            .removals
            .iter()
            .chain(self.upserts.iter().map(|module| &module.source_path))
            .collect();
        let mut next: Vec<GraphModule> =
            modules.into_iter().filter(|module| !replaced.contains(&module.source_path)).collect();
        next.extend(self.upserts.iter().cloned());
        next
    }
}
