// crates/contract-graph-core/src/core/contract.rs
// ============================================================================
// Module: Contract Definitions
// Description: Typed contract content, parts, and dependency declarations.
// Purpose: Provide the explicit content schema shared by registry and graph.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A contract describes one module: its identity, classification, exported
//! parts, and the parts of other modules it consumes. Content is a closed
//! schema (`deny_unknown_fields`) so that loosely-typed documents are rejected
//! at the registry boundary instead of flowing downstream.
//!
//! Structural comparison goes through [`ModuleShape`], which normalizes part
//! and dependency ordering so that reordering alone never counts as a change.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::FilePath;
use crate::core::identifiers::ModuleId;
use crate::core::identifiers::PartId;

// ============================================================================
// SECTION: Parts
// ============================================================================

/// Exportable unit of a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Part {
    /// Part identifier, unique within the module.
    pub id: PartId,
    /// Part type label (for example `function` or `event`).
    #[serde(rename = "type")]
    pub part_type: String,
}

impl Part {
    /// Creates a new part.
    #[must_use]
    pub fn new(id: impl Into<PartId>, part_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            part_type: part_type.into(),
        }
    }
}

/// Reference to a part exported by another module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartRef {
    /// Referenced part identifier.
    pub part_id: PartId,
    /// Part type as recorded by the consumer.
    #[serde(rename = "type")]
    pub part_type: String,
}

impl PartRef {
    /// Creates a new part reference.
    #[must_use]
    pub fn new(part_id: impl Into<PartId>, part_type: impl Into<String>) -> Self {
        Self {
            part_id: part_id.into(),
            part_type: part_type.into(),
        }
    }
}

/// Declaration that a module consumes parts of another module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleDependency {
    /// Module providing the parts.
    pub module_id: ModuleId,
    /// Parts consumed from the providing module.
    #[serde(default)]
    pub parts: Vec<PartRef>,
}

impl ModuleDependency {
    /// Creates a new dependency declaration.
    #[must_use]
    pub fn new(module_id: impl Into<ModuleId>, parts: Vec<PartRef>) -> Self {
        Self {
            module_id: module_id.into(),
            parts,
        }
    }
}

// ============================================================================
// SECTION: Contract Content
// ============================================================================

/// Typed body of a contract file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContractContent {
    /// Module identifier.
    pub id: ModuleId,
    /// Module type label.
    #[serde(rename = "type")]
    pub module_type: String,
    /// Module category label.
    pub category: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
    /// Exported parts in declaration order.
    #[serde(default)]
    pub parts: Vec<Part>,
    /// Consumed parts of other modules.
    #[serde(default)]
    pub dependencies: Vec<ModuleDependency>,
}

impl ContractContent {
    /// Returns the normalized comparison shape of this content.
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

/// Contract file loaded from a registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractFile {
    /// Display file name.
    pub file_name: String,
    /// Unique file path key.
    pub file_path: FilePath,
    /// Parsed contract content.
    pub content: ContractContent,
}

impl ContractFile {
    /// Creates a contract file, deriving the file name from the final path segment.
    #[must_use]
    pub fn new(file_path: impl Into<FilePath>, content: ContractContent) -> Self {
        let file_path = file_path.into();
        let file_name = file_path
            .as_str()
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default()
            .to_string();
        Self {
            file_name,
            file_path,
            content,
        }
    }
}

// ============================================================================
// SECTION: Structural Shape
// ============================================================================

/// Sorted `(part id, type)` pairs.
type PartKeys<'a> = Vec<(&'a str, &'a str)>;

/// Order-insensitive view of module content used for change detection.
///
/// Parts compare by exact `(id, type)` membership; dependencies compare by
/// target module and consumed part membership.
#[derive(Debug, PartialEq, Eq)]
pub struct ModuleShape<'a> {
    /// Module identifier.
    id: &'a str,
    /// Module type label.
    module_type: &'a str,
    /// Module category label.
    category: &'a str,
    /// Module description.
    description: &'a str,
    /// Sorted exported parts.
    parts: PartKeys<'a>,
    /// Sorted dependency declarations.
    dependencies: Vec<(&'a str, PartKeys<'a>)>,
}

impl<'a> ModuleShape<'a> {
    /// Builds a normalized shape from borrowed module fields.
    #[must_use]
    pub fn new(
        id: &'a ModuleId,
        module_type: &'a str,
        category: &'a str,
        description: &'a str,
        parts: &'a [Part],
        dependencies: &'a [ModuleDependency],
    ) -> Self {
        let mut part_keys: PartKeys<'a> =
            parts.iter().map(|part| (part.id.as_str(), part.part_type.as_str())).collect();
        part_keys.sort_unstable();
        let mut dependency_keys: Vec<(&'a str, PartKeys<'a>)> = dependencies
            .iter()
            .map(|dependency| {
                let mut consumed: PartKeys<'a> = dependency
                    .parts
                    .iter()
                    .map(|part| (part.part_id.as_str(), part.part_type.as_str()))
                    .collect();
                consumed.sort_unstable();
                (dependency.module_id.as_str(), consumed)
            })
            .collect();
        dependency_keys.sort_unstable();
        Self {
            id: id.as_str(),
            module_type,
            category,
            description,
            parts: part_keys,
            dependencies: dependency_keys,
        }
    }
}
