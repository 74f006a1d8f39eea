// crates/contract-graph-registry/src/lib.rs
// ============================================================================
// Module: Contract Graph Registry
// Description: Filesystem-backed contract registry, schema validation, and graph file.
// Purpose: Connect the reconciliation core to contracts and graphs stored on disk.
// Dependencies: contract-graph-core, jsonschema, serde_json, serde_yaml
// ============================================================================

//! ## Overview
//! This crate provides the on-disk collaborators used by local workflows:
//! - [`DirectoryContractRegistry`] walks a directory of YAML or JSON contracts.
//! - [`SchemaContractValidator`] checks raw documents against [`contract_schema`].
//! - [`FileGraphStore`] persists the applied graph as a single JSON file.
//!
//! Inputs are untrusted: reads are size-bounded, the walk is count-bounded,
//! and any failure to reach a source is an error rather than an empty result.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod graph_file;
pub mod registry;
pub mod schema;
pub mod validator;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use graph_file::FileGraphStore;
pub use registry::ContractDocument;
pub use registry::DEFAULT_EXTENSIONS;
pub use registry::DirectoryContractRegistry;
pub use registry::DocumentBody;
pub use registry::LoadError;
pub use registry::RegistryLimits;
pub use schema::contract_schema;
pub use validator::SchemaContractValidator;
pub use validator::SchemaError;
pub use validator::validate_documents;
