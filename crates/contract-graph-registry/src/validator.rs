// crates/contract-graph-registry/src/validator.rs
// ============================================================================
// Module: Schema Contract Validator
// Description: JSON Schema validation for raw and typed contract documents.
// Purpose: Report every schema violation with its location inside the document.
// Dependencies: contract-graph-core, jsonschema, serde_json
// ============================================================================

//! ## Overview
//! [`SchemaContractValidator`] compiles [`contract_schema`] once and reports
//! each violation as a [`ValidationIssue`] whose path uses the same
//! `parts[1].id` notation as the structural checks.
//!
//! [`validate_documents`] drives validation over raw registry documents so
//! that files which fail to parse still produce an invalid outcome instead of
//! aborting the run.

// ============================================================================
// SECTION: Imports
// ============================================================================

use contract_graph_core::ContractFile;
use contract_graph_core::ContractValidator;
use contract_graph_core::ValidationIssue;
use contract_graph_core::ValidationOutcome;
use contract_graph_core::ValidationSummary;
use jsonschema::Draft;
use jsonschema::Validator;
use serde_json::Value;
use thiserror::Error;

use crate::registry::ContractDocument;
use crate::registry::DocumentBody;
use crate::schema::contract_schema;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Schema setup errors.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The contract schema failed to compile.
    #[error("contract schema failed to compile: {0}")]
    Compile(String),
}

// ============================================================================
// SECTION: Validator
// ============================================================================

/// Validates contract documents against the contract JSON Schema.
pub struct SchemaContractValidator {
    /// Compiled schema validator.
    validator: Validator,
}

impl SchemaContractValidator {
    /// Compiles the contract schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Compile`] when the schema is rejected.
    pub fn new() -> Result<Self, SchemaError> {
        let validator = jsonschema::options()
            .with_draft(Draft::Draft202012)
            .build(&contract_schema())
            .map_err(|err| SchemaError::Compile(err.to_string()))?;
        Ok(Self {
            validator,
        })
    }

    /// Returns every schema violation found in `document`.
    #[must_use]
    pub fn check(&self, document: &Value) -> Vec<ValidationIssue> {
        self.validator
            .iter_errors(document)
            .map(|err| {
                let path = pointer_to_path(&err.instance_path().to_string());
                ValidationIssue::new(path, err.to_string())
            })
            .collect()
    }

    /// Validates a raw registry document.
    #[must_use]
    pub fn validate_document(&self, document: &ContractDocument) -> ValidationOutcome {
        let errors = match &document.body {
            DocumentBody::Parsed(value) => self.check(value),
            DocumentBody::Malformed(error) => vec![ValidationIssue::new("", error.clone())],
        };
        outcome_for(document, errors)
    }
}

impl ContractValidator for SchemaContractValidator {
    fn validate_file(&self, file: &ContractFile) -> ValidationOutcome {
        let errors = match serde_json::to_value(&file.content) {
            Ok(value) => self.check(&value),
            Err(err) => vec![ValidationIssue::new("", err.to_string())],
        };
        ValidationOutcome::from_issues(file, errors)
    }
}

// ============================================================================
// SECTION: Document Validation
// ============================================================================

/// Validates raw registry documents, one outcome per document in input order.
///
/// Each document is checked against the schema when `schema` is set. A
/// document that passes is converted to a typed contract and handed to
/// `content`; content checks never run on documents that already failed.
#[must_use]
pub fn validate_documents<V>(
    documents: &[ContractDocument],
    schema: Option<&SchemaContractValidator>,
    content: &V,
) -> ValidationSummary
where
    V: ContractValidator + ?Sized,
{
    let outcomes = documents
        .iter()
        .map(|document| {
            let schema_errors = match (&document.body, schema) {
                (DocumentBody::Malformed(error), _) => {
                    vec![ValidationIssue::new("", error.clone())]
                }
                (DocumentBody::Parsed(value), Some(schema)) => schema.check(value),
                (DocumentBody::Parsed(_), None) => Vec::new(),
            };
            if !schema_errors.is_empty() {
                return outcome_for(document, schema_errors);
            }
            match document.to_contract() {
                Ok(file) => content.validate_file(&file),
                Err(err) => outcome_for(document, vec![ValidationIssue::new("", err.to_string())]),
            }
        })
        .collect();
    ValidationSummary::aggregate(outcomes)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds an outcome for a raw document.
fn outcome_for(document: &ContractDocument, errors: Vec<ValidationIssue>) -> ValidationOutcome {
    ValidationOutcome {
        file_name: document.file_name.clone(),
        file_path: document.file_path.clone(),
        valid: errors.is_empty(),
        errors,
    }
}

/// Converts a JSON pointer such as `/parts/1/id` into `parts[1].id`.
fn pointer_to_path(pointer: &str) -> String {
    let mut path = String::new();
    for segment in pointer.split('/').skip(1) {
        let segment = segment.replace("~1", "/").replace("~0", "~");
        if !segment.is_empty() && segment.bytes().all(|byte| byte.is_ascii_digit()) {
            path.push('[');
            path.push_str(&segment);
            path.push(']');
        } else {
            if !path.is_empty() {
                path.push('.');
            }
            path.push_str(&segment);
        }
    }
    path
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::pointer_to_path;

    #[test]
    fn pointer_paths_use_index_notation() {
        assert_eq!(pointer_to_path(""), "");
        assert_eq!(pointer_to_path("/id"), "id");
        assert_eq!(pointer_to_path("/parts/1/id"), "parts[1].id");
        assert_eq!(
            pointer_to_path("/dependencies/0/parts/2/part_id"),
            "dependencies[0].parts[2].part_id"
        );
        assert_eq!(pointer_to_path("/a~1b"), "a/b");
    }
}
