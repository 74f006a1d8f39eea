// crates/contract-graph-core/src/core/validation.rs
// ============================================================================
// Module: Validation Outcomes
// Description: Per-file validation results and their rolled-up summary.
// Purpose: Represent validation failures as data rather than errors.
// Dependencies: crate::core::{contract, identifiers}, serde
// ============================================================================

//! ## Overview
//! Validation failures never halt processing. Each file produces one
//! [`ValidationOutcome`]; [`ValidationSummary::aggregate`] rolls them up while
//! preserving input order so results stay positional for display and re-run
//! diffing. An empty input is a vacuous success.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::contract::ContractFile;
use crate::core::identifiers::FilePath;

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Single validation error with its location inside the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Human-readable message.
    pub message: String,
    /// Location of the offending value (for example `parts[1].id`).
    pub path: String,
}

impl ValidationIssue {
    /// Creates a new validation issue.
    #[must_use]
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: path.into(),
        }
    }
}

/// Validation result for one contract file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// Display file name.
    pub file_name: String,
    /// Contract file path.
    pub file_path: FilePath,
    /// True when the file passed validation.
    pub valid: bool,
    /// Validation errors; empty when valid.
    pub errors: Vec<ValidationIssue>,
}

impl ValidationOutcome {
    /// Builds an outcome for a file, valid exactly when `errors` is empty.
    #[must_use]
    pub fn from_issues(file: &ContractFile, errors: Vec<ValidationIssue>) -> Self {
        Self {
            file_name: file.file_name.clone(),
            file_path: file.file_path.clone(),
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Builds a passing outcome for a file.
    #[must_use]
    pub fn passed(file: &ContractFile) -> Self {
        Self::from_issues(file, Vec::new())
    }
}

// ============================================================================
// SECTION: Summary
// ============================================================================

/// Rolled-up validation status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    /// True when every file is valid (vacuously true for no files).
    pub valid: bool,
    /// Per-file outcomes in input order.
    pub files: Vec<ValidationOutcome>,
}

impl ValidationSummary {
    /// Aggregates per-file outcomes into a summary.
    #[must_use]
    pub fn aggregate(outcomes: Vec<ValidationOutcome>) -> Self {
        let valid = outcomes.iter().all(|outcome| outcome.valid);
        Self {
            valid,
            files: outcomes,
        }
    }

    /// Returns the number of invalid files.
    #[must_use]
    pub fn invalid_count(&self) -> usize {
        self.files.iter().filter(|outcome| !outcome.valid).count()
    }
}
