// crates/contract-graph-core/src/runtime/validation.rs
// ============================================================================
// Module: Validation Aggregator
// Description: Per-file validation runner and built-in structural checks.
// Purpose: Validate every registry file and roll results into one summary.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! [`validate_contracts`] invokes a [`ContractValidator`] exactly once per
//! file, in registry order, and aggregates the outcomes. A failing file never
//! stops the remaining files from being validated.
//!
//! [`StructuralValidator`] covers the content rules a typed schema cannot
//! express: non-empty identifiers, unique part ids, and well-formed
//! dependency declarations.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use crate::core::ContractFile;
use crate::core::ValidationIssue;
use crate::core::ValidationOutcome;
use crate::core::ValidationSummary;
use crate::interfaces::ContractValidator;

// ============================================================================
// SECTION: Aggregation
// ============================================================================

/// Validates each file once, preserving input order in the summary.
#[must_use]
pub fn validate_contracts<V>(validator: &V, files: &[ContractFile]) -> ValidationSummary
where
    V: ContractValidator + ?Sized,
{
    let outcomes = files.iter().map(|file| validator.validate_file(file)).collect();
    ValidationSummary::aggregate(outcomes)
}

// ============================================================================
// SECTION: Structural Validator
// ============================================================================

/// Built-in content checks applied to typed contract content.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralValidator;

impl ContractValidator for StructuralValidator {
    fn validate_file(&self, file: &ContractFile) -> ValidationOutcome {
        let content = &file.content;
        let mut issues = Vec::new();
        require_non_empty(&mut issues, "id", content.id.as_str());
        require_non_empty(&mut issues, "type", &content.module_type);
        require_non_empty(&mut issues, "category", &content.category);

        let mut part_ids = BTreeSet::new();
        for (index, part) in content.parts.iter().enumerate() {
            require_non_empty(&mut issues, &format!("parts[{index}].id"), part.id.as_str());
            require_non_empty(&mut issues, &format!("parts[{index}].type"), &part.part_type);
            if !part.id.as_str().is_empty() && !part_ids.insert(part.id.as_str()) {
                issues.push(ValidationIssue::new(
                    format!("parts[{index}].id"),
                    format!("duplicate part id {}", part.id),
                ));
            }
        }

        let mut targets = BTreeSet::new();
        for (index, dependency) in content.dependencies.iter().enumerate() {
            let path = format!("dependencies[{index}]");
            require_non_empty(
                &mut issues,
                &format!("{path}.module_id"),
                dependency.module_id.as_str(),
            );
            if dependency.module_id == content.id {
                issues.push(ValidationIssue::new(
                    format!("{path}.module_id"),
                    "module cannot depend on itself",
                ));
            }
            if !targets.insert(dependency.module_id.as_str()) {
                issues.push(ValidationIssue::new(
                    format!("{path}.module_id"),
                    format!("duplicate dependency on {}", dependency.module_id),
                ));
            }
            if dependency.parts.is_empty() {
                issues.push(ValidationIssue::new(
                    format!("{path}.parts"),
                    "dependency must name at least one part",
                ));
            }
            for (part_index, part_ref) in dependency.parts.iter().enumerate() {
                require_non_empty(
                    &mut issues,
                    &format!("{path}.parts[{part_index}].part_id"),
                    part_ref.part_id.as_str(),
                );
            }
        }
        ValidationOutcome::from_issues(file, issues)
    }
}

/// Records an issue when a required string field is blank.
fn require_non_empty(issues: &mut Vec<ValidationIssue>, path: &str, value: &str) {
    if value.trim().is_empty() {
        issues.push(ValidationIssue::new(path, "must be non-empty"));
    }
}

// ============================================================================
// SECTION: Composite Validator
// ============================================================================

/// Runs several validators and concatenates their errors.
pub struct CompositeValidator {
    /// Validators in evaluation order.
    validators: Vec<Box<dyn ContractValidator + Send + Sync>>,
}

impl CompositeValidator {
    /// Creates an empty composite; with no members every file passes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            validators: Vec::new(),
        }
    }

    /// Appends a validator.
    #[must_use]
    pub fn with(mut self, validator: impl ContractValidator + Send + Sync + 'static) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// Returns the number of member validators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.validators.len()
    }

    /// Returns true when no validators are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl Default for CompositeValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ContractValidator for CompositeValidator {
    fn validate_file(&self, file: &ContractFile) -> ValidationOutcome {
        let mut members_valid = true;
        let mut issues = Vec::new();
        for validator in &self.validators {
            let outcome = validator.validate_file(file);
            members_valid &= outcome.valid;
            issues.extend(outcome.errors);
        }
        let mut outcome = ValidationOutcome::from_issues(file, issues);
        outcome.valid &= members_valid;
        outcome
    }
}
