// crates/contract-graph-registry/tests/common/mod.rs
// =============================================================================
// Module: Registry Test Helpers
// Description: Shared filesystem fixtures for registry tests.
// Purpose: Reduce duplication across integration tests for contract-graph-registry.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]
#![allow(
    clippy::expect_used,
    clippy::missing_docs_in_private_items,
    reason = "Test-only fixtures use panic-based assertions for clarity."
)]

use std::fs;
use std::path::Path;

/// Well-formed YAML contract with one exported part and one dependency.
pub const BILLING_YAML: &str = "\
id: Billing
type: service
category: finance
description: Issues invoices
parts:
  - id: create_invoice
    type: function
dependencies:
  - module_id: Ledger
    parts:
      - part_id: post_entry
        type: function
";

/// Well-formed JSON contract providing the part consumed by Billing.
pub const LEDGER_JSON: &str = r#"{
  "id": "Ledger",
  "type": "service",
  "category": "finance",
  "parts": [{ "id": "post_entry", "type": "function" }]
}"#;

/// Writes a file below `root`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(path, contents).expect("write fixture");
}
