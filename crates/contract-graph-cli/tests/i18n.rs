// crates/contract-graph-cli/tests/i18n.rs
// ============================================================================
// Module: CLI i18n Tests
// Description: Exercises the translation catalog and placeholder substitution.
// Purpose: Ensure CLI user-facing strings route through stable i18n helpers.
// Dependencies: contract-graph-cli i18n module and the `t!` macro.
// ============================================================================

//! ## Overview
//! Validates the contract graph CLI i18n catalog behavior:
//! - Message arguments capture key/value substitutions.
//! - Translation falls back to keys on misses.
//! - The [`t!`](contract_graph_cli::t) macro formats placeholders correctly.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use contract_graph_cli::i18n::MessageArg;
use contract_graph_cli::i18n::translate;
use contract_graph_cli::t;

// ============================================================================
// SECTION: Tests
// ============================================================================

/// Confirms message arguments capture key/value pairs.
#[test]
fn message_arg_new_captures_key_and_value() {
    let arg = MessageArg::new("path", "/contracts/billing.yml");
    assert_eq!(arg.key, "path");
    assert_eq!(arg.value, "/contracts/billing.yml");
}

/// Confirms catalog entries resolve and replace placeholders.
#[test]
fn translate_substitutes_placeholders() {
    let args = vec![MessageArg::new("invalid", "1"), MessageArg::new("count", "4")];
    let result = translate("validate.failed", args);
    assert_eq!(result, "1 of 4 contract file(s) failed validation.");
}

/// Confirms missing keys fall back to the key string.
#[test]
fn translate_falls_back_to_key() {
    let result = translate("missing.key", Vec::new());
    assert_eq!(result, "missing.key");
}

/// Confirms the t! macro formats named arguments of any displayable type.
#[test]
fn t_macro_formats_message() {
    let rendered = t!("main.version", version = "0.1.0");
    assert_eq!(rendered, "contract-graph 0.1.0");
    let count = t!("apply.confirm_required", count = 3_usize);
    assert!(count.starts_with("3 change(s) pending"));
}
