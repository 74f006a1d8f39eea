// crates/contract-graph-cli/src/lib.rs
// ============================================================================
// Module: Contract Graph CLI Library
// Description: Shared helpers for the contract graph command-line interface.
// Purpose: Provide reusable components (i18n) for the CLI binary and tests.
// Dependencies: Standard library.
// ============================================================================

//! ## Overview
//! This library module houses shared CLI utilities, including the localized
//! message catalog. The binary entry point (`src/main.rs`) imports these
//! helpers so every human-readable line goes through one catalog.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Internationalization helpers and message catalog.
pub mod i18n;
