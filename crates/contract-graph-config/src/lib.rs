// crates/contract-graph-config/src/lib.rs
// ============================================================================
// Module: Contract Graph Config Library
// Description: Canonical config model and validation.
// Purpose: Single source of truth for contract-graph.toml semantics.
// Dependencies: serde, toml
// ============================================================================

//! ## Overview
//! `contract-graph-config` defines where contracts are read from, where the
//! applied graph is stored, which validators run, and where audit events go.
//! Loading is strict and fail-closed.
//!
//! Security posture: config inputs are untrusted; size and path limits apply
//! before parsing.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
