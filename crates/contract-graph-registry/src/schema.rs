// crates/contract-graph-registry/src/schema.rs
// ============================================================================
// Module: Contract Schema
// Description: JSON Schema describing contract documents.
// Purpose: Provide the canonical document shape for schema validation.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! The schema mirrors the typed contract content: unknown fields are rejected
//! and required identifiers must be non-empty strings. Draft 2020-12.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use serde_json::json;

// ============================================================================
// SECTION: Schema
// ============================================================================

/// Returns the JSON Schema for a contract document.
#[must_use]
pub fn contract_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": "Module contract",
        "description": "Declares a module, its exported parts, and the parts it consumes.",
        "type": "object",
        "required": ["id", "type", "category"],
        "additionalProperties": false,
        "properties": {
            "id": { "$ref": "#/$defs/identifier" },
            "type": { "$ref": "#/$defs/identifier" },
            "category": { "$ref": "#/$defs/identifier" },
            "description": { "type": "string" },
            "parts": {
                "type": "array",
                "items": { "$ref": "#/$defs/part" }
            },
            "dependencies": {
                "type": "array",
                "items": { "$ref": "#/$defs/dependency" }
            }
        },
        "$defs": {
            "identifier": {
                "type": "string",
                "minLength": 1
            },
            "part": {
                "type": "object",
                "required": ["id", "type"],
                "additionalProperties": false,
                "properties": {
                    "id": { "$ref": "#/$defs/identifier" },
                    "type": { "$ref": "#/$defs/identifier" }
                }
            },
            "partRef": {
                "type": "object",
                "required": ["part_id", "type"],
                "additionalProperties": false,
                "properties": {
                    "part_id": { "$ref": "#/$defs/identifier" },
                    "type": { "$ref": "#/$defs/identifier" }
                }
            },
            "dependency": {
                "type": "object",
                "required": ["module_id"],
                "additionalProperties": false,
                "properties": {
                    "module_id": { "$ref": "#/$defs/identifier" },
                    "parts": {
                        "type": "array",
                        "items": { "$ref": "#/$defs/partRef" }
                    }
                }
            }
        }
    })
}
