// crates/contract-graph-core/src/runtime/audit.rs
// ============================================================================
// Module: Reconciliation Audit Logging
// Description: Structured audit events for detect, relations, validate, and apply.
// Purpose: Emit JSON-lines audit records without hard logging dependencies.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Every reconciliation entry point records one audit event. Sinks are
//! deliberately lightweight so deployments can route events to their own
//! logging pipeline; write failures are swallowed and never affect results.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::core::ApplyResult;
use crate::core::ChangeSet;
use crate::core::ChangeStatus;
use crate::core::GraphRevision;
use crate::core::ModuleId;
use crate::core::RelationView;
use crate::core::ValidationSummary;

// ============================================================================
// SECTION: Events
// ============================================================================

/// Audit event payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AuditEvent {
    /// A change set was computed.
    ChangesDetected {
        /// Event timestamp (milliseconds since epoch).
        timestamp_ms: u128,
        /// Graph revision the diff was computed against.
        base_revision: GraphRevision,
        /// Number of added contracts.
        added: usize,
        /// Number of modified contracts.
        modified: usize,
        /// Number of removed contracts.
        removed: usize,
        /// Number of registry anomalies.
        anomalies: usize,
    },
    /// A relation view was assembled.
    RelationsAssembled {
        /// Event timestamp (milliseconds since epoch).
        timestamp_ms: u128,
        /// Subject module.
        module_id: ModuleId,
        /// Outgoing edge count.
        outgoing: usize,
        /// Incoming edge count.
        incoming: usize,
    },
    /// Registry validation finished.
    ValidationCompleted {
        /// Event timestamp (milliseconds since epoch).
        timestamp_ms: u128,
        /// Files validated.
        files: usize,
        /// Files that failed validation.
        invalid: usize,
    },
    /// A change set was committed.
    ApplyCommitted {
        /// Event timestamp (milliseconds since epoch).
        timestamp_ms: u128,
        /// Revision after the commit.
        revision: GraphRevision,
        /// Distinct modules touched.
        modules_processed: usize,
        /// Parts touched.
        parts_processed: usize,
    },
    /// A change set was refused.
    ApplyRejected {
        /// Event timestamp (milliseconds since epoch).
        timestamp_ms: u128,
        /// Rejection reason.
        reason: String,
    },
    /// A collaborator could not be read.
    SourceFailed {
        /// Event timestamp (milliseconds since epoch).
        timestamp_ms: u128,
        /// Operation that was running.
        operation: &'static str,
        /// Error description.
        error: String,
    },
}

impl AuditEvent {
    /// Builds a detection event from a change set.
    #[must_use]
    pub fn changes_detected(change_set: &ChangeSet) -> Self {
        Self::ChangesDetected {
            timestamp_ms: now_ms(),
            base_revision: change_set.base_revision.clone(),
            added: change_set.count(ChangeStatus::Added),
            modified: change_set.count(ChangeStatus::Modified),
            removed: change_set.count(ChangeStatus::Removed),
            anomalies: change_set.anomalies.len(),
        }
    }

    /// Builds a relations event from an assembled view.
    #[must_use]
    pub fn relations_assembled(view: &RelationView) -> Self {
        Self::RelationsAssembled {
            timestamp_ms: now_ms(),
            module_id: view.module_id.clone(),
            outgoing: view.outgoing.len(),
            incoming: view.incoming.len(),
        }
    }

    /// Builds a validation event from a summary.
    #[must_use]
    pub fn validation_completed(summary: &ValidationSummary) -> Self {
        Self::ValidationCompleted {
            timestamp_ms: now_ms(),
            files: summary.files.len(),
            invalid: summary.invalid_count(),
        }
    }

    /// Builds a commit event from an apply result.
    #[must_use]
    pub fn apply_committed(result: &ApplyResult) -> Self {
        Self::ApplyCommitted {
            timestamp_ms: now_ms(),
            revision: result.revision.clone(),
            modules_processed: result.modules_processed,
            parts_processed: result.parts_processed,
        }
    }

    /// Builds a rejection event.
    #[must_use]
    pub fn apply_rejected(reason: impl Into<String>) -> Self {
        Self::ApplyRejected {
            timestamp_ms: now_ms(),
            reason: reason.into(),
        }
    }

    /// Builds a source failure event.
    #[must_use]
    pub fn source_failed(operation: &'static str, error: impl Into<String>) -> Self {
        Self::SourceFailed {
            timestamp_ms: now_ms(),
            operation,
            error: error.into(),
        }
    }
}

/// Returns the current time in milliseconds since the Unix epoch.
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

// ============================================================================
// SECTION: Sinks
// ============================================================================

/// Audit sink for reconciliation events.
pub trait AuditSink: Send + Sync {
    /// Records an audit event.
    fn record(&self, event: &AuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl AuditSink for StderrAuditSink {
    fn record(&self, event: &AuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that appends JSON lines to a file.
pub struct JsonlAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl JsonlAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl AuditSink for JsonlAuditSink {
    fn record(&self, event: &AuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl AuditSink for NoopAuditSink {
    fn record(&self, _event: &AuditEvent) {}
}
