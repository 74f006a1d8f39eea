// crates/contract-graph-registry/src/graph_file.rs
// ============================================================================
// Module: File Graph Store
// Description: Graph store persisted as a single JSON document.
// Purpose: Hold the applied module graph for local, single-writer workflows.
// Dependencies: contract-graph-core, serde, serde_json
// ============================================================================

//! ## Overview
//! The graph lives in one JSON file holding the module list and its
//! revision. A missing file is an empty graph. Every load recomputes the
//! revision and fails closed with [`GraphStoreError::Corrupt`] when it does
//! not match the stored one.
//!
//! Commits re-read the file, compare revisions, and replace the file through
//! a temporary sibling and a rename so readers never observe a partial write.
//! Writers within one process are serialized; separate processes sharing a
//! file are not.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::fs::File;
use std::io::ErrorKind;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;

use contract_graph_core::FilePath;
use contract_graph_core::GraphCommit;
use contract_graph_core::GraphModule;
use contract_graph_core::GraphRevision;
use contract_graph_core::GraphSnapshot;
use contract_graph_core::GraphStore;
use contract_graph_core::GraphStoreError;
use contract_graph_core::ModuleId;
use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default maximum size of the graph file.
const DEFAULT_MAX_GRAPH_BYTES: usize = 64 * 1024 * 1024;

// ============================================================================
// SECTION: File Format
// ============================================================================

/// On-disk graph document.
#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct GraphDocument {
    /// Revision of `modules` at write time.
    revision: GraphRevision,
    /// Applied modules in canonical order.
    modules: Vec<GraphModule>,
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// Graph store backed by a JSON file.
#[derive(Debug)]
pub struct FileGraphStore {
    /// Graph file location.
    path: PathBuf,
    /// Maximum accepted graph file size.
    max_bytes: usize,
    /// Serializes commits within this process.
    write_lock: Mutex<()>,
}

impl FileGraphStore {
    /// Creates a store for the graph file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_bytes: DEFAULT_MAX_GRAPH_BYTES,
            write_lock: Mutex::new(()),
        }
    }

    /// Overrides the maximum accepted graph file size.
    #[must_use]
    pub const fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Returns the graph file location.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and verifies the graph file.
    fn load(&self) -> Result<GraphSnapshot, GraphStoreError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return GraphSnapshot::empty()
                    .map_err(|err| GraphStoreError::Corrupt(err.to_string()));
            }
            Err(err) => return Err(self.unavailable(&err)),
        };
        let limit = u64::try_from(self.max_bytes).unwrap_or(u64::MAX);
        let mut bytes = Vec::new();
        file.take(limit.saturating_add(1))
            .read_to_end(&mut bytes)
            .map_err(|err| self.unavailable(&err))?;
        if bytes.len() > self.max_bytes {
            return Err(GraphStoreError::Corrupt(format!(
                "{} exceeds the {} byte limit",
                self.path.display(),
                self.max_bytes
            )));
        }
        let document: GraphDocument = serde_json::from_slice(&bytes).map_err(|err| {
            GraphStoreError::Corrupt(format!("{}: {err}", self.path.display()))
        })?;
        let snapshot = GraphSnapshot::from_modules(document.modules)
            .map_err(|err| GraphStoreError::Corrupt(err.to_string()))?;
        if snapshot.revision() != &document.revision {
            return Err(GraphStoreError::Corrupt(format!(
                "{}: stored revision {} does not match content revision {}",
                self.path.display(),
                document.revision,
                snapshot.revision()
            )));
        }
        Ok(snapshot)
    }

    /// Writes a snapshot through a temporary sibling file.
    fn write(&self, snapshot: &GraphSnapshot) -> Result<(), GraphStoreError> {
        let document = GraphDocument {
            revision: snapshot.revision().clone(),
            modules: snapshot.modules().to_vec(),
        };
        let mut payload = serde_json::to_vec_pretty(&document)
            .map_err(|err| GraphStoreError::Corrupt(err.to_string()))?;
        payload.push(b'\n');
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|err| self.unavailable(&err))?;
        }
        let temp_path = self.path.with_extension("tmp");
        let mut file = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(|err| self.unavailable(&err))?;
        file.write_all(&payload).map_err(|err| self.unavailable(&err))?;
        file.sync_all().map_err(|err| self.unavailable(&err))?;
        fs::rename(&temp_path, &self.path).map_err(|err| self.unavailable(&err))?;
        Ok(())
    }

    /// Maps an I/O error to an unavailable store.
    fn unavailable(&self, err: &std::io::Error) -> GraphStoreError {
        GraphStoreError::Unavailable(format!("{}: {err}", self.path.display()))
    }
}

impl GraphStore for FileGraphStore {
    fn snapshot(&self) -> Result<GraphSnapshot, GraphStoreError> {
        self.load()
    }

    fn get_module(&self, module_id: &ModuleId) -> Result<Option<GraphModule>, GraphStoreError> {
        Ok(self.load()?.module(module_id).cloned())
    }

    fn module_id_by_path(
        &self,
        file_path: &FilePath,
    ) -> Result<Option<ModuleId>, GraphStoreError> {
        Ok(self.load()?.module_by_path(file_path).map(|module| module.id.clone()))
    }

    fn commit(&self, commit: &GraphCommit) -> Result<GraphRevision, GraphStoreError> {
        let guard = self
            .write_lock
            .lock()
            .map_err(|_| GraphStoreError::Unavailable("graph file lock poisoned".to_string()))?;
        let current = self.load()?;
        if current.revision() != &commit.expected_revision {
            return Err(GraphStoreError::StaleRevision {
                expected: commit.expected_revision.clone(),
                actual: current.revision().clone(),
            });
        }
        let next = GraphSnapshot::from_modules(commit.apply_to(current.into_modules()))
            .map_err(|err| GraphStoreError::Corrupt(err.to_string()))?;
        self.write(&next)?;
        drop(guard);
        Ok(next.revision().clone())
    }
}
