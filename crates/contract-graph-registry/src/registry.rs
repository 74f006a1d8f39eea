// crates/contract-graph-registry/src/registry.rs
// ============================================================================
// Module: Directory Contract Registry
// Description: Loads contract documents from a directory tree.
// Purpose: Provide the current contract definitions from files on disk.
// Dependencies: contract-graph-core, serde_json, serde_yaml, thiserror
// ============================================================================

//! ## Overview
//! The registry walks its root recursively in sorted path order and loads
//! every file whose extension is enabled. Each file is keyed by its
//! root-relative path with `/` separators and a leading `/`, so keys are
//! stable across machines and checkouts.
//!
//! Loading happens in two stages. [`DirectoryContractRegistry::documents`]
//! parses each file into a raw document and keeps syntax failures as
//! [`DocumentBody::Malformed`] so validation can report them per file.
//! [`ContractRegistry::list_contracts`] then requires every document to be a
//! well-formed contract and fails as a whole otherwise.
//!
//! Security posture: contract files are untrusted; reads are bounded by
//! [`RegistryLimits`] and symlinks are never followed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use contract_graph_core::ContractContent;
use contract_graph_core::ContractFile;
use contract_graph_core::ContractRegistry;
use contract_graph_core::FilePath;
use contract_graph_core::RegistryError;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// File extensions loaded when none are configured.
pub const DEFAULT_EXTENSIONS: [&str; 3] = ["yml", "yaml", "json"];

/// Default maximum size of a single contract file.
const DEFAULT_MAX_FILE_BYTES: usize = 1024 * 1024;

/// Default maximum number of contract files per registry.
const DEFAULT_MAX_FILES: usize = 10_000;

/// Resource limits applied while loading a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryLimits {
    /// Maximum size of a single contract file in bytes.
    pub max_file_bytes: usize,
    /// Maximum number of contract files.
    pub max_files: usize,
}

impl Default for RegistryLimits {
    fn default() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            max_files: DEFAULT_MAX_FILES,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading contract files.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Registry root is missing or unreadable.
    #[error("registry root {path} unavailable: {error}")]
    RootUnavailable {
        /// Root directory.
        path: String,
        /// Underlying I/O error.
        error: String,
    },
    /// A directory entry or file could not be read.
    #[error("failed to read {path}: {error}")]
    Io {
        /// Offending path.
        path: String,
        /// Underlying I/O error.
        error: String,
    },
    /// A contract file exceeds the size limit.
    #[error("{path} is {size} bytes, exceeding the {limit} byte limit")]
    TooLarge {
        /// Offending path.
        path: String,
        /// Observed size in bytes.
        size: u64,
        /// Configured limit in bytes.
        limit: usize,
    },
    /// The registry holds more contract files than allowed.
    #[error("registry holds more than {limit} contract files")]
    TooManyFiles {
        /// Configured limit.
        limit: usize,
    },
    /// A document is not a well-formed contract.
    #[error("{path} is not a valid contract: {error}")]
    Malformed {
        /// Registry key of the document.
        path: FilePath,
        /// Parse or conversion error.
        error: String,
    },
}

impl From<LoadError> for RegistryError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::RootUnavailable {
                ..
            }
            | LoadError::Io {
                ..
            } => Self::Unavailable(err.to_string()),
            LoadError::TooLarge {
                ..
            }
            | LoadError::TooManyFiles {
                ..
            }
            | LoadError::Malformed {
                ..
            } => Self::Invalid(err.to_string()),
        }
    }
}

// ============================================================================
// SECTION: Documents
// ============================================================================

/// Parsed state of a contract document.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentBody {
    /// Document parsed into a JSON value.
    Parsed(Value),
    /// Document failed to parse; holds the parser message.
    Malformed(String),
}

/// Raw contract document loaded from the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractDocument {
    /// Display file name.
    pub file_name: String,
    /// Registry key.
    pub file_path: FilePath,
    /// Parsed document body.
    pub body: DocumentBody,
}

impl ContractDocument {
    /// Converts the document into a typed contract file.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Malformed`] when the document failed to parse or
    /// does not match the contract shape.
    pub fn to_contract(&self) -> Result<ContractFile, LoadError> {
        let value = match &self.body {
            DocumentBody::Parsed(value) => value,
            DocumentBody::Malformed(error) => {
                return Err(LoadError::Malformed {
                    path: self.file_path.clone(),
                    error: error.clone(),
                });
            }
        };
        let content: ContractContent =
            serde_json::from_value(value.clone()).map_err(|err| LoadError::Malformed {
                path: self.file_path.clone(),
                error: err.to_string(),
            })?;
        Ok(ContractFile {
            file_name: self.file_name.clone(),
            file_path: self.file_path.clone(),
            content,
        })
    }
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Contract registry backed by a directory tree.
#[derive(Debug, Clone)]
pub struct DirectoryContractRegistry {
    /// Root directory scanned for contracts.
    root: PathBuf,
    /// Enabled file extensions, lowercase without the leading dot.
    extensions: Vec<String>,
    /// Load limits.
    limits: RegistryLimits,
}

impl DirectoryContractRegistry {
    /// Creates a registry over `root` with default extensions and limits.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: DEFAULT_EXTENSIONS.iter().map(ToString::to_string).collect(),
            limits: RegistryLimits::default(),
        }
    }

    /// Replaces the enabled file extensions.
    #[must_use]
    pub fn with_extensions(mut self, extensions: &[String]) -> Self {
        self.extensions = extensions
            .iter()
            .map(|extension| extension.trim_start_matches('.').to_ascii_lowercase())
            .collect();
        self
    }

    /// Replaces the load limits.
    #[must_use]
    pub const fn with_limits(mut self, limits: RegistryLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Returns the registry root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Loads every enabled document under the root in sorted path order.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] when the root or a file cannot be read, or when
    /// a limit is exceeded. Syntax errors are kept per document instead.
    pub fn documents(&self) -> Result<Vec<ContractDocument>, LoadError> {
        let metadata = fs::metadata(&self.root).map_err(|err| LoadError::RootUnavailable {
            path: self.root.display().to_string(),
            error: err.to_string(),
        })?;
        if !metadata.is_dir() {
            return Err(LoadError::RootUnavailable {
                path: self.root.display().to_string(),
                error: "not a directory".to_string(),
            });
        }
        let mut files = Vec::new();
        self.collect_files(&self.root, &mut files)?;
        files.iter().map(|path| self.load_document(path)).collect()
    }

    /// Recursively collects enabled files below `dir` in sorted order.
    fn collect_files(&self, dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), LoadError> {
        let io_error = |err: std::io::Error| LoadError::Io {
            path: dir.display().to_string(),
            error: err.to_string(),
        };
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir).map_err(io_error)? {
            let entry = entry.map_err(io_error)?;
            let file_type = entry.file_type().map_err(io_error)?;
            entries.push((entry.path(), file_type));
        }
        entries.sort_by(|(left, _), (right, _)| left.cmp(right));

        for (path, file_type) in entries {
            if file_type.is_symlink() {
                continue;
            }
            if file_type.is_dir() {
                self.collect_files(&path, files)?;
                continue;
            }
            if !file_type.is_file() || !self.is_enabled(&path) {
                continue;
            }
            if files.len() >= self.limits.max_files {
                return Err(LoadError::TooManyFiles {
                    limit: self.limits.max_files,
                });
            }
            files.push(path);
        }
        Ok(())
    }

    /// Returns true when the path carries an enabled extension.
    fn is_enabled(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|extension| extension.to_str())
            .map(str::to_ascii_lowercase)
            .is_some_and(|extension| self.extensions.contains(&extension))
    }

    /// Reads and parses a single document.
    fn load_document(&self, path: &Path) -> Result<ContractDocument, LoadError> {
        let bytes = read_bytes_with_limit(path, self.limits.max_file_bytes)?;
        let file_path = registry_key(&self.root, path);
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let is_json = path
            .extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
        let parsed = if is_json {
            serde_json::from_slice::<Value>(&bytes).map_err(|err| err.to_string())
        } else {
            serde_yaml::from_slice::<Value>(&bytes).map_err(|err| err.to_string())
        };
        let body = match parsed {
            Ok(value) => DocumentBody::Parsed(value),
            Err(error) => DocumentBody::Malformed(error),
        };
        Ok(ContractDocument {
            file_name,
            file_path,
            body,
        })
    }
}

impl ContractRegistry for DirectoryContractRegistry {
    fn list_contracts(&self) -> Result<Vec<ContractFile>, RegistryError> {
        let documents = self.documents()?;
        let contracts = documents
            .iter()
            .map(ContractDocument::to_contract)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(contracts)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds the registry key for a file below `root`.
fn registry_key(root: &Path, path: &Path) -> FilePath {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let segments: Vec<String> = relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect();
    FilePath::new(format!("/{}", segments.join("/")))
}

/// Reads a file while enforcing a size limit.
fn read_bytes_with_limit(path: &Path, max_bytes: usize) -> Result<Vec<u8>, LoadError> {
    let io_error = |err: std::io::Error| LoadError::Io {
        path: path.display().to_string(),
        error: err.to_string(),
    };
    let file = File::open(path).map_err(io_error)?;
    let size = file.metadata().map_err(io_error)?.len();
    let limit = u64::try_from(max_bytes).unwrap_or(u64::MAX);
    if size > limit {
        return Err(LoadError::TooLarge {
            path: path.display().to_string(),
            size,
            limit: max_bytes,
        });
    }
    let mut bytes = Vec::new();
    file.take(limit.saturating_add(1)).read_to_end(&mut bytes).map_err(io_error)?;
    if bytes.len() > max_bytes {
        return Err(LoadError::TooLarge {
            path: path.display().to_string(),
            size: u64::try_from(bytes.len()).unwrap_or(u64::MAX),
            limit: max_bytes,
        });
    }
    Ok(bytes)
}
