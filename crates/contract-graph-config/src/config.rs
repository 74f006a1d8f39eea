// crates/contract-graph-config/src/config.rs
// ============================================================================
// Module: Contract Graph Configuration
// Description: Configuration loading and validation for contract graph tooling.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: serde, toml, thiserror
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! The path comes from the caller, then [`CONFIG_ENV_VAR`], then
//! `contract-graph.toml` in the working directory. Only the last fallback may
//! be absent, in which case defaults apply; an explicitly named file that is
//! missing or invalid is an error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "contract-graph.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "CONTRACT_GRAPH_CONFIG";
/// Maximum configuration file size in bytes.
const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default registry root directory.
const DEFAULT_REGISTRY_ROOT: &str = "contracts";
/// Default maximum contract file size.
const DEFAULT_MAX_FILE_BYTES: usize = 1024 * 1024;
/// Upper bound for `registry.max_file_bytes`.
const MAX_MAX_FILE_BYTES: usize = 16 * 1024 * 1024;
/// Default maximum number of contract files.
const DEFAULT_MAX_FILES: usize = 10_000;
/// Upper bound for `registry.max_files`.
const MAX_MAX_FILES: usize = 100_000;
/// Maximum number of configured extensions.
const MAX_EXTENSIONS: usize = 16;
/// Default graph file location.
const DEFAULT_GRAPH_PATH: &str = "contract-graph.json";
/// Default maximum graph file size.
const DEFAULT_GRAPH_MAX_BYTES: usize = 64 * 1024 * 1024;
/// Upper bound for `graph.max_bytes`.
const MAX_GRAPH_MAX_BYTES: usize = 1024 * 1024 * 1024;

// ============================================================================
// SECTION: Config Model
// ============================================================================

/// Contract graph configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContractGraphConfig {
    /// Contract registry configuration.
    #[serde(default)]
    pub registry: RegistryConfig,
    /// Graph store configuration.
    #[serde(default)]
    pub graph: GraphConfig,
    /// Validation configuration.
    #[serde(default)]
    pub validation: ValidationConfig,
    /// Audit logging configuration.
    #[serde(default)]
    pub audit: AuditConfig,
}

impl ContractGraphConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// When neither `path` nor [`CONFIG_ENV_VAR`] is set and the default file
    /// does not exist, the default configuration is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (resolved, source) = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = match fs::read(&resolved) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound && source == ConfigSource::Default => {
                let config = Self::default();
                config.validate()?;
                return Ok(config);
            }
            Err(err) => return Err(ConfigError::Io(err.to_string())),
        };
        Self::from_bytes(&bytes)
    }

    /// Parses and validates configuration from raw TOML bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ConfigError> {
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.registry.validate()?;
        self.graph.validate()?;
        self.validation.validate()?;
        self.audit.validate()
    }
}

// ============================================================================
// SECTION: Registry Config
// ============================================================================

/// Contract registry configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Directory scanned for contract files.
    #[serde(default = "default_registry_root")]
    pub root: String,
    /// File extensions loaded as contracts, without the leading dot.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Maximum size of a single contract file in bytes.
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: usize,
    /// Maximum number of contract files.
    #[serde(default = "default_max_files")]
    pub max_files: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            root: default_registry_root(),
            extensions: default_extensions(),
            max_file_bytes: default_max_file_bytes(),
            max_files: default_max_files(),
        }
    }
}

impl RegistryConfig {
    /// Validates registry configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_string("registry.root", &self.root)?;
        if self.extensions.is_empty() || self.extensions.len() > MAX_EXTENSIONS {
            return Err(ConfigError::Invalid("registry.extensions out of range".to_string()));
        }
        for extension in &self.extensions {
            let trimmed = extension.trim_start_matches('.');
            if trimmed.is_empty() || !trimmed.chars().all(|ch| ch.is_ascii_alphanumeric()) {
                return Err(ConfigError::Invalid(format!(
                    "registry.extensions entry '{extension}' must be alphanumeric"
                )));
            }
        }
        if self.max_file_bytes == 0 || self.max_file_bytes > MAX_MAX_FILE_BYTES {
            return Err(ConfigError::Invalid("registry.max_file_bytes out of range".to_string()));
        }
        if self.max_files == 0 || self.max_files > MAX_MAX_FILES {
            return Err(ConfigError::Invalid("registry.max_files out of range".to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Graph Config
// ============================================================================

/// Graph store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphConfig {
    /// Graph file location.
    #[serde(default = "default_graph_path")]
    pub path: String,
    /// Maximum graph file size in bytes.
    #[serde(default = "default_graph_max_bytes")]
    pub max_bytes: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            path: default_graph_path(),
            max_bytes: default_graph_max_bytes(),
        }
    }
}

impl GraphConfig {
    /// Validates graph configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_string("graph.path", &self.path)?;
        if self.max_bytes == 0 || self.max_bytes > MAX_GRAPH_MAX_BYTES {
            return Err(ConfigError::Invalid("graph.max_bytes out of range".to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Validation Config
// ============================================================================

/// Validation configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ValidationConfig {
    /// Check raw documents against the contract JSON Schema.
    #[serde(default = "default_true")]
    pub schema: bool,
    /// Run structural content checks.
    #[serde(default = "default_true")]
    pub structural: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            schema: default_true(),
            structural: default_true(),
        }
    }
}

impl ValidationConfig {
    /// Validates validation configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.schema && !self.structural {
            return Err(ConfigError::Invalid(
                "validation must enable schema or structural checks".to_string(),
            ));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Audit Config
// ============================================================================

/// Audit logging configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Emit audit events.
    #[serde(default)]
    pub enabled: bool,
    /// JSON-lines audit file; events go to stderr when unset.
    #[serde(default)]
    pub path: Option<String>,
}

impl AuditConfig {
    /// Validates audit configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(path) = &self.path {
            validate_path_string("audit.path", path)?;
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Origin of a resolved config path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigSource {
    /// Path supplied by the caller.
    Explicit,
    /// Path read from [`CONFIG_ENV_VAR`].
    Environment,
    /// Default filename fallback.
    Default,
}

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<(PathBuf, ConfigSource), ConfigError> {
    if let Some(path) = path {
        return Ok((path.to_path_buf(), ConfigSource::Explicit));
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok((PathBuf::from(env_path), ConfigSource::Environment));
    }
    Ok((PathBuf::from(DEFAULT_CONFIG_NAME), ConfigSource::Default))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}

/// Default registry root directory.
fn default_registry_root() -> String {
    DEFAULT_REGISTRY_ROOT.to_string()
}

/// Default contract file extensions.
fn default_extensions() -> Vec<String> {
    ["yml", "yaml", "json"].iter().map(ToString::to_string).collect()
}

/// Default maximum contract file size.
const fn default_max_file_bytes() -> usize {
    DEFAULT_MAX_FILE_BYTES
}

/// Default maximum number of contract files.
const fn default_max_files() -> usize {
    DEFAULT_MAX_FILES
}

/// Default graph file location.
fn default_graph_path() -> String {
    DEFAULT_GRAPH_PATH.to_string()
}

/// Default maximum graph file size.
const fn default_graph_max_bytes() -> usize {
    DEFAULT_GRAPH_MAX_BYTES
}

/// Default to enabling a validation stage.
const fn default_true() -> bool {
    true
}
