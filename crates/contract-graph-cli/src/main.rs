// crates/contract-graph-cli/src/main.rs
// ============================================================================
// Module: Contract Graph CLI Entry Point
// Description: Command dispatcher for contract diffing, navigation, and apply.
// Purpose: Provide a localized CLI over the registry and the applied graph.
// Dependencies: clap, contract-graph-config, contract-graph-core, contract-graph-registry
// ============================================================================

//! ## Overview
//! The contract graph CLI loads configuration, opens the contract directory
//! and the graph file it names, and runs one reconciliation command.
//! Structured results are written to stdout as canonical JSON; summaries,
//! notices, and errors go to stderr through the i18n catalog.
//!
//! Exit status is non-zero when a command fails, when validation finds an
//! invalid file, or when the relation audit finds unresolved references.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use contract_graph_cli::i18n::Locale;
use contract_graph_cli::i18n::set_locale;
use contract_graph_cli::t;
use contract_graph_config::AuditConfig;
use contract_graph_config::ContractGraphConfig;
use contract_graph_config::RegistryConfig;
use contract_graph_core::ApplyResult;
use contract_graph_core::AuditEvent;
use contract_graph_core::AuditSink;
use contract_graph_core::ChangeSet;
use contract_graph_core::ChangeStatus;
use contract_graph_core::CompositeValidator;
use contract_graph_core::FilePath;
use contract_graph_core::GraphModule;
use contract_graph_core::JsonlAuditSink;
use contract_graph_core::ModuleId;
use contract_graph_core::NoopAuditSink;
use contract_graph_core::ReconcileError;
use contract_graph_core::Reconciler;
use contract_graph_core::RelationIssue;
use contract_graph_core::StderrAuditSink;
use contract_graph_core::StructuralValidator;
use contract_graph_core::ValidationSummary;
use contract_graph_registry::DirectoryContractRegistry;
use contract_graph_registry::FileGraphStore;
use contract_graph_registry::RegistryLimits;
use contract_graph_registry::SchemaContractValidator;
use contract_graph_registry::validate_documents;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable selecting the output language.
const LANG_ENV: &str = "CONTRACT_GRAPH_LANG";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "contract-graph", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Preferred output language (overrides `CONTRACT_GRAPH_LANG`).
    #[arg(long, value_enum, value_name = "LANG", global = true)]
    lang: Option<LangArg>,
    /// Config file path (defaults to `CONTRACT_GRAPH_CONFIG` or contract-graph.toml).
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List contracts that differ from the applied graph.
    Diff,
    /// Show the part-level dependency view of an applied module.
    Relations(RelationsCommand),
    /// Show the applied detail of a module.
    Module(ModuleCommand),
    /// Validate every contract file in the registry.
    Validate,
    /// Commit pending contract changes to the graph.
    Apply(ApplyCommand),
    /// Report dependency references the applied graph cannot resolve.
    AuditRelations,
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Arguments for the relations command.
#[derive(Args, Debug)]
struct RelationsCommand {
    /// Module identifier.
    #[arg(value_name = "MODULE_ID")]
    module_id: String,
}

/// Arguments for the module command.
#[derive(Args, Debug)]
struct ModuleCommand {
    /// Module identifier.
    #[arg(value_name = "MODULE_ID", required_unless_present = "path", conflicts_with = "path")]
    module_id: Option<String>,
    /// Registry path of the contract file the module was applied from.
    #[arg(long, value_name = "FILE_PATH")]
    path: Option<String>,
}

/// Arguments for the apply command.
#[derive(Args, Debug)]
struct ApplyCommand {
    /// Commit the detected changes instead of only listing them.
    #[arg(long, action = ArgAction::SetTrue)]
    yes: bool,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Validate the contract graph configuration file.
    Validate,
}

/// Supported CLI language selections.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum LangArg {
    /// English.
    En,
    /// Catalan.
    Ca,
}

impl From<LangArg> for Locale {
    fn from(value: LangArg) -> Self {
        match value {
            LangArg::En => Self::En,
            LangArg::Ca => Self::Ca,
        }
    }
}

// ============================================================================
// SECTION: Reports
// ============================================================================

/// Apply command output.
#[derive(Debug, Serialize)]
struct ApplyReport {
    /// Changes detected against the current graph.
    changes: ChangeSet,
    /// Commit summary; absent when nothing was committed.
    applied: Option<ApplyResult>,
}

/// Relation audit command output.
#[derive(Debug, Serialize)]
struct RelationAuditReport {
    /// True when every dependency reference resolves.
    consistent: bool,
    /// Unresolved references.
    issues: Vec<RelationIssue>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(cli.lang, env_lang.as_deref())?;
    set_locale(locale);
    if locale != Locale::En {
        write_stderr_line(&t!("i18n.disclaimer.machine_translated"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    let config_path = cli.config.as_deref();
    match command {
        Commands::Diff => command_diff(&Workspace::open(config_path)?),
        Commands::Relations(command) => {
            command_relations(&Workspace::open(config_path)?, &command)
        }
        Commands::Module(command) => command_module(&Workspace::open(config_path)?, &command),
        Commands::Validate => command_validate(&Workspace::open(config_path)?),
        Commands::Apply(command) => command_apply(&Workspace::open(config_path)?, &command),
        Commands::AuditRelations => command_audit_relations(&Workspace::open(config_path)?),
        Commands::Config {
            command: ConfigCommand::Validate,
        } => command_config_validate(config_path),
    }
}

/// Prints CLI help.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Workspace
// ============================================================================

/// Collaborators opened from the loaded configuration.
struct Workspace {
    /// Loaded configuration.
    config: ContractGraphConfig,
    /// Audit sink shared with the reconciler.
    audit: Arc<dyn AuditSink>,
    /// Reconciler over the contract directory and the graph file.
    reconciler: Reconciler<DirectoryContractRegistry, FileGraphStore>,
}

impl Workspace {
    /// Loads configuration and opens the registry, graph store, and audit sink.
    fn open(config_path: Option<&Path>) -> CliResult<Self> {
        let config = load_config(config_path)?;
        Self::from_config(config)
    }

    /// Opens collaborators for an already loaded configuration.
    fn from_config(config: ContractGraphConfig) -> CliResult<Self> {
        let audit = audit_sink(&config.audit)?;
        let registry = directory_registry(&config.registry);
        let graph = FileGraphStore::new(PathBuf::from(&config.graph.path))
            .with_max_bytes(config.graph.max_bytes);
        let reconciler = Reconciler::new(registry, graph).with_audit(Arc::clone(&audit));
        Ok(Self {
            config,
            audit,
            reconciler,
        })
    }
}

/// Loads and validates configuration.
fn load_config(config_path: Option<&Path>) -> CliResult<ContractGraphConfig> {
    ContractGraphConfig::load(config_path)
        .map_err(|err| CliError::new(t!("config.load_failed", error = err)))
}

/// Builds the directory registry named by the registry config.
fn directory_registry(config: &RegistryConfig) -> DirectoryContractRegistry {
    DirectoryContractRegistry::new(PathBuf::from(&config.root))
        .with_extensions(&config.extensions)
        .with_limits(RegistryLimits {
            max_file_bytes: config.max_file_bytes,
            max_files: config.max_files,
        })
}

/// Selects the audit sink named by the audit config.
fn audit_sink(config: &AuditConfig) -> CliResult<Arc<dyn AuditSink>> {
    if !config.enabled {
        return Ok(Arc::new(NoopAuditSink));
    }
    let Some(path) = &config.path else {
        return Ok(Arc::new(StderrAuditSink));
    };
    let sink = JsonlAuditSink::new(Path::new(path))
        .map_err(|err| CliError::new(t!("audit.open_failed", path = path, error = err)))?;
    Ok(Arc::new(sink))
}

// ============================================================================
// SECTION: Reconciliation Commands
// ============================================================================

/// Lists contracts that differ from the applied graph.
fn command_diff(workspace: &Workspace) -> CliResult<ExitCode> {
    let change_set =
        workspace.reconciler.detect_changes().map_err(|err| command_failed("diff", &err))?;
    write_json(&change_set)?;
    report_change_summary(&change_set)?;
    Ok(ExitCode::SUCCESS)
}

/// Shows the dependency view of an applied module.
fn command_relations(workspace: &Workspace, command: &RelationsCommand) -> CliResult<ExitCode> {
    let module_id = ModuleId::new(command.module_id.as_str());
    let view = workspace
        .reconciler
        .relations(&module_id)
        .map_err(|err| command_failed("relations", &err))?;
    write_json(&view)?;
    Ok(ExitCode::SUCCESS)
}

/// Shows the applied detail of a module.
fn command_module(workspace: &Workspace, command: &ModuleCommand) -> CliResult<ExitCode> {
    let module = lookup_module(workspace, command)?;
    write_json(&module)?;
    Ok(ExitCode::SUCCESS)
}

/// Resolves a module by identifier or by the path it was applied from.
fn lookup_module(workspace: &Workspace, command: &ModuleCommand) -> CliResult<GraphModule> {
    let reconciler = &workspace.reconciler;
    let module_id = match (&command.module_id, &command.path) {
        (Some(module_id), _) => ModuleId::new(module_id.as_str()),
        (None, Some(path)) => reconciler
            .module_for_path(&FilePath::new(path.as_str()))
            .map_err(|err| command_failed("module", &err))?,
        (None, None) => {
            return Err(command_failed(
                "module",
                &ReconcileError::Invalid("a module id or --path is required".to_string()),
            ));
        }
    };
    reconciler.module_detail(&module_id).map_err(|err| command_failed("module", &err))
}

/// Validates every registry file and reports the aggregate.
fn command_validate(workspace: &Workspace) -> CliResult<ExitCode> {
    let summary = validate_registry(workspace)?;
    write_json(&summary)?;
    let count = summary.files.len();
    if summary.valid {
        write_stderr_line(&t!("validate.ok", count = count))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
        Ok(ExitCode::SUCCESS)
    } else {
        let invalid = summary.invalid_count();
        write_stderr_line(&t!("validate.failed", invalid = invalid, count = count))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
        Ok(ExitCode::FAILURE)
    }
}

/// Runs the configured validation stages over the raw registry documents.
fn validate_registry(workspace: &Workspace) -> CliResult<ValidationSummary> {
    let registry = workspace.reconciler.registry();
    let documents = registry.documents().map_err(|err| {
        workspace.audit.record(&AuditEvent::source_failed("validate", err.to_string()));
        CliError::new(t!("registry.load_failed", path = registry.root().display(), error = err))
    })?;
    let stages = &workspace.config.validation;
    let schema = if stages.schema {
        let validator = SchemaContractValidator::new()
            .map_err(|err| CliError::new(t!("schema.compile_failed", error = err)))?;
        Some(validator)
    } else {
        None
    };
    let mut content = CompositeValidator::new();
    if stages.structural {
        content = content.with(StructuralValidator);
    }
    let summary = validate_documents(&documents, schema.as_ref(), &content);
    workspace.audit.record(&AuditEvent::validation_completed(&summary));
    Ok(summary)
}

/// Detects changes and commits them when confirmed.
fn command_apply(workspace: &Workspace, command: &ApplyCommand) -> CliResult<ExitCode> {
    let report = apply_changes(workspace, command.yes)?;
    write_json(&report)?;
    let notice = match &report.applied {
        Some(result) => t!("apply.ok", message = result.message, revision = result.revision),
        None if report.changes.is_empty() => t!("apply.nothing"),
        None => t!("apply.confirm_required", count = report.changes.records.len()),
    };
    write_stderr_line(&notice).map_err(|err| CliError::new(output_error("stderr", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Computes the pending change set and commits it when `confirmed` is set.
fn apply_changes(workspace: &Workspace, confirmed: bool) -> CliResult<ApplyReport> {
    let reconciler = &workspace.reconciler;
    let changes = reconciler.detect_changes().map_err(|err| command_failed("apply", &err))?;
    if !confirmed || changes.is_empty() {
        return Ok(ApplyReport {
            changes,
            applied: None,
        });
    }
    let applied = reconciler.apply(&changes).map_err(|err| command_failed("apply", &err))?;
    Ok(ApplyReport {
        changes,
        applied: Some(applied),
    })
}

/// Reports unresolved dependency references in the applied graph.
fn command_audit_relations(workspace: &Workspace) -> CliResult<ExitCode> {
    let issues = workspace
        .reconciler
        .audit_relations()
        .map_err(|err| command_failed("audit-relations", &err))?;
    let report = RelationAuditReport {
        consistent: issues.is_empty(),
        issues,
    };
    write_json(&report)?;
    if report.consistent {
        write_stderr_line(&t!("relations.audit.ok"))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
        Ok(ExitCode::SUCCESS)
    } else {
        write_stderr_line(&t!("relations.audit.issues", count = report.issues.len()))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
        Ok(ExitCode::FAILURE)
    }
}

/// Writes the per-status counts and anomaly notice for a change set.
fn report_change_summary(change_set: &ChangeSet) -> CliResult<()> {
    let summary = t!(
        "diff.summary",
        added = change_set.count(ChangeStatus::Added),
        modified = change_set.count(ChangeStatus::Modified),
        removed = change_set.count(ChangeStatus::Removed)
    );
    write_stderr_line(&summary).map_err(|err| CliError::new(output_error("stderr", &err)))?;
    if !change_set.anomalies.is_empty() {
        write_stderr_line(&t!("diff.anomalies", count = change_set.anomalies.len()))
            .map_err(|err| CliError::new(output_error("stderr", &err)))?;
    }
    Ok(())
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Validates the configuration file.
fn command_config_validate(config_path: Option<&Path>) -> CliResult<ExitCode> {
    let _config = load_config(config_path)?;
    write_stdout_line(&t!("config.validate.ok"))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the CLI locale from flags or environment.
fn resolve_locale(lang: Option<LangArg>, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(lang) = lang {
        return Ok(lang.into());
    }
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Ok(Locale::En)
}

/// Maps a reconciliation failure to a localized CLI error.
fn command_failed(operation: &str, error: &ReconcileError) -> CliError {
    CliError::new(t!("command.failed", operation = operation, error = error))
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes raw bytes to stdout without adding a newline.
fn write_stdout_bytes(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    stdout.write_all(bytes)
}

/// Writes a value to stdout as canonical JSON followed by a newline.
fn write_json<T: Serialize>(value: &T) -> CliResult<()> {
    let mut bytes = serde_jcs::to_vec(value)
        .map_err(|err| CliError::new(t!("output.json_failed", error = err)))?;
    bytes.push(b'\n');
    write_stdout_bytes(&bytes).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
