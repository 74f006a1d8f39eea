// crates/contract-graph-cli/tests/cli_commands.rs
// ============================================================================
// Module: CLI Command Tests
// Description: Integration tests running the contract-graph binary end to end.
// Purpose: Ensure commands emit JSON on stdout and report failures by exit code.
// Dependencies: contract-graph-cli binary, serde_json, tempfile
// ============================================================================
//! ## Overview
//! Runs the binary against a temporary contract directory, graph file, and
//! config file. Every run passes `--config` so the host environment does not
//! leak into the results.

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

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;

use serde_json::Value;
use tempfile::TempDir;

// ============================================================================
// SECTION: Helpers
// ============================================================================

const BILLING_YAML: &str = "\
id: Billing
type: service
category: finance
parts:
  - id: create_invoice
    type: function
dependencies:
  - module_id: Ledger
    parts:
      - part_id: post_entry
        type: function
";

const LEDGER_JSON: &str = r#"{
  "id": "Ledger",
  "type": "service",
  "category": "finance",
  "parts": [{ "id": "post_entry", "type": "function" }]
}"#;

struct Project {
    dir: TempDir,
    config: PathBuf,
}

impl Project {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let contracts = dir.path().join("contracts");
        fs::create_dir_all(&contracts).expect("create contracts");
        fs::write(contracts.join("billing.yml"), BILLING_YAML).expect("write billing");
        fs::write(contracts.join("ledger.json"), LEDGER_JSON).expect("write ledger");
        let config = dir.path().join("contract-graph.toml");
        let body = format!(
            "[registry]\nroot = '{}'\n\n[graph]\npath = '{}'\n",
            contracts.display(),
            dir.path().join("graph.json").display()
        );
        fs::write(&config, body).expect("write config");
        Self {
            dir,
            config,
        }
    }

    fn contracts(&self) -> PathBuf {
        self.dir.path().join("contracts")
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_contract-graph"))
            .arg("--config")
            .arg(&self.config)
            .args(args)
            .env_remove("CONTRACT_GRAPH_LANG")
            .output()
            .expect("run contract-graph")
    }
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is JSON")
}

fn stderr_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn statuses(change_set: &Value) -> Vec<String> {
    change_set["records"]
        .as_array()
        .expect("records")
        .iter()
        .map(|record| {
            format!(
                "{} {}",
                record["status"].as_str().expect("status"),
                record["file_path"].as_str().expect("file_path")
            )
        })
        .collect()
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn diff_apply_and_navigate() {
    let project = Project::new();

    let diff = project.run(&["diff"]);
    assert!(diff.status.success(), "{}", stderr_text(&diff));
    assert_eq!(statuses(&stdout_json(&diff)), vec!["added /billing.yml", "added /ledger.json"]);
    assert!(stderr_text(&diff).contains("2 added, 0 modified, 0 removed."));

    let preview = project.run(&["apply"]);
    assert!(preview.status.success());
    assert!(stdout_json(&preview)["applied"].is_null());
    assert!(stderr_text(&preview).contains("--yes"));
    assert!(!project.dir.path().join("graph.json").exists());

    let apply = project.run(&["apply", "--yes"]);
    assert!(apply.status.success(), "{}", stderr_text(&apply));
    let applied = &stdout_json(&apply)["applied"];
    assert_eq!(applied["modules_processed"], 2);
    assert_eq!(applied["parts_processed"], 2);

    let diff = project.run(&["diff"]);
    assert!(statuses(&stdout_json(&diff)).is_empty());

    let relations = project.run(&["relations", "Ledger"]);
    assert!(relations.status.success());
    let view = stdout_json(&relations);
    assert_eq!(view["incoming"][0]["module_id"], "Billing");
    assert_eq!(view["incoming"][0]["parts"][0]["part_id"], "post_entry");

    let module = project.run(&["module", "--path", "/billing.yml"]);
    assert!(module.status.success());
    assert_eq!(stdout_json(&module)["id"], "Billing");

    let audit = project.run(&["audit-relations"]);
    assert!(audit.status.success());
    assert_eq!(stdout_json(&audit)["consistent"], true);
}

#[test]
fn removed_provider_is_reported_by_relation_audit() {
    let project = Project::new();
    assert!(project.run(&["apply", "--yes"]).status.success());

    let mut graph: Value =
        serde_json::from_slice(&fs::read(project.dir.path().join("graph.json")).expect("read"))
            .expect("graph json");
    assert_eq!(graph["modules"].as_array().expect("modules").len(), 2);

    fs::remove_file(project.contracts().join("ledger.json")).expect("remove ledger");
    let diff = project.run(&["diff"]);
    assert_eq!(statuses(&stdout_json(&diff)), vec!["removed /ledger.json"]);
    assert!(project.run(&["apply", "--yes"]).status.success());

    graph = serde_json::from_slice(&fs::read(project.dir.path().join("graph.json")).expect("read"))
        .expect("graph json");
    assert_eq!(graph["modules"].as_array().expect("modules").len(), 1);

    let audit = project.run(&["audit-relations"]);
    assert!(!audit.status.success());
    let report = stdout_json(&audit);
    assert_eq!(report["consistent"], false);
    assert_eq!(report["issues"][0]["kind"], "missing_module");
}

#[test]
fn validate_exit_code_tracks_validity() {
    let project = Project::new();
    let valid = project.run(&["validate"]);
    assert!(valid.status.success(), "{}", stderr_text(&valid));
    assert_eq!(stdout_json(&valid)["valid"], true);

    fs::write(project.contracts().join("broken.yml"), "id: [unclosed\n").expect("write");
    let invalid = project.run(&["validate"]);
    assert!(!invalid.status.success());
    let summary = stdout_json(&invalid);
    assert_eq!(summary["valid"], false);
    assert_eq!(summary["files"].as_array().expect("files").len(), 3);
    assert!(stderr_text(&invalid).contains("1 of 3"));
}

#[test]
fn unknown_module_fails_with_message() {
    let project = Project::new();
    let output = project.run(&["module", "Nowhere"]);
    assert!(!output.status.success());
    assert!(stderr_text(&output).contains("Nowhere"));
    assert!(output.stdout.is_empty());
}

#[test]
fn config_validate_reports_errors() {
    let project = Project::new();
    let ok = project.run(&["config", "validate"]);
    assert!(ok.status.success());
    assert!(String::from_utf8_lossy(&ok.stdout).contains("Config valid."));

    fs::write(&project.config, "[validation]\nschema = false\nstructural = false\n")
        .expect("rewrite config");
    let rejected = project.run(&["config", "validate"]);
    assert!(!rejected.status.success());
    assert!(stderr_text(&rejected).contains("Failed to load config"));
}

#[test]
fn catalan_output_carries_disclaimer() {
    let project = Project::new();
    let output = project.run(&["--lang", "ca", "diff"]);
    assert!(output.status.success());
    let stderr = stderr_text(&output);
    assert!(stderr.contains("traduïda automàticament"));
    assert!(stderr.contains("2 afegits"));
}

#[test]
fn version_flag_prints_package_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_contract-graph"))
        .arg("--version")
        .env_remove("CONTRACT_GRAPH_LANG")
        .output()
        .expect("run contract-graph");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
    assert!(Path::new(env!("CARGO_BIN_EXE_contract-graph")).exists());
}
