//! Config load validation tests for contract-graph-config.
// crates/contract-graph-config/tests/load_validation.rs
// =============================================================================
// Module: Config Load Validation Tests
// Description: Validate config loading guards (path, size, encoding).
// Purpose: Ensure config input handling is strict and fail-closed.
// =============================================================================

use std::io::Write;
use std::path::Path;

use contract_graph_config::ConfigError;
use contract_graph_config::ContractGraphConfig;
use tempfile::NamedTempFile;

type TestResult = Result<(), String>;

fn assert_invalid(result: Result<ContractGraphConfig, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config load".to_string()),
    }
}

fn write_config(contents: &str) -> Result<NamedTempFile, String> {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(contents.as_bytes()).map_err(|err| err.to_string())?;
    Ok(file)
}

#[test]
fn load_rejects_path_too_long() -> TestResult {
    let long_path = "a".repeat(5_000);
    let path = Path::new(&long_path);
    assert_invalid(ContractGraphConfig::load(Some(path)), "config path exceeds max length")?;
    Ok(())
}

#[test]
fn load_rejects_path_component_too_long() -> TestResult {
    let long_component = "a".repeat(300);
    let path = Path::new(&long_component);
    assert_invalid(ContractGraphConfig::load(Some(path)), "config path component too long")?;
    Ok(())
}

#[test]
fn load_rejects_missing_explicit_file() -> TestResult {
    let dir = tempfile::tempdir().map_err(|err| err.to_string())?;
    let path = dir.path().join("absent.toml");
    assert_invalid(ContractGraphConfig::load(Some(&path)), "config io error")?;
    Ok(())
}

#[test]
fn load_rejects_oversized_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    let payload = vec![b'a'; 1_048_577];
    file.write_all(&payload).map_err(|err| err.to_string())?;
    assert_invalid(ContractGraphConfig::load(Some(file.path())), "config file exceeds size limit")?;
    Ok(())
}

#[test]
fn load_rejects_non_utf8_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(&[0xFF, 0xFE, 0xFF]).map_err(|err| err.to_string())?;
    assert_invalid(ContractGraphConfig::load(Some(file.path())), "config file must be utf-8")?;
    Ok(())
}

#[test]
fn load_rejects_unknown_sections() -> TestResult {
    let file = write_config("[server]\nbind = \"127.0.0.1:0\"\n")?;
    assert_invalid(ContractGraphConfig::load(Some(file.path())), "config parse error")?;
    Ok(())
}

#[test]
fn load_reads_all_sections() -> TestResult {
    let file = write_config(
        r#"
[registry]
root = "defs"
extensions = ["yaml"]
max_file_bytes = 4096
max_files = 10

[graph]
path = "state/graph.json"

[validation]
schema = false

[audit]
enabled = true
path = "audit.jsonl"
"#,
    )?;
    let config = ContractGraphConfig::load(Some(file.path())).map_err(|err| err.to_string())?;
    if config.registry.root != "defs" || config.registry.extensions != vec!["yaml".to_string()] {
        return Err("registry paths not applied".to_string());
    }
    if config.registry.max_file_bytes != 4096 || config.registry.max_files != 10 {
        return Err("registry limits not applied".to_string());
    }
    if config.graph.path != "state/graph.json" {
        return Err("graph path not applied".to_string());
    }
    if config.validation.schema || !config.validation.structural {
        return Err("validation toggles not applied".to_string());
    }
    if !config.audit.enabled || config.audit.path.as_deref() != Some("audit.jsonl") {
        return Err("audit config not applied".to_string());
    }
    Ok(())
}

#[test]
fn empty_file_uses_defaults() -> TestResult {
    let file = write_config("")?;
    let config = ContractGraphConfig::load(Some(file.path())).map_err(|err| err.to_string())?;
    if config != ContractGraphConfig::default() {
        return Err("empty config should equal defaults".to_string());
    }
    Ok(())
}
