//! Tests running the `scimq` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

/// Runs scimq with an isolated config location.
fn scimq(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_scimq"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("SCIMQ_CONFIG")
        .output()
        .expect("failed to run scimq")
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

fn stderr_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stderr).expect("stderr is not JSON")
}

#[test]
fn test_filter_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("config.toml");

    let output = scimq(
        &config,
        &["--json", "filter", "title pr and userType eq \"Employee\""],
    );
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["type"], "and");
    assert_eq!(json["operands"][0]["type"], "presence");
    assert_eq!(json["operands"][1]["operator"], "eq");
    assert_eq!(json["operands"][1]["value"], "Employee");
}

#[test]
fn test_filter_tree_output() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("config.toml");

    let output = scimq(&config, &["--no-color", "filter", "a pr or b pr"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "or\n├── a pr\n└── b pr\n"
    );
}

#[test]
fn test_path_json_output() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("config.toml");

    let output = scimq(&config, &["--json", "path", "emails[type eq \"work\"].value"]);
    assert!(output.status.success());

    let json = stdout_json(&output);
    assert_eq!(json["elements"][0]["attribute"], "emails");
    assert_eq!(json["elements"][0]["value_filter"]["type"], "comparison");
    assert_eq!(json["elements"][1]["attribute"], "value");
}

#[test]
fn test_parse_error_json() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("config.toml");

    let output = scimq(&config, &["--json", "path", "bad name"]);
    assert_eq!(output.status.code(), Some(1));

    let json = stderr_json(&output);
    assert_eq!(json["error"]["code"], "PARSE_ERROR");
    assert_eq!(json["error"]["offset"], 3);
}

#[test]
fn test_parse_error_text() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("config.toml");

    let output = scimq(&config, &["filter", "(a pr"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8(output.stderr).unwrap().starts_with("Error: parse error:"));
}

#[test]
fn test_allow_flag_and_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("config.toml");

    let output = scimq(&config, &["--json", "filter", "name;lang pr"]);
    assert_eq!(output.status.code(), Some(1));

    let output = scimq(&config, &["--json", "--allow", ";", "filter", "name;lang pr"]);
    assert!(output.status.success());

    fs::write(&config, "[parser]\nextended = [\";\"]\n").unwrap();
    let output = scimq(&config, &["--json", "filter", "name;lang pr"]);
    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output)["path"]["elements"][0]["attribute"],
        "name;lang"
    );
}

#[test]
fn test_config_init_and_show() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("scimq").join("config.toml");

    let output = scimq(&config, &["config", "init"]);
    assert!(output.status.success());
    assert!(config.exists());

    let output = scimq(&config, &["config", "init"]);
    assert_eq!(output.status.code(), Some(5));

    let output = scimq(&config, &["config", "init", "--force"]);
    assert!(output.status.success());

    let output = scimq(&config, &["--json", "--allow", "#", "config", "show"]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["exists"], true);
    assert_eq!(json["config"]["version"], 1);
    assert_eq!(json["config"]["parser"]["extended"], serde_json::json!(["#"]));
}

#[test]
fn test_config_path() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("custom.toml");

    let output = scimq(&config, &["config", "path"]);
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap().trim(),
        config.display().to_string()
    );
}

#[test]
fn test_invalid_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("config.toml");
    fs::write(&config, "version = [").unwrap();

    let output = scimq(&config, &["--json", "filter", "a pr"]);
    assert_eq!(output.status.code(), Some(5));
    assert_eq!(stderr_json(&output)["error"]["code"], "CONFIG_ERROR");

    // Path still resolves with a broken file.
    let output = scimq(&config, &["config", "path"]);
    assert!(output.status.success());
}

#[test]
fn test_completions() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("config.toml");

    let output = scimq(&config, &["completions", "bash"]);
    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout).unwrap().contains("scimq"));
}
