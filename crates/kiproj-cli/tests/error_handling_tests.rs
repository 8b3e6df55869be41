//! Tests for error handling and suggestions.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_error_invalid_project_name() {
    let temp = tempfile::TempDir::new().unwrap();
    let mut cmd = cargo_bin_cmd!("kiproj");
    cmd.current_dir(temp.path()).env("NO_COLOR", "1").arg(".hidden");

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid project name"))
        .stderr(predicate::str::contains("Suggestions:"));
}

#[test]
fn test_error_reserved_character_in_name() {
    let temp = tempfile::TempDir::new().unwrap();
    let mut cmd = cargo_bin_cmd!("kiproj");
    cmd.current_dir(temp.path()).arg("what?");

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid project name"));
    assert!(std::fs::read_dir(temp.path()).unwrap().next().is_none());
}

#[test]
fn test_error_missing_project_name() {
    let mut cmd = cargo_bin_cmd!("kiproj");
    cmd.arg("--no-submodules");

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("No project name given"));
}

#[test]
fn test_error_unknown_config_key() {
    let temp = tempfile::TempDir::new().unwrap();
    let config = temp.path().join("kiproj.toml");
    std::fs::write(&config, "").unwrap();

    let mut cmd = cargo_bin_cmd!("kiproj");
    cmd.args(["config", "get", "no.such.key"])
        .env("KIPROJ_CONFIG", &config);

    cmd.assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));
}

#[test]
fn test_error_unknown_flag_is_usage_error() {
    let mut cmd = cargo_bin_cmd!("kiproj");
    cmd.args(["demo", "--no-such-flag"]);

    cmd.assert().code(2);
}
