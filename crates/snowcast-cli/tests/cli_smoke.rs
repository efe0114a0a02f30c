//! CLI binary smoke tests using assert_cmd.
//!
//! These tests exercise the compiled `snowcast` binary to verify argument
//! parsing and the demonstration run end-to-end.
use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("snowcast").unwrap()
}

// Integration tests run from the package directory; the shipped fixture
// lives at the workspace root.
const SAMPLE_DATA: &str = "../../sample_data/data.csv";

#[test]
fn help_flag() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("snowcast"))
        .stdout(predicate::str::contains("--model-type"));
}

#[test]
fn version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("snowcast"));
}

#[test]
fn missing_data_file_fails() {
    cmd().arg("no_such_file.csv").assert().failure();
}

#[test]
fn invalid_model_type_fails() {
    cmd()
        .args([SAMPLE_DATA, "--model-type", "perceptron"])
        .assert()
        .failure();
}

#[test]
fn demo_run_with_forced_model() {
    cmd()
        .args([SAMPLE_DATA, "--model-type", "random_forest"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Using model: RandomForest"))
        .stdout(predicate::str::contains("2006/2/19 00:00:00"))
        .stdout(predicate::str::contains("snow will"));
}

#[test]
fn demo_run_with_model_selection() {
    cmd()
        .arg(SAMPLE_DATA)
        .assert()
        .success()
        .stdout(predicate::str::contains("LinearSvm score:"))
        .stdout(predicate::str::contains("RandomForest score:"))
        .stdout(predicate::str::contains("Using model:"))
        .stdout(predicate::str::contains("snow will"));
}
