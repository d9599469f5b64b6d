//! End-to-end tests for the `regula` binary.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A command isolated from the user's config file and terminal colors.
fn regula(config_dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("regula").unwrap();
    cmd.env("REGULA_CONFIG", config_dir.join("config.json"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

// =============================================================================
// SOLVE
// =============================================================================

#[test]
fn bisection_table_shows_trace_and_root() {
    let dir = TempDir::new().unwrap();

    regula(dir.path())
        .args(["solve", "bisection", "-e", "x^2 - 4", "--low", "0", "--high", "3"])
        .args(["--precision", "0.01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bisection Method"))
        .stdout(predicate::str::contains("f(xm)"))
        .stdout(predicate::str::contains("Root ≈ 1.9997 after 11 iterations"));
}

#[test]
fn newton_json_includes_steps_and_derivative() {
    let dir = TempDir::new().unwrap();

    let output = regula(dir.path())
        .args(["--format", "json", "solve", "newton", "-e", "x^3 - x - 2"])
        .args(["--x0", "1.5", "--precision", "0.0001"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["method"], "newton_raphson");
    assert_eq!(json["root"], 1.5214);
    assert_eq!(json["derivative"], "3 * x^2 - 1");
    assert_eq!(json["trace"]["rows"].as_array().unwrap().len(), 4);
    assert_eq!(json["steps"].as_array().unwrap().len(), 12);
    assert!(json["failure"].is_null());
}

#[test]
fn newton_table_prints_worked_steps() {
    let dir = TempDir::new().unwrap();

    regula(dir.path())
        .args(["solve", "newton", "-e", "x^3 - x - 2", "--x0", "1.5", "--steps"])
        .args(["-p", "0.0001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("N/A"))
        .stdout(predicate::str::contains("To solve for next x"))
        .stdout(predicate::str::contains("For the next relative error"));
}

#[test]
fn same_sign_bracket_fails_with_tag() {
    let dir = TempDir::new().unwrap();

    regula(dir.path())
        .args(["solve", "bisection", "-e", "x^2 + 1", "--low", "0", "--high", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("InvalidBracketError"));
}

#[test]
fn flat_secant_fails_after_first_row() {
    let dir = TempDir::new().unwrap();

    regula(dir.path())
        .args(["solve", "secant", "-e", "x^2 - 4", "--xa", "-1", "--xb", "1"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("N/A"))
        .stderr(predicate::str::contains("DivisionByZeroError"));
}

#[test]
fn parse_error_is_reported() {
    let dir = TempDir::new().unwrap();

    regula(dir.path())
        .args(["solve", "newton", "-e", "x^2 +", "--x0", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ParseError"));
}

#[test]
fn minimal_prints_only_the_root() {
    let dir = TempDir::new().unwrap();

    regula(dir.path())
        .args(["-f", "minimal", "solve", "false-position", "-e", "2x - 3"])
        .args(["--low", "0", "--high", "4"])
        .assert()
        .success()
        .stdout("1.5000\n");
}

#[test]
fn csv_prints_raw_records() {
    let dir = TempDir::new().unwrap();

    regula(dir.path())
        .args(["-f", "csv", "solve", "bisection", "-e", "x^2 - 4", "--low", "0", "--high", "3"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "index,x_low,x_mid,x_high,f_low,f_mid,f_high",
        ));
}

#[test]
fn reveal_streams_rows() {
    let dir = TempDir::new().unwrap();

    regula(dir.path())
        .args(["solve", "secant", "-e", "x^2 - 2", "--xa", "1", "--xb", "2"])
        .args(["--reveal-ms", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Relative Error"))
        .stdout(predicate::str::contains("Root ≈ 1.4142"));
}

#[test]
fn revealed_newton_prints_worked_steps() {
    let dir = TempDir::new().unwrap();

    regula(dir.path())
        .args(["solve", "newton", "-e", "x^3 - x - 2", "--x0", "1.5", "--steps"])
        .args(["-p", "0.0001", "--reveal-ms", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("To solve for next x"))
        .stdout(predicate::str::contains(
            "x = x - f(x) / f'(x) = 1.5 - (-0.125) / (5.75) = 1.5217",
        ))
        .stdout(predicate::str::contains("For the next relative error"))
        .stdout(predicate::str::contains("Root ≈ 1.5214 after 4 iterations"));
}

#[test]
fn nested_equation_is_rejected_without_crashing() {
    let dir = TempDir::new().unwrap();
    let deep = format!("{}x{}", "(".repeat(20_000), ")".repeat(20_000));

    regula(dir.path())
        .args(["solve", "newton", "--x0", "1", "-e"])
        .arg(&deep)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("ParseError"));
}

#[test]
fn round_none_is_accepted() {
    let dir = TempDir::new().unwrap();

    regula(dir.path())
        .args(["-f", "json", "solve", "bisection", "-e", "x - 1", "--low", "0", "--high", "2"])
        .args(["--round", "none"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"root\": 1.0"));
}

// =============================================================================
// EVAL / DERIVE / RUN
// =============================================================================

#[test]
fn eval_at_several_points() {
    let dir = TempDir::new().unwrap();

    regula(dir.path())
        .args(["-f", "minimal", "eval", "-e", "x^2 - 4", "-x", "3", "-2"])
        .assert()
        .success()
        .stdout("5\n0\n");
}

#[test]
fn eval_reports_division_by_zero() {
    let dir = TempDir::new().unwrap();

    regula(dir.path())
        .args(["-f", "minimal", "eval", "-e", "1 / x", "-x", "0"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("error:"));
}

#[test]
fn derive_prints_derivative() {
    let dir = TempDir::new().unwrap();

    regula(dir.path())
        .args(["-f", "minimal", "derive", "-e", "x^3 - x - 2"])
        .assert()
        .success()
        .stdout("3 * x^2 - 1\n");

    regula(dir.path())
        .args(["-f", "minimal", "derive", "-e", "x^3 - x - 2", "--at", "2"])
        .assert()
        .success()
        .stdout("11\n");
}

#[test]
fn run_reads_toml_request() {
    let dir = TempDir::new().unwrap();
    let request = dir.path().join("request.toml");
    std::fs::write(
        &request,
        r#"
equation = "x^2 - 4"
method = "bisection"

[params]
kind = "bracket"
x_low = 0.0
x_high = 3.0

[config]
precision = 0.01
"#,
    )
    .unwrap();

    regula(dir.path())
        .args(["-f", "minimal", "run"])
        .arg(&request)
        .assert()
        .success()
        .stdout("1.9997\n");
}

// =============================================================================
// CONFIG
// =============================================================================

#[test]
fn config_set_get_and_reset() {
    let dir = TempDir::new().unwrap();

    regula(dir.path())
        .args(["config", "set", "precision", "0.001"])
        .assert()
        .success();

    regula(dir.path())
        .args(["-f", "minimal", "config", "get", "precision"])
        .assert()
        .success()
        .stdout("0.001\n");

    regula(dir.path())
        .args(["config", "reset", "precision"])
        .assert()
        .success();

    regula(dir.path())
        .args(["-f", "minimal", "config", "get", "precision"])
        .assert()
        .success()
        .stdout("0.1\n");
}

#[test]
fn config_rejects_invalid_values() {
    let dir = TempDir::new().unwrap();

    regula(dir.path())
        .args(["config", "set", "rounding", "9"])
        .assert()
        .failure();

    regula(dir.path())
        .args(["config", "set", "unknown_key", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[test]
fn config_defaults_apply_to_solve() {
    let dir = TempDir::new().unwrap();

    regula(dir.path())
        .args(["config", "set", "rounding", "2"])
        .assert()
        .success();
    regula(dir.path())
        .args(["config", "set", "default_format", "minimal"])
        .assert()
        .success();

    regula(dir.path())
        .args(["solve", "false-position", "-e", "2x - 3", "--low", "0", "--high", "4"])
        .assert()
        .success()
        .stdout("1.50\n");
}
