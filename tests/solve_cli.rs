use assert_cmd::prelude::*;
use predicates::prelude::*;
use serde_json::json;
use std::io::Write;
use std::process::{Command, Stdio};

use makiaveli::{ErrorKind, SolveResponse};

fn run_with_stdin(input: &str, args: &[&str]) -> std::process::Output {
    let mut cmd = Command::cargo_bin("solve-cli").expect("binary exists");
    cmd.args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = cmd.spawn().expect("spawn");
    {
        let stdin = child.stdin.as_mut().expect("stdin");
        stdin.write_all(input.as_bytes()).expect("write stdin");
    }
    child.wait_with_output().expect("wait output")
}

#[test]
fn solve_over_stdin_json() {
    let request = json!({
        "hand": ["3S", "4S", "5S"],
        "floor_groups": [["7H", "7D", "7C"]],
        "cross": ["2S"],
    })
    .to_string();

    let out = run_with_stdin(&request, &[]);
    assert!(out.status.success());

    let resp: SolveResponse = serde_json::from_slice(&out.stdout).expect("response JSON");
    assert!(resp.solvable);
    assert!(resp.error.is_none());
    assert!(resp.remaining_cross.expect("remaining_cross").is_empty());
    assert_eq!(resp.steps.expect("steps").len(), 1);
}

#[test]
fn solve_from_input_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    let request = json!({ "hand": ["QS", "KS"], "cross": ["AS"] });
    write!(file, "{request}").expect("write request");

    let mut cmd = Command::cargo_bin("solve-cli").expect("binary exists");
    cmd.arg("--input").arg(file.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"solvable\":true"));
}

#[test]
fn text_report_for_a_solution() {
    let request = json!({
        "hand": ["3S", "4S", "5S"],
        "floor_groups": [["7H", "7D", "7C"]],
        "cross": ["2S"],
    })
    .to_string();

    let out = run_with_stdin(&request, &["--format", "text"]);
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).expect("utf8");
    assert!(stdout.contains("Solution found"));
    assert!(stdout.contains("Target layout:"));
    assert!(stdout.contains("Steps (1):"));
}

#[test]
fn text_report_for_no_solution() {
    let request = json!({ "hand": ["2H"] }).to_string();
    let out = run_with_stdin(&request, &["--format", "text"]);
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).expect("utf8");
    assert!(stdout.contains("No solution found"));
}

#[test]
fn validate_mode_reports_group_kind() {
    let mut cmd = Command::cargo_bin("solve-cli").expect("binary exists");
    cmd.args(["--validate", "QS", "KS", "AS"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"valid\": true"))
        .stdout(predicate::str::contains("\"group_type\": \"run\""));

    let mut cmd = Command::cargo_bin("solve-cli").expect("binary exists");
    cmd.args(["--validate", "KS", "AS", "2S"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"valid\": false"));
}

#[test]
fn malformed_code_surfaces_in_the_response() {
    let request = json!({ "hand": ["ZZ"] }).to_string();
    let out = run_with_stdin(&request, &[]);
    assert!(out.status.success());

    let resp: SolveResponse = serde_json::from_slice(&out.stdout).expect("response JSON");
    assert!(!resp.solvable);
    assert_eq!(resp.error, Some(ErrorKind::MalformedCode));
}

#[test]
fn deadline_flag_overrides_the_request() {
    // pathological overlapping pool from the timeout scenario
    let mut hand: Vec<String> = Vec::new();
    for suit in ["S", "H"] {
        for rank in ["A", "2", "3", "4", "5", "6", "7", "8", "9"] {
            for _ in 0..2 {
                hand.push(format!("{rank}{suit}"));
            }
        }
    }
    hand.push("KC".to_string());
    let request = json!({ "hand": hand }).to_string();

    let out = run_with_stdin(&request, &["--deadline-ms", "1"]);
    assert!(out.status.success());
    let resp: SolveResponse = serde_json::from_slice(&out.stdout).expect("response JSON");
    assert_eq!(resp.error, Some(ErrorKind::Timeout));
}
