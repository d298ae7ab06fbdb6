//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. Advice runs
//! use `--offline` so no network or API key is needed.

use std::process::Command;

/// Run a CLI command and return (code, stdout, stderr).
fn run_cli(args: &[&str]) -> (i32, String, String) {
    let output = Command::new("cargo")
        .args(["run", "-q", "-p", "cyclewise-cli", "--"])
        .args(args)
        .env("CYCLEWISE_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn run_json(args: &[&str]) -> serde_json::Value {
    let (code, stdout, stderr) = run_cli(args);
    assert_eq!(code, 0, "command {args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("stdout is not JSON")
}

#[test]
fn test_advise_offline_json() {
    let advice = run_json(&[
        "advise",
        "schedule an important client presentation",
        "--phase",
        "ovulation",
        "--locale",
        "en",
        "--offline",
        "--json",
    ]);
    assert_eq!(advice["verdict"], "good");
    assert_eq!(advice["source"], "fallback");
    assert!(advice["confidence"].as_f64().is_some());
}

#[test]
fn test_advise_unknown_phase_is_neutral() {
    let advice = run_json(&[
        "advise", "anything", "--phase", "phase7", "--locale", "en", "--offline", "--json",
    ]);
    assert_eq!(advice["verdict"], "ok");
    assert_eq!(advice["reason"], "insufficient data");
    assert_eq!(advice["suggestion"], "go by how you feel");
}

#[test]
fn test_advise_blank_task_fails() {
    let (code, _, stderr) = run_cli(&["advise", "  ", "--phase", "luteal", "--offline"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("task must not be empty"));
}

#[test]
fn test_advise_human_output() {
    let (code, stdout, _) = run_cli(&[
        "advise",
        "kick off a new project",
        "--phase",
        "luteal",
        "--locale",
        "en",
        "--offline",
    ]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Verdict:    avoid"));
    assert!(stdout.contains("(fallback)"));
}

#[test]
fn test_search_json() {
    let hits = run_json(&["search", "presentation", "--phase", "ovulation", "--limit", "5", "--json"]);
    let hits = hits.as_array().unwrap();
    assert!(!hits.is_empty());
    assert_eq!(hits[0]["phase"], "ovulation");
    assert!(hits[0]["relevance_score"].as_f64().is_some());
}

#[test]
fn test_search_no_match() {
    let hits = run_json(&["search", "xyzzy", "--json"]);
    assert_eq!(hits.as_array().map(Vec::len), Some(0));
}

#[test]
fn test_phase_list_json() {
    let phases = run_json(&["phase", "list", "--json"]);
    let phases = phases.as_object().unwrap();
    assert_eq!(phases.len(), 4);
    assert!(phases.contains_key("luteal"));
}

#[test]
fn test_phase_show_unknown_fails() {
    let (code, _, stderr) = run_cli(&["phase", "show", "phase7"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("phase not found"));
}

#[test]
fn test_health_json() {
    let health = run_json(&["health", "--json"]);
    assert_eq!(health["status"], "ok");
    assert_eq!(health["knowledge_phases"], 4);
}

#[test]
fn test_config_get_unknown_key_fails() {
    let (code, _, stderr) = run_cli(&["config", "get", "no.such.key"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown key"));
}
