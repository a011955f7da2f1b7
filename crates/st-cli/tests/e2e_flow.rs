//! End-to-end integration tests for the complete study tracking flow.
//!
//! Tests the full pipeline: add subject → log sessions → dashboard →
//! progress, driving the compiled binary against a temp database.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn st_binary() -> String {
    env!("CARGO_BIN_EXE_st").to_string()
}

/// Run `st` with an isolated HOME and database under `temp`.
fn run_st(temp: &Path, args: &[&str]) -> Output {
    Command::new(st_binary())
        .env("HOME", temp)
        .env("ST_DATABASE_PATH", temp.join("st.db"))
        .args(args)
        .output()
        .expect("failed to run st")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "command should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON")
}

#[test]
fn test_full_flow_add_log_dashboard_progress() {
    let temp = TempDir::new().unwrap();

    // Add a subject with a 7h/week goal (= 60 minutes/day).
    let output = run_st(
        temp.path(),
        &[
            "--user",
            "alice",
            "subject",
            "add",
            "Math",
            "--goal-hours",
            "7",
        ],
    );
    assert!(
        output.status.success(),
        "subject add should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    // Fetch the generated subject ID.
    let subjects = stdout_json(&run_st(
        temp.path(),
        &["--user", "alice", "subject", "list", "--json"],
    ));
    let subjects = subjects.as_array().unwrap();
    assert_eq!(subjects.len(), 1);
    assert_eq!(subjects[0]["name"], "Math");
    assert_eq!(subjects[0]["weekly_goal_hours"], 7.0);
    let subject_id = subjects[0]["id"].as_str().unwrap().to_string();

    // Log 90 minutes today.
    let output = run_st(
        temp.path(),
        &["--user", "alice", "log", &subject_id, "--minutes", "90"],
    );
    assert!(
        output.status.success(),
        "log should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    // Dashboard: 1.5h today, goal reached (and capped) for the subject,
    // 150% of the 1h/day combined goal overall.
    let stats = stdout_json(&run_st(
        temp.path(),
        &["--user", "alice", "dashboard", "--json"],
    ));
    assert_eq!(stats["today_hours"], 1.5);
    assert_eq!(stats["weekly_hours"], 1.5);
    assert_eq!(stats["subject_count"], 1);
    assert_eq!(stats["daily_goal_percentage"], 150.0);
    assert_eq!(stats["subject_progress"][0]["subject_id"], subject_id);
    assert_eq!(stats["subject_progress"][0]["today_minutes"], 90);
    assert_eq!(stats["subject_progress"][0]["percentage"], 100.0);

    // Progress: streak of 1 (today only), chart aligned to the subject list.
    let report = stdout_json(&run_st(
        temp.path(),
        &["--user", "alice", "progress", "--json"],
    ));
    assert_eq!(report["streak_days"], 1);
    assert_eq!(report["chart"]["names"][0], "Math");
    assert_eq!(report["chart"]["hours"][0], 1.5);

    // Delete the subject: sessions survive as orphans, so the day total
    // stands while per-subject views empty out.
    let output = run_st(
        temp.path(),
        &["--user", "alice", "subject", "delete", &subject_id],
    );
    assert!(output.status.success());

    let stats = stdout_json(&run_st(
        temp.path(),
        &["--user", "alice", "dashboard", "--json"],
    ));
    assert_eq!(stats["today_hours"], 1.5);
    assert_eq!(stats["subject_count"], 0);
    assert!(stats["subject_progress"].as_array().unwrap().is_empty());

    let report = stdout_json(&run_st(
        temp.path(),
        &["--user", "alice", "progress", "--json"],
    ));
    assert!(report["chart"]["names"].as_array().unwrap().is_empty());
}

#[test]
fn test_commands_require_a_user() {
    let temp = TempDir::new().unwrap();
    let output = run_st(temp.path(), &["dashboard"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("no user given"),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn test_default_user_comes_from_environment() {
    let temp = TempDir::new().unwrap();
    let output = Command::new(st_binary())
        .env("HOME", temp.path())
        .env("ST_DATABASE_PATH", temp.path().join("st.db"))
        .env("ST_DEFAULT_USER", "alice")
        .args(["subject", "add", "History"])
        .output()
        .expect("failed to run st");

    assert!(
        output.status.success(),
        "add with default user should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn test_subjects_are_isolated_per_user() {
    let temp = TempDir::new().unwrap();

    let output = run_st(temp.path(), &["--user", "alice", "subject", "add", "Math"]);
    assert!(output.status.success());

    let subjects = stdout_json(&run_st(
        temp.path(),
        &["--user", "bob", "subject", "list", "--json"],
    ));
    assert!(subjects.as_array().unwrap().is_empty());
}

#[test]
fn test_goal_lifecycle() {
    let temp = TempDir::new().unwrap();

    let output = run_st(
        temp.path(),
        &[
            "--user",
            "alice",
            "goal",
            "add",
            "Finish calculus",
            "--target-date",
            "2026-01-31",
        ],
    );
    assert!(
        output.status.success(),
        "goal add should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let goals = stdout_json(&run_st(
        temp.path(),
        &["--user", "alice", "goal", "list", "--json"],
    ));
    let goals = goals.as_array().unwrap();
    assert_eq!(goals.len(), 1);
    assert_eq!(goals[0]["title"], "Finish calculus");
    assert_eq!(goals[0]["is_completed"], false);
    let goal_id = goals[0]["id"].as_str().unwrap().to_string();

    let output = run_st(temp.path(), &["--user", "alice", "goal", "complete", &goal_id]);
    assert!(output.status.success());

    let goals = stdout_json(&run_st(
        temp.path(),
        &["--user", "alice", "goal", "list", "--json"],
    ));
    assert_eq!(goals[0]["is_completed"], true);
}
