//! Basic CLI E2E tests.
//!
//! Tests invoke the built `studyplan` binary against a temporary data
//! directory and verify outputs.

use std::path::Path;
use std::process::Command;

use serde_json::Value;

/// Run a CLI command with `home` as the data directory and return
/// (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_studyplan"))
        .args(args)
        .env("STUDYPLAN_HOME", home)
        .env_remove("STUDYPLAN_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(home: &Path, args: &[&str]) -> Value {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

/// Day, start and subject of every generated block, ids left out.
fn layout(week: &Value) -> Vec<(String, String, String)> {
    week.as_array()
        .unwrap()
        .iter()
        .flat_map(|day| day["blocks"].as_array().unwrap().iter())
        .map(|b| {
            (
                b["day"].as_str().unwrap().to_string(),
                b["startTime"].as_str().unwrap().to_string(),
                b["subject"].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

fn subject_id(home: &Path, name: &str) -> String {
    let subjects = run_json(home, &["subject", "list"]);
    subjects
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["name"] == name)
        .unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string()
}

#[test]
fn test_first_run_uses_sample_catalog() {
    let home = tempfile::tempdir().unwrap();
    let subjects = run_json(home.path(), &["subject", "list"]);
    assert_eq!(subjects.as_array().unwrap().len(), 5);
    assert!(home.path().join("config.toml").exists());
}

#[test]
fn test_subject_add_persists() {
    let home = tempfile::tempdir().unwrap();
    let subject = run_json(
        home.path(),
        &["subject", "add", "Biology", "--color", "#22C55E", "--total-hours", "20"],
    );
    assert_eq!(subject["name"], "Biology");
    assert_eq!(subject["priority"], 2);
    assert!(home.path().join("state.json").exists());

    let subjects = run_json(home.path(), &["subject", "list"]);
    assert_eq!(subjects.as_array().unwrap().len(), 6);
}

#[test]
fn test_subject_add_rejects_completed_above_total() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(
        home.path(),
        &[
            "subject", "add", "Biology", "--color", "#22C55E", "--total-hours", "5",
            "--completed-hours", "6",
        ],
    );
    assert_eq!(code, 1);
    assert!(stderr.starts_with("error:"), "{stderr}");
}

#[test]
fn test_subject_rename_cascades() {
    let home = tempfile::tempdir().unwrap();
    let id = subject_id(home.path(), "Mathematics");
    run_json(home.path(), &["subject", "update", &id, "--name", "Maths"]);

    let tasks = run_json(home.path(), &["task", "list"]);
    assert!(tasks.as_array().unwrap().iter().any(|t| t["subject"] == "Maths"));
    assert!(!tasks.as_array().unwrap().iter().any(|t| t["subject"] == "Mathematics"));
}

#[test]
fn test_unknown_id_fails() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["task", "delete", "missing"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("not found"), "{stderr}");
}

#[test]
fn test_task_add_uses_subject_color() {
    let home = tempfile::tempdir().unwrap();
    let task = run_json(
        home.path(),
        &["task", "add", "Past paper", "--subject", "Physics", "--due", "2025-05-01"],
    );
    assert_eq!(task["status"], "To Do");
    assert_eq!(task["subjectColor"], "#3B82F6");
    assert_eq!(task["estimatedMinutes"], 60);
}

#[test]
fn test_task_add_unknown_subject_needs_color() {
    let home = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(
        home.path(),
        &["task", "add", "Scales", "--subject", "Music", "--due", "2025-05-01"],
    );
    assert_eq!(code, 1);

    let task = run_json(
        home.path(),
        &[
            "task", "add", "Scales", "--subject", "Music", "--color", "#111111", "--due",
            "2025-05-01",
        ],
    );
    assert_eq!(task["subject"], "Music");
}

#[test]
fn test_task_complete_and_reopen() {
    let home = tempfile::tempdir().unwrap();
    let tasks = run_json(home.path(), &["task", "list"]);
    let id = tasks[0]["id"].as_str().unwrap().to_string();

    let done = run_json(home.path(), &["task", "complete", &id]);
    assert_eq!(done["status"], "Completed");
    assert!(done["completedAt"].is_string());

    let reopened = run_json(home.path(), &["task", "update", &id, "--status", "todo"]);
    assert_eq!(reopened["status"], "To Do");
    assert!(reopened["completedAt"].is_null());
}

#[test]
fn test_task_list_filter_and_sort() {
    let home = tempfile::tempdir().unwrap();
    let in_progress = run_json(home.path(), &["task", "list", "--status", "In Progress"]);
    assert_eq!(in_progress.as_array().unwrap().len(), 1);

    let by_priority = run_json(home.path(), &["task", "list", "--sort", "priority"]);
    assert_eq!(by_priority[0]["priority"], "High");
    assert_eq!(by_priority[3]["priority"], "Medium");
}

#[test]
fn test_block_add_rejects_inverted_range() {
    let home = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(
        home.path(),
        &["block", "add", "friday", "10:00", "09:00", "--subject", "English"],
    );
    assert_eq!(code, 1);

    let block = run_json(
        home.path(),
        &["block", "add", "fri", "09:00", "10:00", "--subject", "English"],
    );
    assert_eq!(block["day"], "Friday");
    assert_eq!(block["startTime"], "09:00");
}

#[test]
fn test_timetable_generate_is_reproducible_with_seed() {
    let home = tempfile::tempdir().unwrap();
    let a = run_json(home.path(), &["timetable", "generate", "--seed", "7"]);
    let b = run_json(home.path(), &["timetable", "generate", "--seed", "7"]);
    assert_eq!(layout(&a), layout(&b));

    let week = a.as_array().unwrap();
    assert_eq!(week.len(), 7);
    for day in &week[..5] {
        let blocks = day["blocks"].as_array().unwrap();
        assert!((2..=3).contains(&blocks.len()));
    }

    let shown = run_json(home.path(), &["timetable", "show"]);
    assert_eq!(shown, b);
}

#[test]
fn test_suggest_appends_tasks() {
    let home = tempfile::tempdir().unwrap();
    let suggested = run_json(home.path(), &["suggest", "--seed", "1"]);
    let suggested = suggested.as_array().unwrap();
    assert_eq!(suggested.len(), 3);
    let subjects: Vec<_> = suggested.iter().map(|t| t["subject"].as_str().unwrap()).collect();
    assert_eq!(subjects, ["Physics", "English", "Mathematics"]);

    let tasks = run_json(home.path(), &["task", "list"]);
    assert_eq!(tasks.as_array().unwrap().len(), 7);
}

#[test]
fn test_repeated_seeded_suggest_keeps_state_loadable() {
    let home = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(home.path(), &["config", "set", "seed", "7"]);
    assert_eq!(code, 0);

    let first = run_json(home.path(), &["suggest"]);
    let second = run_json(home.path(), &["suggest"]);
    assert_eq!(first[0]["title"], second[0]["title"]);
    assert_ne!(first[0]["id"], second[0]["id"]);

    let tasks = run_json(home.path(), &["task", "list"]);
    assert_eq!(tasks.as_array().unwrap().len(), 10);
    run_json(home.path(), &["timetable", "generate"]);
    run_json(home.path(), &["timetable", "generate"]);
    run_json(home.path(), &["block", "list"]);
}

#[test]
fn test_progress_and_dashboard() {
    let home = tempfile::tempdir().unwrap();
    let report = run_json(home.path(), &["progress"]);
    assert_eq!(report["overallProgress"], 29);
    assert_eq!(report["totalTasks"], 4);

    let dashboard = run_json(home.path(), &["dashboard", "--date", "2025-04-15"]);
    assert_eq!(dashboard["weekday"], "Tuesday");
    assert_eq!(dashboard["dueToday"].as_array().unwrap().len(), 1);
}

#[test]
fn test_config_get_set() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "suggestions.count"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "3");

    let (_, _, code) = run_cli(home.path(), &["config", "set", "suggestions.count", "2"]);
    assert_eq!(code, 0);
    let suggested = run_json(home.path(), &["suggest"]);
    assert_eq!(suggested.as_array().unwrap().len(), 2);

    let (_, _, code) = run_cli(home.path(), &["config", "get", "ui.dark_mode"]);
    assert_eq!(code, 1);
}

#[test]
fn test_reset_restores_sample() {
    let home = tempfile::tempdir().unwrap();
    let id = subject_id(home.path(), "English");
    run_cli(home.path(), &["subject", "delete", &id]);
    assert_eq!(run_json(home.path(), &["subject", "list"]).as_array().unwrap().len(), 4);

    let (_, _, code) = run_cli(home.path(), &["reset"]);
    assert_eq!(code, 0);
    assert_eq!(run_json(home.path(), &["subject", "list"]).as_array().unwrap().len(), 5);
}

#[test]
fn test_explicit_state_path() {
    let home = tempfile::tempdir().unwrap();
    let state = home.path().join("other").join("plan.json");
    let state = state.to_str().unwrap();
    run_json(
        home.path(),
        &["--state", state, "subject", "add", "Art", "--color", "#ABCDEF", "--total-hours", "3"],
    );
    assert!(Path::new(state).exists());
    assert!(!home.path().join("state.json").exists());
}

#[test]
fn test_completions() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("studyplan"));
}
