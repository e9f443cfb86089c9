//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory.

use std::path::Path;
use std::process::Command;

const DATE: &str = "2024-03-06";

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_wellplan"))
        .env("WELLPLAN_HOME", home)
        .env_remove("WELLPLAN_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(home: &Path, args: &[&str]) -> serde_json::Value {
    let (stdout, stderr, code) = run_cli(home, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

fn checkin(home: &Path) -> serde_json::Value {
    run_json(
        home,
        &[
            "checkin", "--sleep", "8", "--wake", "07:10", "--energy", "4", "--date", DATE,
        ],
    )
}

#[test]
fn test_checkin_plans_the_day() {
    let home = tempfile::tempdir().unwrap();
    let out = checkin(home.path());

    assert_eq!(out["energy"]["morning"], 4);
    assert_eq!(out["energy"]["afternoon"], 5);
    let tasks = out["tasks"].as_array().unwrap();
    let workout = tasks.iter().find(|t| t["type"] == "workout").unwrap();
    assert_eq!(workout["slot"], "afternoon");
    assert_eq!(workout["status"], "planned");
}

#[test]
fn test_checkin_rejects_out_of_range() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(
        home.path(),
        &["checkin", "--sleep", "20", "--wake", "07:00", "--energy", "3"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"), "stderr: {stderr}");
}

#[test]
fn test_plan_show_matches_checkin() {
    let home = tempfile::tempdir().unwrap();
    let out = checkin(home.path());
    let shown = run_json(home.path(), &["plan", "show", "--date", DATE]);
    assert_eq!(shown["tasks"], out["tasks"]);
}

#[test]
fn test_task_done_and_report() {
    let home = tempfile::tempdir().unwrap();
    let out = checkin(home.path());
    let id = out["tasks"][0]["task_id"].as_str().unwrap().to_string();

    let done = run_json(home.path(), &["task", "done", &id]);
    assert_eq!(done["status"], "done");

    let history = run_json(home.path(), &["task", "history", &id]);
    assert_eq!(history[0]["event"], "done");

    let report = run_json(home.path(), &["report", "--date", DATE]);
    assert_eq!(report["streak"], 1);
    assert_eq!(report["done_this_week"], 1);
}

#[test]
fn test_task_move() {
    let home = tempfile::tempdir().unwrap();
    let out = checkin(home.path());
    let id = out["tasks"][0]["task_id"].as_str().unwrap().to_string();

    let moved = run_json(home.path(), &["task", "move", &id, "evening"]);
    assert_eq!(moved["slot"], "evening");
}

#[test]
fn test_unknown_task_fails() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["task", "done", "nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("nope"), "stderr: {stderr}");
}

#[test]
fn test_plan_week_auto() {
    let home = tempfile::tempdir().unwrap();
    let week = run_json(home.path(), &["plan", "week", "--auto", "--date", DATE]);
    let days = week.as_array().unwrap();
    assert_eq!(days.len(), 7);
    assert_eq!(days[0]["date"], "2024-03-04");
    assert!(days.iter().all(|d| !d["tasks"].as_array().unwrap().is_empty()));
}

#[test]
fn test_report_counts_the_whole_week() {
    let home = tempfile::tempdir().unwrap();
    let week = run_json(home.path(), &["plan", "week", "--auto", "--date", DATE]);
    let days = week.as_array().unwrap();
    let total: usize = days
        .iter()
        .map(|d| d["tasks"].as_array().unwrap().len())
        .sum();

    let wednesday = days.iter().find(|d| d["date"] == DATE).unwrap();
    let id = wednesday["tasks"][0]["task_id"].as_str().unwrap().to_string();
    run_json(home.path(), &["task", "done", &id]);

    let report = run_json(home.path(), &["report", "--date", DATE, "--days", "1"]);
    assert_eq!(report["planned_this_week"], total);
    assert_eq!(report["done_this_week"], 1);
    assert_eq!(report["streak"], 1);
}

#[test]
fn test_onboard_saves_profile() {
    let home = tempfile::tempdir().unwrap();
    let out = run_json(
        home.path(),
        &[
            "onboard", "--name", "Robin", "--goal", "recomp", "--tz", "Europe/Berlin", "--date",
            DATE,
        ],
    );
    assert_eq!(out["profile"]["name"], "Robin");
    assert!(!out["tasks"].as_array().unwrap().is_empty());

    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "profile.goal"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "recomp");
}

#[test]
fn test_config_set_and_get() {
    let home = tempfile::tempdir().unwrap();
    let (_, _, code) = run_cli(home.path(), &["config", "set", "report.lookback_days", "7"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(home.path(), &["config", "get", "report.lookback_days"]);
    assert_eq!(stdout.trim(), "7");

    let (_, _, code) = run_cli(home.path(), &["config", "get", "no.such.key"]);
    assert_eq!(code, 1);
}

#[test]
fn test_grocery_from_file() {
    let home = tempfile::tempdir().unwrap();
    let meals = home.path().join("meals.json");
    std::fs::write(
        &meals,
        r#"[
            {"id":"bowl","title":"Bowl","grocery":[{"item":"rice","qty":"200g"},{"item":"eggs"}]},
            {"id":"oats","title":"Oats","grocery":[{"item":"eggs","qty":"2"}]}
        ]"#,
    )
    .unwrap();

    let list = run_json(
        home.path(),
        &["grocery", "--meals", meals.to_str().unwrap()],
    );
    assert_eq!(list[0]["item"], "eggs");
    assert_eq!(list[0]["qty"], "2");
    assert_eq!(list[1]["item"], "rice");

    let only_oats = run_json(
        home.path(),
        &["grocery", "--meals", meals.to_str().unwrap(), "--select", "oats"],
    );
    assert_eq!(only_oats.as_array().unwrap().len(), 1);
}
