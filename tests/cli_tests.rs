//! End-to-end tests of the `pair` command.

use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const TEAMS: &str = r#"[
    {"id": "A", "wins": 2, "losses": 0, "rating": 1600},
    {"id": "B", "wins": 1, "losses": 0, "rating": 1550},
    {"id": "C", "wins": 1, "losses": 1, "rating": 1500},
    {"id": "D", "wins": 0, "losses": 2, "rating": 1400}
]"#;

const SPLIT_WEEK: &str = r#"{"Mon": ["A", "B"], "Tue": ["C", "D"]}"#;

fn fixtures(teams: &str, availability: &str) -> (TempDir, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let teams_path = dir.path().join("teams.json");
    let days_path = dir.path().join("availability.json");
    std::fs::write(&teams_path, teams).unwrap();
    std::fs::write(&days_path, availability).unwrap();
    (dir, teams_path, days_path)
}

fn pair_cmd(teams: &PathBuf, days: &PathBuf) -> Command {
    let mut cmd = Command::cargo_bin("round-pairing").unwrap();
    cmd.arg("pair")
        .arg("--teams")
        .arg(teams)
        .arg("--availability")
        .arg(days);
    cmd
}

#[test]
fn test_pair_text_output() {
    let (_dir, teams, days) = fixtures(TEAMS, SPLIT_WEEK);

    pair_cmd(&teams, &days)
        .assert()
        .success()
        .stdout(predicate::str::contains("A vs B on Mon"))
        .stdout(predicate::str::contains("C vs D on Tue"));
}

#[test]
fn test_pair_json_output() {
    let (_dir, teams, days) = fixtures(TEAMS, SPLIT_WEEK);

    let output = pair_cmd(&teams, &days)
        .args(["--format", "json", "--tournament", "cup", "--round", "1"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let pairs: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        pairs,
        serde_json::json!([
            {"teamA": "A", "teamB": "B", "day": "Mon"},
            {"teamA": "C", "teamB": "D", "day": "Tue"}
        ])
    );
}

#[test]
fn test_pair_tsv_output() {
    let (_dir, teams, days) = fixtures(TEAMS, SPLIT_WEEK);

    pair_cmd(&teams, &days)
        .args(["--format", "tsv"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("match\tteam_a\tteam_b\tday\n"))
        .stdout(predicate::str::contains("1\tA\tB\tMon"));
}

#[test]
fn test_odd_team_count_fails() {
    let three = r#"[{"id": "A"}, {"id": "B"}, {"id": "C"}]"#;
    let (_dir, teams, days) = fixtures(three, r#"{"Mon": ["A", "B", "C"]}"#);

    pair_cmd(&teams, &days)
        .assert()
        .failure()
        .stderr(predicate::str::contains("odd number of teams"));
}

#[test]
fn test_no_overlap_json_error() {
    let two = r#"[{"id": "A"}, {"id": "B"}]"#;
    let (_dir, teams, days) = fixtures(two, r#"{"Mon": ["A"], "Tue": ["B"]}"#);

    pair_cmd(&teams, &days)
        .args(["--format", "json"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("no_availability_overlap"));
}

#[test]
fn test_missing_file_reports_path() {
    let (_dir, _teams, days) = fixtures(TEAMS, SPLIT_WEEK);
    let missing = PathBuf::from("/nonexistent/teams.json");

    pair_cmd(&missing, &days)
        .assert()
        .failure()
        .stderr(predicate::str::contains("/nonexistent/teams.json"));
}

#[test]
fn test_help_lists_commands() {
    Command::cargo_bin("round-pairing")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("pair"));
}
