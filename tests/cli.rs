#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn cli(state: &str) -> Command {
    let mut cmd = Command::cargo_bin("dutyplan-cli").unwrap();
    cmd.args(["--state", state]);
    cmd
}

#[test]
fn plan_and_export_month() {
    let dir = tempdir().unwrap();
    let state = dir.path().join("state.json");
    let state = state.to_str().unwrap();
    let out = dir.path().join("duties.csv");

    cli(state).args(["add-person", "--name", "Alice"]).assert().success();
    cli(state)
        .args(["add-person", "--name", "Bob", "--constraints", "prefer_weekend"])
        .assert()
        .success();
    cli(state)
        .args(["add-person", "--name", "Chloé", "--constraints", "half_day_exempt"])
        .assert()
        .success();
    cli(state).args(["add-person", "--name", "David"]).assert().success();
    cli(state)
        .args(["month", "--year", "2026", "--month", "2"])
        .assert()
        .success();
    cli(state)
        .args(["unavailable", "--name", "Alice", "--dates", "2026-02-10,2026-02-11"])
        .assert()
        .success();

    cli(state)
        .args(["plan", "--seed", "7", "--reserve"])
        .assert()
        .success()
        .stdout(predicate::str::contains("duty assignment(s)"));

    cli(state)
        .args(["export", "--csv", out.to_str().unwrap(), "--reserve"])
        .assert()
        .success();
    let csv = fs::read_to_string(&out).unwrap();
    assert!(csv.starts_with("Date,Day,Main,Reserve\n"));
    assert_eq!(csv.lines().count(), 29);

    cli(state)
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: no violations"));

    cli(state)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("2026-02-01 Sun"));
}

#[test]
fn duplicate_person_is_an_error() {
    let dir = tempdir().unwrap();
    let state = dir.path().join("state.json");
    let state = state.to_str().unwrap();

    cli(state).args(["add-person", "--name", "Alice"]).assert().success();
    cli(state)
        .args(["add-person", "--name", "Alice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already in roster"));
}

#[test]
fn broken_config_import_fails_without_touching_state() {
    let dir = tempdir().unwrap();
    let state = dir.path().join("state.json");
    let state = state.to_str().unwrap();
    let broken = dir.path().join("broken.json");
    fs::write(&broken, "not json").unwrap();

    cli(state).args(["add-person", "--name", "Alice"]).assert().success();
    let before = fs::read_to_string(state).unwrap();
    cli(state)
        .args(["import-config", "--json", broken.to_str().unwrap()])
        .assert()
        .failure();
    assert_eq!(fs::read_to_string(state).unwrap(), before);
}

#[test]
fn unknown_constraint_is_rejected_by_parser() {
    let dir = tempdir().unwrap();
    let state = dir.path().join("state.json");
    cli(state.to_str().unwrap())
        .args(["add-person", "--name", "Alice", "--constraints", "night_owl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown constraint"));
}
