//! End-to-end tests for graph generation
//!
//! These drive the `relgraph` binary against a prepared data directory:
//! - Fixed-width output
//! - Header repetition
//! - Missing persisted state
//! - Malformed release notes

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to write the version lists and one release note per `(version, date)`
fn create_data_dir(releases: &[(&str, &str)], majors: &[&str]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");

    let mut list = String::new();
    for (version, date) in releases {
        list.push_str(version);
        list.push('\n');
        fs::write(
            dir.path().join(format!("{version}.html")),
            format!(
                "<html><body><p><strong>Release date: </strong>{date}</p></body></html>"
            ),
        )
        .expect("Failed to write release note");
    }
    fs::write(dir.path().join("releases"), list).expect("Failed to write releases");
    fs::write(dir.path().join("majors"), majors.join("\n")).expect("Failed to write majors");

    dir
}

fn relgraph(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("relgraph").unwrap();
    cmd.arg("--data-dir").arg(dir.path());
    cmd
}

#[test]
fn test_three_release_graph() {
    let dir = create_data_dir(
        &[("14.0", "2022-09-01"), ("13.1", "2022-05-01"), ("13.0", "2022-01-01")],
        &["14", "13"],
    );

    let output = relgraph(&dir).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        stdout,
        concat!(
            "Date          13     14     \n",
            "Date----------13-----14-----\n",
            "2022-01-01    0             \n",
            "2022-05-01    1             \n",
            "2022-09-01           0      \n",
        )
    );
}

#[test]
fn test_both_numbering_schemes() {
    let dir = create_data_dir(
        &[
            ("10.1", "2017-11-09"),
            ("10", "2017-10-05"),
            ("9.6.6", "2017-11-09"),
            ("9.6.5", "2017-08-31"),
            ("9.6", "2016-09-29"),
        ],
        &["10", "9.6"],
    );

    relgraph(&dir)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Date          9.6    10     \n"))
        .stdout(predicate::str::contains("2016-09-29    0             \n"))
        .stdout(predicate::str::contains("2017-08-31    5             \n"))
        .stdout(predicate::str::contains("2017-10-05    :      0      \n"))
        .stdout(predicate::str::contains("2017-11-09    6      1      \n"));
}

#[test]
fn test_version_threshold() {
    let dir = create_data_dir(
        &[("10", "2017-10-05"), ("9.6", "2016-09-29")],
        &["10", "9.6"],
    );

    relgraph(&dir)
        .args(["-v", "10"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Date          10     \n"))
        .stdout(predicate::str::contains("2016-09-29").not());
}

#[test]
fn test_header_interval() {
    let dir = create_data_dir(
        &[
            ("13.3", "2021-05-13"),
            ("13.2", "2021-02-11"),
            ("13.1", "2020-11-12"),
        ],
        &["13"],
    );

    let output = relgraph(&dir).args(["--interval", "2"]).output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines.len(), 6);
    assert_eq!(lines[4], lines[0]);
}

#[test]
fn test_missing_persisted_state() {
    let dir = TempDir::new().unwrap();

    relgraph(&dir)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("releases\" doesn't exist"))
        .stderr(predicate::str::contains("majors\" doesn't exist"))
        .stderr(predicate::str::contains("--reload"));
}

#[test]
fn test_malformed_release_note() {
    let dir = create_data_dir(&[("13.1", "2020-11-12")], &["13"]);
    fs::write(dir.path().join("13.1.html"), "<html><p>moved</p></html>").unwrap();

    relgraph(&dir)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Malformed release note for version 13.1"));

    relgraph(&dir)
        .arg("--skip-malformed")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Date          13     \n"));
}

#[test]
fn test_never_released_versions_are_left_out() {
    let dir = create_data_dir(
        &[("8.0.27", "never released"), ("8.0.26", "2010-10-04")],
        &["8.0"],
    );

    let output = relgraph(&dir).output().unwrap();
    let stdout = String::from_utf8(output.stdout).unwrap();

    assert!(output.status.success());
    assert_eq!(stdout.lines().count(), 3);
    assert!(stdout.contains("2010-10-04    26     "));
}
