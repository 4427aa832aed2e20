// Integration tests for the grade-analyzer binary
#![allow(deprecated)] // assert_cmd::Command::cargo_bin

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn grade_analyzer() -> Command {
    let mut cmd = Command::cargo_bin("grade-analyzer").unwrap();
    cmd.env_remove("GRADE_THRESHOLD")
        .env_remove("GRADE_MAX_ATTEMPTS")
        .env("RUST_LOG", "warn");
    cmd
}

#[test]
fn sample_command_prints_every_field() {
    grade_analyzer()
        .arg("sample")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Students: 5"))
        .stdout(predicate::str::contains("Passing Students: 3"))
        .stdout(predicate::str::contains("Failing Students: 2"))
        .stdout(predicate::str::contains("Average Grade: 76.05"))
        .stdout(predicate::str::contains("- 80-89: 2"))
        .stdout(predicate::str::contains("Student Bob Smith has 4 attempts."))
        .stdout(predicate::str::contains("Problem Students:\n- none"));
}

#[test]
fn analyze_reads_csv_input() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "name,grades").unwrap();
    writeln!(file, "A,85;92;78;88").unwrap();
    writeln!(file, "B,65;72;68;71").unwrap();
    writeln!(file, "C,").unwrap();

    grade_analyzer()
        .arg("analyze")
        .arg("--input")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Students: 2"))
        .stdout(predicate::str::contains("Average Grade: 77.38"))
        .stdout(predicate::str::contains("- C (No valid grades found)"));
}

#[test]
fn threshold_out_of_range_fails() {
    grade_analyzer()
        .args(["sample", "--threshold", "101"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("grade threshold must be between 0 and 100"));
}

#[test]
fn empty_json_array_fails() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, "[]").unwrap();

    grade_analyzer()
        .arg("analyze")
        .arg("--input")
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("student data cannot be empty"));
}

#[test]
fn report_is_written_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("class.json");
    let out = dir.path().join("report.md");
    std::fs::write(
        &input,
        r#"[{"name": "Avery Lee", "grades": [55, 60]}, {"name": "Jules Moreno", "grades": []}]"#,
    )
    .unwrap();

    grade_analyzer()
        .arg("report")
        .arg("--input")
        .arg(&input)
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Report written to"));

    let report = std::fs::read_to_string(&out).unwrap();
    assert!(report.contains("# Grade Analysis Report"));
    assert!(report.contains("- 50-59: 1 students"));
    assert!(report.contains("- Jules Moreno: No valid grades found"));
    assert!(report.contains("More than 50% of students are failing."));
}
