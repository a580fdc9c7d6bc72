//! Behavioral specifications for failure memoization.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::prelude::*;

/// Full run with failures, then repeated `--only-failed` runs: the selected
/// subset is exactly the currently failing set and shrinks until the status
/// clears, after which a full suite runs again.
#[test]
fn only_failed_converges_to_green() {
    let dir = temp_project();
    failing_test(dir.path(), "aTest.sh");
    passing_test(dir.path(), "bTest.sh");
    failing_test(dir.path(), "cTest.sh");

    // Run 1: full scan, a and c fail
    retest_cmd()
        .arg("run")
        .current_dir(dir.path())
        .assert()
        .code(1)
        .stdout(predicates::str::contains("3 test file(s) run"));

    let recorded = recorded_failures(dir.path());
    assert_eq!(recorded.len(), 2);
    assert!(recorded[0].ends_with("aTest.sh"));
    assert!(recorded[1].ends_with("cTest.sh"));

    // Fix a; run 2 restricted to the stored pair
    passing_test(dir.path(), "aTest.sh");
    retest_cmd()
        .args(["run", "--only-failed"])
        .current_dir(dir.path())
        .assert()
        .code(1)
        .stdout(predicates::str::contains("2 test file(s) run"))
        .stdout(predicates::str::contains("bTest.sh").not());

    let recorded = recorded_failures(dir.path());
    assert_eq!(recorded.len(), 1);
    assert!(recorded[0].ends_with("cTest.sh"));

    // Fix c; run 3 runs only c and clears the status
    passing_test(dir.path(), "cTest.sh");
    retest_cmd()
        .args(["run", "--only-failed"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("1 test file(s) run"));

    assert!(!status_file(dir.path()).exists());

    // Run 4: with no stored failures, only-failed runs the full suite
    retest_cmd()
        .args(["run", "--only-failed"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("3 test file(s) run"));
}

/// Two green runs in a row both exit 0 and leave no status behind.
#[test]
fn green_runs_are_idempotent() {
    let dir = temp_project();
    passing_test(dir.path(), "aTest.sh");

    for _ in 0..2 {
        retest_cmd()
            .arg("run")
            .current_dir(dir.path())
            .assert()
            .success();
        assert!(!status_file(dir.path()).exists());
    }
}

/// A green run clears the status a previous failing run recorded.
#[test]
fn green_run_clears_stale_status() {
    let dir = temp_project();
    failing_test(dir.path(), "aTest.sh");

    retest_cmd().arg("run").current_dir(dir.path()).assert().code(1);
    assert!(status_file(dir.path()).exists());

    passing_test(dir.path(), "aTest.sh");
    retest_cmd().arg("run").current_dir(dir.path()).assert().success();
    assert!(!status_file(dir.path()).exists());
}

/// A corrupt status file reads as "no status": only-failed falls back to a
/// full scan instead of erroring.
#[test]
fn corrupt_status_falls_back_to_full_scan() {
    let dir = temp_project();
    passing_test(dir.path(), "aTest.sh");
    passing_test(dir.path(), "bTest.sh");

    std::fs::create_dir_all(dir.path().join(".retest")).unwrap();
    std::fs::write(status_file(dir.path()), "{ truncated garbag").unwrap();

    retest_cmd()
        .args(["run", "--only-failed"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("2 test file(s) run"));
}

/// A memoized file that disappeared from disk is reported as failing rather
/// than silently skipped.
#[test]
fn deleted_memoized_test_still_counts_as_failing() {
    let dir = temp_project();
    failing_test(dir.path(), "aTest.sh");

    retest_cmd().arg("run").current_dir(dir.path()).assert().code(1);

    std::fs::remove_file(dir.path().join("tests/aTest.sh")).unwrap();
    retest_cmd()
        .args(["run", "--only-failed"])
        .current_dir(dir.path())
        .assert()
        .code(1);
}
