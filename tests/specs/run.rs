//! Behavioral specifications for `retest run`.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::prelude::*;

/// A fully green run exits 0 and reports the pass count.
#[test]
fn green_run_exits_zero() {
    let dir = temp_project();
    passing_test(dir.path(), "aTest.sh");
    passing_test(dir.path(), "bTest.sh");

    retest_cmd()
        .arg("run")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("2 test file(s) run: 2 passed"));
}

/// A failing test turns the exit code to 1 and is named in the output.
#[test]
fn failing_run_exits_one() {
    let dir = temp_project();
    passing_test(dir.path(), "aTest.sh");
    failing_test(dir.path(), "bTest.sh");

    retest_cmd()
        .arg("run")
        .current_dir(dir.path())
        .assert()
        .code(1)
        .stdout(predicates::str::contains("FAIL"))
        .stdout(predicates::str::contains("bTest.sh"))
        .stdout(predicates::str::contains("1 failed"));
}

/// Only files matching the test pattern are executed.
#[test]
fn non_matching_files_are_ignored() {
    let dir = temp_project();
    passing_test(dir.path(), "aTest.sh");
    write_test(dir.path(), "helper.sh", "exit 1\n");

    retest_cmd()
        .arg("run")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("1 test file(s) run"));
}

/// An empty test directory is a successful no-op.
#[test]
fn empty_test_dir_succeeds() {
    let dir = temp_project();

    retest_cmd()
        .arg("run")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("No test files found."));
}

/// A missing test directory is a fatal error, not a silent green run.
#[test]
fn missing_test_dir_is_fatal() {
    let dir = temp_project();
    std::fs::remove_dir(dir.path().join("tests")).unwrap();

    retest_cmd()
        .arg("run")
        .current_dir(dir.path())
        .assert()
        .code(2)
        .stderr(predicates::str::contains("does not exist"));
}

/// Positional filters restrict which discovered tests run.
#[test]
fn filters_restrict_selection() {
    let dir = temp_project();
    passing_test(dir.path(), "unit/aTest.sh");
    failing_test(dir.path(), "api/bTest.sh");

    retest_cmd()
        .args(["run", "unit"])
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("1 test file(s) run"))
        .stdout(predicates::str::contains("bTest.sh").not());
}

/// A test that cannot be executed at all counts as a failure.
#[test]
fn unrunnable_test_is_a_failure() {
    let dir = temp_project();
    std::fs::write(
        dir.path().join("retest.toml"),
        "[runner]\ncommand = [\"no-such-interpreter-8f1\"]\n",
    )
    .unwrap();
    passing_test(dir.path(), "aTest.sh");

    retest_cmd()
        .arg("run")
        .current_dir(dir.path())
        .assert()
        .code(1)
        .stdout(predicates::str::contains("failed to execute"));
}

/// `retest status` reflects the last run and `--clear` forgets it.
#[test]
fn status_subcommand_mirrors_the_store() {
    let dir = temp_project();
    failing_test(dir.path(), "aTest.sh");

    retest_cmd().arg("run").current_dir(dir.path()).assert().code(1);

    retest_cmd()
        .arg("status")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("aTest.sh"));

    retest_cmd()
        .args(["status", "--clear"])
        .current_dir(dir.path())
        .assert()
        .success();

    retest_cmd()
        .arg("status")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("No stored failures."));
}

/// Custom test patterns from retest.toml are honored.
#[test]
fn custom_pattern_is_honored() {
    let dir = temp_project();
    std::fs::write(
        dir.path().join("retest.toml"),
        "[project]\npattern = \"*Spec.*\"\n\n[runner]\ncommand = [\"sh\"]\n",
    )
    .unwrap();
    write_test(dir.path(), "aSpec.sh", "exit 0\n");
    passing_test(dir.path(), "bTest.sh");

    retest_cmd()
        .arg("run")
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("aSpec.sh"))
        .stdout(predicates::str::contains("bTest.sh").not());
}
