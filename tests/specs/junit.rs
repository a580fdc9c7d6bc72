//! Behavioral specifications for the JUnit XML log.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use crate::prelude::*;

/// `--xml` writes a log with one testcase per executed file.
#[test]
fn xml_log_lists_every_test() {
    let dir = temp_project();
    passing_test(dir.path(), "aTest.sh");
    passing_test(dir.path(), "sub/bTest.sh");

    retest_cmd()
        .args(["run", "--xml", "log.xml"])
        .current_dir(dir.path())
        .assert()
        .success();

    let xml = std::fs::read_to_string(dir.path().join("log.xml")).unwrap();
    assert!(xml.contains(r#"tests="2""#));
    assert!(xml.contains("aTest.sh"));
    assert!(xml.contains("sub/bTest.sh"));
}

/// Failures appear as failure elements with the captured output.
#[test]
fn xml_log_records_failures() {
    let dir = temp_project();
    failing_test(dir.path(), "aTest.sh");

    retest_cmd()
        .args(["run", "--xml", "log.xml"])
        .current_dir(dir.path())
        .assert()
        .code(1);

    let xml = std::fs::read_to_string(dir.path().join("log.xml")).unwrap();
    assert!(xml.contains(r#"failures="1""#));
    assert!(xml.contains("<failure"));
    assert!(xml.contains("assertion failed"));
}

/// The log is still written when every test passes.
#[test]
fn xml_log_written_on_green_runs() {
    let dir = temp_project();
    passing_test(dir.path(), "aTest.sh");

    retest_cmd()
        .args(["run", "--xml", "logs/run.xml"])
        .current_dir(dir.path())
        .assert()
        .success();

    let xml = std::fs::read_to_string(dir.path().join("logs/run.xml")).unwrap();
    assert!(xml.contains(r#"failures="0""#));
}
