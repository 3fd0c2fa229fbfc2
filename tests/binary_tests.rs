//! Integration tests for the sql-tool-server binary.

use std::io::Write;

use assert_cmd::{Command, cargo::cargo_bin_cmd};
use predicates::prelude::*;
use tempfile::NamedTempFile;

fn cmd() -> Command {
    cargo_bin_cmd!("sql-tool-server")
}

#[test]
fn test_lint_file() {
    let mut queries = NamedTempFile::new().unwrap();
    writeln!(queries, "SELECT id FROM users WHERE id = 1 ORDER BY id LIMIT 10;").unwrap();

    cmd()
        .args(["lint", queries.path().to_str().unwrap(), "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Query looks good!"));
}

#[test]
fn test_lint_warnings_exit_code() {
    let mut queries = NamedTempFile::new().unwrap();
    writeln!(queries, "SELECT * FROM orders;").unwrap();

    cmd()
        .args(["lint", queries.path().to_str().unwrap(), "--no-color"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("LINT001"))
        .stdout(predicate::str::contains("LINT004"));
}

#[test]
fn test_lint_stdin() {
    cmd()
        .args(["lint", "-", "--no-color"])
        .write_stdin("SELECT name FROM users WHERE name = 'bob' ORDER BY name LIMIT 1")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("LINT005"));
}

#[test]
fn test_lint_chained_statement_is_error() {
    cmd()
        .args(["lint", "-", "--no-color"])
        .write_stdin("SELECT id FROM t WHERE id = 1 ORDER BY id LIMIT 5; DROP TABLE t")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("LINT005"));
}

#[test]
fn test_lint_json_format() {
    cmd()
        .args(["lint", "-f", "json"])
        .write_stdin("SHOW TABLES")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"queries\": 1"));
}

#[test]
fn test_lint_missing_file() {
    cmd()
        .args(["lint", "/nonexistent/queries.sql"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_help_lists_commands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("lint"));
}

#[test]
fn test_unknown_subcommand() {
    cmd().arg("analyze").assert().failure();
}
