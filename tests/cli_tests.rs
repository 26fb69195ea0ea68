#![cfg(feature = "cli")]

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

fn checkfns() -> Command {
    let mut cmd = Command::cargo_bin("checkfns").unwrap();
    cmd.env_remove("CHECKFNS_DEBUG").env_remove("RUST_LOG");
    cmd
}

#[test]
fn prints_help() {
    checkfns()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn prints_version() {
    checkfns().arg("--version").assert().success();
}

#[test]
fn empty_argument_fails() {
    checkfns()
        .arg("")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("empty input data"));
}

#[test]
fn missing_argument_fails() {
    checkfns()
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());
}

#[test]
fn incomplete_qr_fails_without_network() {
    checkfns()
        .arg("t=20190418T211655&s=3943.26")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("missing fields fn, i, fp, n"));
}

#[test]
fn undecodable_qr_fails() {
    checkfns()
        .arg("t=%zz")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid qr code"));
}

#[test]
fn debug_dumps_input() {
    checkfns()
        .env("CHECKFNS_DEBUG", "1")
        .arg("s=1")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("verifying receipt"));
}
