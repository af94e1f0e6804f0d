use assert_cmd::Command;
use predicates::prelude::*;

#[allow(deprecated)]
fn pathlabel_cmd() -> Command {
    Command::cargo_bin("pathlabel").unwrap()
}

#[test]
fn help_works() {
    pathlabel_cmd().arg("--help").assert().success();
}

#[test]
fn help_lists_every_command() {
    pathlabel_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("label"))
        .stdout(predicate::str::contains("match"))
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("explain"))
        .stdout(predicate::str::contains("annotations"));
}

#[test]
fn match_rejects_files_with_git_range() {
    pathlabel_cmd()
        .args(["match", "--files", "x.txt", "--base", "a", "--head", "b"])
        .assert()
        .failure();
}
