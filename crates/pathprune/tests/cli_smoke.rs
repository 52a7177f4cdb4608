use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_displays_usage() {
    Command::cargo_bin("pathprune")
        .expect("binary exists")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn prune_prints_surviving_entries() {
    let temp = tempfile::tempdir().expect("tempdir");
    let root = temp.path();
    fs::create_dir_all(root.join("out/assets")).expect("create dirs");
    fs::write(root.join("out/assets/app.js"), b"").expect("write file");
    fs::write(root.join("notes.txt"), b"").expect("write file");

    Command::cargo_bin("pathprune")
        .expect("binary exists")
        .current_dir(root)
        .env("HOME", root)
        .env("XDG_CONFIG_HOME", root.join(".config"))
        .env_remove("PATHPRUNE_MATCH_MODE")
        .env_remove("PATHPRUNE_FORMAT")
        .args(["prune", "--dir", "out", "--dir", "out/assets"])
        .args(["--file", "out/assets/app.js", "--file", "notes.txt"])
        .args(["--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"out\""))
        .stdout(predicate::str::contains("\"notes.txt\""))
        .stdout(predicate::str::contains("app.js").not())
        .stdout(predicate::str::contains("out/assets").not());
}

#[test]
fn prune_fails_for_missing_paths() {
    let temp = tempfile::tempdir().expect("tempdir");

    Command::cargo_bin("pathprune")
        .expect("binary exists")
        .current_dir(temp.path())
        .args(["prune", "--dir", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("path does not exist"));
}

#[test]
fn completions_emit_script() {
    Command::cargo_bin("pathprune")
        .expect("binary exists")
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pathprune"));
}
