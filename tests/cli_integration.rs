//! Integration tests for the KeySafe CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`. They run
//! against `--backend memory` so they never touch the real OS keyring;
//! every invocation therefore starts with an empty vault.

use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;

/// Helper: a keysafe command running in `dir`, isolated from any
/// `KEYSAFE_*` variables in the caller's environment.
fn bare(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("keysafe").expect("binary should exist");
    cmd.current_dir(dir.path())
        .env_remove("KEYSAFE_SERVICE")
        .env_remove("KEYSAFE_BACKEND")
        .env_remove("RUST_LOG");
    cmd
}

/// Helper: a keysafe command on the memory backend with a fixed service.
fn keysafe(dir: &TempDir) -> Command {
    let mut cmd = bare(dir);
    cmd.args(["--backend", "memory", "--service", "cli-test"]);
    cmd
}

#[test]
fn help_flag_shows_usage() {
    let tmp = TempDir::new().unwrap();
    keysafe(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("credential vault"))
        .stdout(predicate::str::contains("set"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn version_flag_shows_version() {
    let tmp = TempDir::new().unwrap();
    keysafe(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("keysafe"));
}

#[test]
fn no_subcommand_fails_with_usage() {
    let tmp = TempDir::new().unwrap();
    keysafe(&tmp)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn set_with_inline_value_succeeds() {
    let tmp = TempDir::new().unwrap();
    keysafe(&tmp)
        .args(["set", "token", "secret1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Secret 'token' added to service 'cli-test'"))
        .stderr(predicate::str::contains("shell history"));
}

#[test]
fn set_reads_piped_value() {
    let tmp = TempDir::new().unwrap();
    keysafe(&tmp)
        .args(["set", "token"])
        .write_stdin("from-stdin\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("added"));
}

#[test]
fn set_with_empty_piped_value_is_rejected() {
    let tmp = TempDir::new().unwrap();
    keysafe(&tmp)
        .args(["set", "token"])
        .write_stdin("\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid data"));
}

#[test]
fn get_with_empty_key_is_rejected() {
    let tmp = TempDir::new().unwrap();
    keysafe(&tmp)
        .args(["get", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid data"));
}

#[test]
fn get_on_missing_key_reports_not_found() {
    let tmp = TempDir::new().unwrap();
    keysafe(&tmp)
        .args(["get", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no secret stored under 'nope'"));
}

#[test]
fn list_on_empty_vault_shows_hint() {
    let tmp = TempDir::new().unwrap();
    keysafe(&tmp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 secret(s)"))
        .stdout(predicate::str::contains("No secrets"));
}

#[test]
fn list_json_prints_an_array() {
    let tmp = TempDir::new().unwrap();
    keysafe(&tmp)
        .args(["list", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[]"));
}

#[test]
fn forced_delete_of_unknown_key_succeeds() {
    let tmp = TempDir::new().unwrap();
    keysafe(&tmp)
        .args(["delete", "ghost", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted secret 'ghost'"));
}

#[test]
fn empty_service_is_rejected() {
    let tmp = TempDir::new().unwrap();
    bare(&tmp)
        .args(["--backend", "memory", "--service", "", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("namespace"));
}

#[test]
fn config_file_sets_service() {
    let tmp = TempDir::new().unwrap();
    tmp.child(".keysafe.toml")
        .write_str("service = \"from-config\"\nbackend = \"memory\"\n")
        .unwrap();

    bare(&tmp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("service 'from-config'"));
}

#[test]
fn invalid_config_file_fails() {
    let tmp = TempDir::new().unwrap();
    tmp.child(".keysafe.toml").write_str("not valid {{toml").unwrap();

    keysafe(&tmp)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file error"));
}

#[test]
fn completions_for_bash() {
    let tmp = TempDir::new().unwrap();
    keysafe(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("keysafe"));
}

#[test]
fn completions_reject_unknown_shell() {
    let tmp = TempDir::new().unwrap();
    keysafe(&tmp)
        .args(["completions", "csh"])
        .assert()
        .failure();
}
