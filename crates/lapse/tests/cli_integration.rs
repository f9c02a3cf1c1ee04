//! CLI integration tests for the Lapse command-line interface.
//!
//! Every test runs against its own temporary database and an empty config
//! directory so the user's real config is never read.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a command for the lapse binary, isolated inside `dir`.
fn lapse(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("lapse").unwrap();
    cmd.current_dir(dir)
        .env_remove("LAPSE_DB")
        .env_remove("RUST_LOG")
        .arg("--config-dir")
        .arg(dir.join("config"))
        .arg("--db")
        .arg(dir.join("store.db"));
    cmd
}

// ─────────────────────────────────────────────────────────────────────────────
// Help and Version Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_help_lists_subcommands() {
    Command::cargo_bin("lapse")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("expiring key-value storage"))
        .stdout(predicate::str::contains("set"))
        .stdout(predicate::str::contains("merge"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("inspect"))
        .stdout(predicate::str::contains("remove"))
        .stdout(predicate::str::contains("clear"))
        .stdout(predicate::str::contains("keys"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version_displays() {
    Command::cargo_bin("lapse")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lapse"));
}

#[test]
fn test_set_requires_value() {
    let dir = TempDir::new().unwrap();
    lapse(dir.path()).args(["set", "only-key"]).assert().failure();
}

#[test]
fn test_negative_expire_rejected() {
    let dir = TempDir::new().unwrap();
    lapse(dir.path())
        .args(["set", "k", "v", "--expire", "-5"])
        .assert()
        .failure();
}

// ─────────────────────────────────────────────────────────────────────────────
// Store Operations
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_set_then_get() {
    let dir = TempDir::new().unwrap();

    lapse(dir.path())
        .args(["set", "greeting", "hello"])
        .assert()
        .success();

    lapse(dir.path())
        .args(["get", "greeting"])
        .assert()
        .success()
        .stdout("hello\n");
}

#[test]
fn test_get_json_value() {
    let dir = TempDir::new().unwrap();

    lapse(dir.path())
        .args(["set", "obj", r#"{"x":1}"#])
        .assert()
        .success();

    lapse(dir.path())
        .args(["get", "obj"])
        .assert()
        .success()
        .stdout("{\"x\":1}\n");
}

#[test]
fn test_get_missing_key_fails() {
    let dir = TempDir::new().unwrap();

    lapse(dir.path())
        .args(["get", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_expired_key_is_gone() {
    let dir = TempDir::new().unwrap();

    lapse(dir.path())
        .args(["set", "a", r#"{"x":1}"#, "--expire", "1"])
        .assert()
        .success();

    lapse(dir.path())
        .args(["get", "a"])
        .assert()
        .success()
        .stdout("{\"x\":1}\n");

    std::thread::sleep(std::time::Duration::from_millis(1100));

    lapse(dir.path()).args(["get", "a"]).assert().failure();
    lapse(dir.path())
        .arg("keys")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_merge_objects() {
    let dir = TempDir::new().unwrap();

    lapse(dir.path())
        .args(["set", "cfg", r#"{"a":1}"#])
        .assert()
        .success();
    lapse(dir.path())
        .args(["merge", "cfg", r#"{"b":2}"#])
        .assert()
        .success();

    lapse(dir.path())
        .args(["--json", "get", "cfg"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"a\": 1"))
        .stdout(predicate::str::contains("\"b\": 2"));
}

#[test]
fn test_inspect_shows_expiry() {
    let dir = TempDir::new().unwrap();

    lapse(dir.path())
        .args(["set", "forever", "1"])
        .assert()
        .success();

    lapse(dir.path())
        .args(["inspect", "forever"])
        .assert()
        .success()
        .stdout(predicate::str::contains("never"));

    lapse(dir.path())
        .args(["--json", "inspect", "forever"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"expireDate\": null"))
        .stdout(predicate::str::contains("\"saveTime\""));
}

#[test]
fn test_keys_remove_and_clear() {
    let dir = TempDir::new().unwrap();

    for key in ["b", "a", "c"] {
        lapse(dir.path()).args(["set", key, "1"]).assert().success();
    }

    lapse(dir.path())
        .arg("keys")
        .assert()
        .success()
        .stdout("a\nb\nc\n");

    lapse(dir.path()).args(["remove", "b"]).assert().success();
    lapse(dir.path())
        .arg("keys")
        .assert()
        .success()
        .stdout("a\nc\n");

    lapse(dir.path()).arg("clear").assert().success();
    lapse(dir.path()).arg("keys").assert().success().stdout("");
}

#[test]
fn test_default_expire_from_project_config() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("lapse.toml"),
        "[store]\ndefault_expire_secs = 3600\n",
    )
    .unwrap();

    lapse(dir.path())
        .args(["set", "k", "v"])
        .assert()
        .success();

    lapse(dir.path())
        .args(["inspect", "k"])
        .assert()
        .success()
        .stdout(predicate::str::contains("left"));
}

#[test]
fn test_config_command() {
    let dir = TempDir::new().unwrap();

    lapse(dir.path())
        .args(["--json", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"backend\": \"sqlite\""))
        .stdout(predicate::str::contains("store.db"));
}

#[test]
fn test_merge_creating_entry_uses_default_expire() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("lapse.toml"),
        "[store]\ndefault_expire_secs = 3600\n",
    )
    .unwrap();

    lapse(dir.path())
        .args(["merge", "fresh", r#"{"a":1}"#])
        .assert()
        .success();

    lapse(dir.path())
        .args(["inspect", "fresh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("left"));
}

#[test]
fn test_merge_keeps_never_expiring_entry() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("lapse.toml"),
        "[store]\ndefault_expire_secs = 3600\n",
    )
    .unwrap();

    lapse(dir.path())
        .args(["set", "kept", r#"{"a":1}"#, "--expire", "0"])
        .assert()
        .success();
    lapse(dir.path())
        .args(["merge", "kept", r#"{"b":2}"#])
        .assert()
        .success();

    lapse(dir.path())
        .args(["--json", "inspect", "kept"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"expireDate\": null"));
}

#[test]
fn test_config_init_writes_user_file() {
    let dir = TempDir::new().unwrap();
    let user_file = dir.path().join("config").join("config.toml");

    lapse(dir.path())
        .args(["config", "--init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let written = std::fs::read_to_string(&user_file).unwrap();
    assert!(written.contains("backend = \"sqlite\""));
    assert!(written.contains("store.db"));

    // The written file is picked up as a loaded source
    lapse(dir.path())
        .args(["--json", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"loaded\": true"));
}

#[test]
fn test_config_init_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();

    lapse(dir.path()).args(["config", "--init"]).assert().success();

    lapse(dir.path())
        .args(["config", "--init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    lapse(dir.path())
        .args(["config", "--init", "--force"])
        .assert()
        .success();
}
