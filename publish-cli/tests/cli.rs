//! Binary-level tests for orion-publish.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

/// Command rooted in `vault`, isolated from the user's config directory.
fn cmd(vault: &Path) -> Command {
    let mut cmd = Command::cargo_bin("orion-publish").unwrap();
    cmd.env("HOME", vault)
        .env("XDG_CONFIG_HOME", vault.join(".config"))
        .env_remove("RUST_LOG")
        .arg("--vault")
        .arg(vault);
    cmd
}

fn write_note(vault: &Path, rel: &str, text: &str) {
    let file = vault.join(rel);
    std::fs::create_dir_all(file.parent().unwrap()).unwrap();
    std::fs::write(file, text).unwrap();
}

#[test]
fn help_lists_commands() {
    Command::cargo_bin("orion-publish")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("publish"))
        .stdout(predicate::str::contains("unpublish"))
        .stdout(predicate::str::contains("feed"));
}

#[test]
fn status_on_fresh_vault() {
    let vault = TempDir::new().unwrap();

    cmd(vault.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing published."))
        .stdout(predicate::str::contains("https://orion.seancollings.dev"));

    // Read-only commands do not create state
    assert!(!vault.path().join(".orion-publish").exists());
}

#[test]
fn url_of_unpublished_note_fails() {
    let vault = TempDir::new().unwrap();
    write_note(vault.path(), "notes/a.md", "hello");

    cmd(vault.path())
        .args(["url", "notes/a.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("note notes/a.md is not published"));
}

#[test]
fn settings_roundtrip_through_data_file() {
    let vault = TempDir::new().unwrap();

    cmd(vault.path())
        .args(["settings", "set-url", "https://orion.example"])
        .assert()
        .success();
    cmd(vault.path())
        .args(["settings", "feeds", "--enable"])
        .assert()
        .success();

    cmd(vault.path())
        .args(["settings", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://orion.example"))
        .stdout(predicate::str::contains("feeds enabled: true"));

    let raw = std::fs::read_to_string(vault.path().join(".orion-publish/publish.json")).unwrap();
    let saved: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(saved["settings"]["url"], "https://orion.example");
    assert_eq!(saved["settings"]["feedsEnabled"], true);
}

#[test]
fn settings_feeds_requires_a_flag() {
    let vault = TempDir::new().unwrap();

    cmd(vault.path())
        .args(["settings", "feeds"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--enable or --disable"));
}

#[test]
fn note_outside_vault_rejected() {
    let vault = TempDir::new().unwrap();

    cmd(vault.path())
        .args(["publish", "../escape.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid document path"));
}

#[test]
fn publish_into_disabled_feeds_rejected() {
    let vault = TempDir::new().unwrap();
    write_note(vault.path(), "a.md", "hello");

    cmd(vault.path())
        .args(["publish", "a.md", "--feed", "f1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("feeds are disabled"));
}

#[test]
fn unreachable_service_leaves_note_unpublished() {
    let vault = TempDir::new().unwrap();
    write_note(vault.path(), "a.md", "hello");
    let config = vault.path().join("options.toml");
    std::fs::write(&config, "request_timeout_secs = 2\n").unwrap();

    cmd(vault.path())
        .args(["settings", "set-url", "http://127.0.0.1:9"])
        .assert()
        .success();

    cmd(vault.path())
        .arg("--config")
        .arg(&config)
        .args(["publish", "a.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to publish a.md"));

    cmd(vault.path())
        .args(["url", "a.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not published"));
}

#[test]
fn bad_config_file_reported() {
    let vault = TempDir::new().unwrap();
    let config = vault.path().join("options.toml");
    std::fs::write(&config, "request_timeout_secs = \"soon\"\n").unwrap();

    cmd(vault.path())
        .arg("--config")
        .arg(&config)
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config file"));
}

#[test]
fn missing_note_reported() {
    let vault = TempDir::new().unwrap();

    cmd(vault.path())
        .args(["publish", "missing.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("note missing.md not found"));
}
