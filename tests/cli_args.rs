//! Runs the built binary against a scratch storage file.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn idxsite(storage: &Path, args: &[&str]) -> Output {
    let dir = storage.parent().unwrap();
    Command::new(env!("CARGO_BIN_EXE_idxsite"))
        .arg("--config")
        .arg(dir.join("config.toml"))
        .arg("--storage")
        .arg(storage)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_help_lists_commands() {
    let output = Command::new(env!("CARGO_BIN_EXE_idxsite"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    let text = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(text.contains("serve"));
    assert!(text.contains("favorites"));
    assert!(text.contains("--storage"));
}

#[test]
fn test_favorites_round_trip() {
    let dir = TempDir::new().unwrap();
    let storage = dir.path().join("storage.json");

    let output = idxsite(&storage, &["favorites", "check", "prop-1001"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "false\n");

    assert_eq!(stdout(&idxsite(&storage, &["favorites", "toggle", "prop-1001"])), "true\n");
    assert_eq!(stdout(&idxsite(&storage, &["favorites", "toggle", "prop-2003"])), "true\n");
    assert_eq!(stdout(&idxsite(&storage, &["favorites", "check", "prop-1001"])), "true\n");
    assert_eq!(
        stdout(&idxsite(&storage, &["favorites", "list"])),
        "prop-1001\nprop-2003\n"
    );

    assert_eq!(stdout(&idxsite(&storage, &["favorites", "toggle", "prop-1001"])), "false\n");
    assert_eq!(stdout(&idxsite(&storage, &["favorites", "clear"])), "1\n");
    assert_eq!(stdout(&idxsite(&storage, &["favorites", "list"])), "");
}

#[test]
fn test_invalid_config_exits_with_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), "[server]\nbind_addr = \"nope\"\n").unwrap();

    let output = idxsite(&dir.path().join("storage.json"), &["favorites", "list"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid bind address"));
}

#[test]
fn test_unknown_subcommand_fails() {
    let dir = TempDir::new().unwrap();
    let output = idxsite(&dir.path().join("storage.json"), &["bogus"]);
    assert!(!output.status.success());
}
