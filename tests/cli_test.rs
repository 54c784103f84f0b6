//! Integration tests for CLI.
//!
//! Only the paths that need no live tmux server are exercised here:
//! layout resolution, parse failures and the help surface.
//!
//! @author waabox(waabox[at]gmail[dot]com)

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Points HOME (and XDG_CONFIG_HOME on Linux) into the temp dir and
/// returns the layouts directory auto-tmux will probe there.
fn layouts_dir(dir: &TempDir) -> PathBuf {
    // On macOS, dirs::config_dir() returns ~/Library/Application Support
    // On Linux, it returns ~/.config
    #[cfg(target_os = "macos")]
    let config_dir = dir
        .path()
        .join("Library")
        .join("Application Support")
        .join("auto-tmux")
        .join("layouts");
    #[cfg(not(target_os = "macos"))]
    let config_dir = dir.path().join(".config").join("auto-tmux").join("layouts");

    fs::create_dir_all(&config_dir).unwrap();
    config_dir
}

fn cmd_with_home(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("auto-tmux").unwrap();
    cmd.env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join(".config"));
    cmd
}

#[test]
fn when_running_without_args_should_print_usage() {
    let mut cmd = Command::cargo_bin("auto-tmux").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn when_layout_cannot_be_resolved_should_exit_nonzero() {
    let temp_dir = TempDir::new().unwrap();
    layouts_dir(&temp_dir);

    cmd_with_home(&temp_dir)
        .arg("no-such-layout")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn when_named_layout_is_invalid_yaml_should_exit_nonzero() {
    let temp_dir = TempDir::new().unwrap();
    let layouts = layouts_dir(&temp_dir);
    fs::write(layouts.join("dev.yaml"), "- name: [unclosed").unwrap();

    // The parse error proves resolution found the file in the layout dir.
    cmd_with_home(&temp_dir)
        .arg("dev")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse layout"));
}

#[test]
fn when_direct_path_is_invalid_yaml_should_exit_nonzero() {
    let temp_dir = TempDir::new().unwrap();
    layouts_dir(&temp_dir);
    let file = temp_dir.path().join("broken.yaml");
    fs::write(&file, "{ not: [valid").unwrap();

    cmd_with_home(&temp_dir)
        .arg(file.to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse layout"));
}

#[test]
fn when_showing_help_should_document_flags() {
    let mut cmd = Command::cargo_bin("auto-tmux").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--quiet"))
        .stdout(predicate::str::contains("--target"))
        .stdout(predicate::str::contains("-d"));
}
