//! Exit status and output streams of the snipdoc binary

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn snipdoc(data_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_snipdoc"))
        .arg("--data-dir")
        .arg(data_dir)
        .args(args)
        .env("SNIPDOC_CONFIG", data_dir.join("config.toml"))
        .env_remove("SNIPDOC_DATA_DIR")
        .env_remove("SNIPDOC_DEBOUNCE_MS")
        .env_remove("SNIPDOC_LOG")
        .output()
        .expect("Failed to execute CLI")
}

#[test]
fn test_add_with_invalid_fields_fails() {
    let temp_dir = TempDir::new().unwrap();

    let output = snipdoc(temp_dir.path(), &["add", "--title", "", "--code", "x"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Snippet not saved"), "stderr: {stderr}");
    assert!(stderr.contains("Title must be between 1 and 100 characters."));
    assert!(stderr.contains("Code must be at least 10 characters."));
    assert!(!String::from_utf8_lossy(&output.stdout).contains("Added"));
}

#[test]
fn test_unknown_id_fails_for_edit_delete_and_copy() {
    let temp_dir = TempDir::new().unwrap();

    for args in [
        &["edit", "nope", "--title", "y"][..],
        &["delete", "nope", "--yes"][..],
        &["copy", "nope"][..],
    ] {
        let output = snipdoc(temp_dir.path(), args);
        assert!(!output.status.success(), "{args:?} should fail");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Snippet not found with ID: nope"), "stderr: {stderr}");
    }
}

#[test]
fn test_valid_add_succeeds() {
    let temp_dir = TempDir::new().unwrap();

    let output = snipdoc(temp_dir.path(), &[
        "add",
        "--title",
        "Greeting",
        "--code",
        "echo hello world",
    ]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Added"));
}
