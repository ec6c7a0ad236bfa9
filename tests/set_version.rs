//! Integration tests for the manifest version patcher.

#![allow(clippy::unwrap_used)]

use kokoro_say::release::{PatchError, set_version};
use std::path::PathBuf;

const MANIFEST: &str = r#"[package]
name = "demo"
version = "1.0.0"
edition = "2024"

[dependencies]
serde = { version = "1" }
"#;

fn write_manifest(dir: &tempfile::TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("Cargo.toml");
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn valid_version_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_manifest(&dir, MANIFEST);

    let version = set_version(&path, "2.3.4").unwrap();
    assert_eq!(version, "2.3.4");

    let patched = std::fs::read_to_string(&path).unwrap();
    assert!(patched.contains("version = \"2.3.4\""));
    // The dependency's version key is untouched.
    assert!(patched.contains("serde = { version = \"1\" }"));
}

#[test]
fn v_prefix_is_normalized() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_manifest(&dir, MANIFEST);

    let version = set_version(&path, "v2.3.4").unwrap();
    assert_eq!(version, "2.3.4");
    assert!(
        std::fs::read_to_string(&path)
            .unwrap()
            .contains("version = \"2.3.4\"")
    );
}

#[test]
fn malformed_version_leaves_manifest_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_manifest(&dir, MANIFEST);

    for raw in ["2.3", "abc", "1.2.3.4"] {
        let err = set_version(&path, raw).unwrap_err();
        assert!(matches!(err, PatchError::MalformedVersion(_)));
        assert_eq!(err.exit_code(), 2);
    }
    assert_eq!(std::fs::read_to_string(&path).unwrap(), MANIFEST);
}

#[test]
fn empty_version_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_manifest(&dir, MANIFEST);

    let err = set_version(&path, "").unwrap_err();
    assert!(matches!(err, PatchError::MissingVersion));
    assert_eq!(err.exit_code(), 2);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), MANIFEST);
}

#[test]
fn missing_manifest_is_exit_2() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Cargo.toml");

    let err = set_version(&path, "1.2.3").unwrap_err();
    assert!(matches!(err, PatchError::ManifestNotFound(_)));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn manifest_without_version_line_is_exit_1() {
    let dir = tempfile::tempdir().unwrap();
    let content = "[package]\nname = \"demo\"\n";
    let path = write_manifest(&dir, content);

    let err = set_version(&path, "1.2.3").unwrap_err();
    assert!(matches!(err, PatchError::NoVersionLine(_)));
    assert_eq!(err.exit_code(), 1);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), content);
}

#[test]
fn patching_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_manifest(&dir, MANIFEST);

    set_version(&path, "v2.3.4").unwrap();
    let after_first = std::fs::read_to_string(&path).unwrap();

    set_version(&path, "v2.3.4").unwrap();
    let after_second = std::fs::read_to_string(&path).unwrap();

    assert_eq!(after_first, after_second);
}
