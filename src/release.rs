//! Release tooling: patch the crate manifest's version from a tag.
//!
//! Used by CI to stamp `Cargo.toml` with the version from a release tag
//! (`v1.2.3` or `1.2.3`). Validation happens before any file is touched,
//! so a bad tag never leaves a half-written manifest.

use regex::Regex;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Matches the manifest's version line at start-of-line. Only the first
/// match is rewritten.
static VERSION_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^(version\s*=\s*)"[^"]+""#).expect("version line pattern is valid")
});

/// Failures of the version patcher, each carrying its process exit code.
#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    /// No version was supplied via environment or argument.
    #[error("VERSION not provided (env VERSION or first argument)")]
    MissingVersion,

    /// The supplied version does not look like `X.Y.Z`.
    #[error("VERSION must be X.Y.Z, got: {0}")]
    MalformedVersion(String),

    /// The manifest file does not exist.
    #[error("manifest not found: {0}")]
    ManifestNotFound(PathBuf),

    /// The manifest has no `version = "..."` line to rewrite.
    #[error("no version line found in {0}")]
    NoVersionLine(PathBuf),

    /// Reading or writing the manifest failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PatchError {
    /// Process exit code for this failure: `1` when the manifest lacks a
    /// version line, `2` for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            PatchError::NoVersionLine(_) => 1,
            _ => 2,
        }
    }
}

/// Validate and normalize a raw version string.
///
/// One leading `v` is stripped; the remainder must be three dot-separated
/// decimal components. Returns the normalized `X.Y.Z` form.
///
/// # Errors
///
/// Returns `MissingVersion` for empty input and `MalformedVersion` for
/// anything that does not match the shape.
pub fn normalize_version(raw: &str) -> Result<String, PatchError> {
    if raw.is_empty() {
        return Err(PatchError::MissingVersion);
    }

    let version = raw.strip_prefix('v').unwrap_or(raw);
    let mut parts = version.split('.');
    let well_formed = parts.by_ref().take(3).filter(is_decimal_component).count() == 3
        && parts.next().is_none();
    if !well_formed {
        return Err(PatchError::MalformedVersion(raw.to_owned()));
    }

    Ok(version.to_owned())
}

fn is_decimal_component(part: &&str) -> bool {
    !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit())
}

/// Rewrite the first `version = "..."` line in `manifest` to `version`.
///
/// Returns `None` when no line matches. Re-applying the same version
/// matches again and yields identical content, so patching is idempotent.
pub fn apply_version(manifest: &str, version: &str) -> Option<String> {
    match VERSION_LINE.replace(manifest, format!("${{1}}\"{version}\"")) {
        Cow::Borrowed(_) => None,
        Cow::Owned(patched) => Some(patched),
    }
}

/// Validate `raw` and rewrite the version line of the manifest at `path`.
///
/// The file is only written after validation and matching succeed; on any
/// error it is left byte-for-byte unchanged. Returns the normalized
/// version that was written.
///
/// # Errors
///
/// See [`PatchError`]; exit codes follow [`PatchError::exit_code`].
pub fn set_version(path: &Path, raw: &str) -> Result<String, PatchError> {
    let version = normalize_version(raw)?;

    if !path.exists() {
        return Err(PatchError::ManifestNotFound(path.to_path_buf()));
    }

    let manifest = std::fs::read_to_string(path)?;
    let patched = apply_version(&manifest, &version)
        .ok_or_else(|| PatchError::NoVersionLine(path.to_path_buf()))?;

    std::fs::write(path, patched)?;
    Ok(version)
}
