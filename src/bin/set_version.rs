//! `set-version`: stamp a release tag's version into `Cargo.toml`.
//!
//! Reads the version from the `VERSION` environment variable, falling back
//! to the first positional argument. Exit codes: 0 on success, 1 when the
//! manifest has no version line, 2 for missing/malformed input or a
//! missing manifest.

use kokoro_say::release;
use std::path::Path;

/// The manifest this tool patches.
const MANIFEST_PATH: &str = "Cargo.toml";

fn main() {
    let raw = std::env::var("VERSION")
        .ok()
        .filter(|v| !v.is_empty())
        .or_else(|| std::env::args().nth(1))
        .unwrap_or_default();

    match release::set_version(Path::new(MANIFEST_PATH), &raw) {
        Ok(version) => {
            println!("{MANIFEST_PATH} version set to {version}");
        }
        Err(e) => {
            eprintln!("ERROR: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
