//! Command-line text-to-speech with Kokoro-82M.
//!
//! Two standalone tools share this crate:
//! - **`kokoro-say`**: synthesizes text through the Kokoro-82M ONNX model
//!   (phonemize → tokenize → inference), concatenates the per-segment
//!   audio chunks, and writes one WAV/FLAC/OGG/MP3 file chosen by the
//!   output path's suffix.
//! - **`set-version`**: release helper that stamps a tag version into the
//!   manifest's `version = "..."` line.

pub mod audio;
pub mod config;
pub mod error;
pub mod kokoro;
pub mod release;
pub mod synth;

pub use audio::AudioFormat;
pub use config::SynthConfig;
pub use error::{Result, SynthError};
pub use kokoro::{KokoroPipeline, SAMPLE_RATE, SpeechSegment};
pub use synth::synthesize_to_file;

/// Crate version, stamped by the release tooling.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
