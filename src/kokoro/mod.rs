//! Kokoro-82M TTS: asset download, phonemization, segmentation, and
//! single-model ONNX inference.

mod download;
mod engine;
mod phonemize;
mod segment;

pub use engine::{KokoroPipeline, SAMPLE_RATE, Segments, SpeechSegment};
