//! Error types for the synthesis pipeline.

/// Top-level error type for speech synthesis and encoding.
#[derive(Debug, thiserror::Error)]
pub enum SynthError {
    /// Text-to-speech synthesis error (phonemization, tokenization, inference).
    #[error("synthesis error: {0}")]
    Synthesis(String),

    /// Model download or loading error.
    #[error("model error: {0}")]
    Model(String),

    /// Audio encoding error.
    #[error("encode error: {0}")]
    Encode(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, SynthError>;
