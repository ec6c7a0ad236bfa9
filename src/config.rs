//! Configuration for the synthesis pipeline.

use serde::{Deserialize, Serialize};

/// Synthesis pipeline configuration.
///
/// Loadable from a TOML file; every field has a default so a partial
/// file (or none at all) is fine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    /// Voice style name (e.g., "af_heart", "bf_emma") or absolute path to a
    /// custom `.bin` style tensor.
    pub voice: String,
    /// ONNX model variant: "fp32", "fp16", "q8", "q8f16", "q4", "q4f16".
    pub model_variant: String,
    /// Speech speed multiplier (clamped to 0.5–2.0 at load).
    pub speed: f32,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            voice: "af_heart".to_owned(),
            model_variant: "q8".to_owned(),
            speed: 1.0,
        }
    }
}

impl SynthConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::error::SynthError::Config(e.to_string()))
    }
}
