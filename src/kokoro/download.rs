//! Model asset download from HuggingFace Hub.

use crate::error::{Result, SynthError};
use std::path::{Path, PathBuf};
use tracing::info;

/// HuggingFace repo for Kokoro-82M ONNX models.
pub const KOKORO_REPO_ID: &str = "onnx-community/Kokoro-82M-v1.0-ONNX";

/// Local paths of the assets a pipeline needs.
pub struct KokoroAssets {
    /// The ONNX model file (inside the repo's `onnx/` subfolder).
    pub model_onnx: PathBuf,
    /// `tokenizer.json`.
    pub tokenizer_json: PathBuf,
    /// The voice style `.bin` file.
    pub voice_bin: PathBuf,
}

/// Map a variant name to the ONNX filename inside the `onnx/` subfolder.
/// Unknown variants fall back to the q8 quantization.
pub fn model_filename(variant: &str) -> &'static str {
    match variant {
        "fp32" => "onnx/model.onnx",
        "fp16" => "onnx/model_fp16.onnx",
        "q8" | "quantized" => "onnx/model_quantized.onnx",
        "q8f16" => "onnx/model_q8f16.onnx",
        "q4" => "onnx/model_q4.onnx",
        "q4f16" => "onnx/model_q4f16.onnx",
        _ => {
            info!("unknown model variant '{variant}', falling back to q8");
            "onnx/model_quantized.onnx"
        }
    }
}

/// True when `voice` is an absolute path to a custom `.bin` style tensor
/// rather than a built-in voice name.
fn is_custom_voice_path(voice: &str) -> bool {
    let path = Path::new(voice);
    path.is_absolute() && path.extension().is_some_and(|ext| ext == "bin")
}

/// Fetch (or verify the cache of) all assets for `variant` and `voice`.
///
/// An unknown voice name surfaces as the hub's download error for the
/// missing `voices/<voice>.bin` file, propagated unmodified.
///
/// # Errors
///
/// Returns an error if the hub API cannot be initialized or any download
/// fails.
pub fn fetch_assets(variant: &str, voice: &str) -> Result<KokoroAssets> {
    let api = hf_hub::api::sync::Api::new()
        .map_err(|e| SynthError::Model(format!("HF Hub API init failed: {e}")))?;
    let repo = api.model(KOKORO_REPO_ID.to_owned());

    let model_file = model_filename(variant);
    info!("ensuring Kokoro model: {KOKORO_REPO_ID}/{model_file}");
    let model_onnx = repo
        .get(model_file)
        .map_err(|e| SynthError::Model(format!("failed to download {model_file}: {e}")))?;

    info!("ensuring tokenizer.json");
    let tokenizer_json = repo
        .get("tokenizer.json")
        .map_err(|e| SynthError::Model(format!("failed to download tokenizer.json: {e}")))?;

    let voice_bin = if is_custom_voice_path(voice) {
        PathBuf::from(voice)
    } else {
        let voice_file = format!("voices/{voice}.bin");
        info!("ensuring voice: {voice_file}");
        repo.get(&voice_file)
            .map_err(|e| SynthError::Model(format!("failed to download {voice_file}: {e}")))?
    };

    Ok(KokoroAssets {
        model_onnx,
        tokenizer_json,
        voice_bin,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_mapping() {
        assert_eq!(model_filename("fp32"), "onnx/model.onnx");
        assert_eq!(model_filename("q8"), "onnx/model_quantized.onnx");
        assert_eq!(model_filename("quantized"), "onnx/model_quantized.onnx");
        assert_eq!(model_filename("q4f16"), "onnx/model_q4f16.onnx");
    }

    #[test]
    fn test_unknown_variant_falls_back_to_q8() {
        assert_eq!(model_filename("bogus"), "onnx/model_quantized.onnx");
    }

    #[test]
    fn test_custom_voice_path_detection() {
        assert!(is_custom_voice_path("/tmp/custom.bin"));
        assert!(!is_custom_voice_path("af_heart"));
        assert!(!is_custom_voice_path("relative/voice.bin"));
        assert!(!is_custom_voice_path("/tmp/voice.onnx"));
    }
}
