//! Kokoro-82M ONNX inference.
//!
//! A [`KokoroPipeline`] holds one ONNX session, the character-level
//! tokenizer, a phonemizer, and the style tensor for a single voice. The
//! voice (and with it the phonemizer language) is fixed when the pipeline
//! is constructed; callers needing a second voice construct a second
//! pipeline rather than reconfiguring a shared one.

use super::download::{KokoroAssets, fetch_assets};
use super::phonemize::Phonemizer;
use super::segment::split_segments;
use crate::config::SynthConfig;
use crate::error::{Result, SynthError};
use ort::session::Session;
use ort::value::Tensor;
use std::collections::HashMap;
use tracing::{debug, info};

/// Maximum context length in tokens (including the two pad tokens).
const MAX_CONTEXT: usize = 512;

/// Kokoro's fixed output sample rate in Hz.
pub const SAMPLE_RATE: u32 = 24_000;

/// Width of one voice style vector.
const STYLE_DIM: usize = 256;

/// One synthesized segment: the input text span, its phoneme rendition,
/// and the audio chunk it produced.
pub struct SpeechSegment {
    /// The text segment that was synthesized.
    pub graphemes: String,
    /// The phoneme string fed to the model.
    pub phonemes: String,
    /// Mono f32 samples at [`SAMPLE_RATE`].
    pub samples: Vec<f32>,
}

/// Kokoro TTS pipeline for a single voice.
pub struct KokoroPipeline {
    session: Session,
    tokenizer: tokenizers::Tokenizer,
    phonemizer: Phonemizer,
    /// Flat style tensor of shape `(N, 1, 256)`, indexed by token count.
    voice_styles: Vec<f32>,
    speed: f32,
}

impl KokoroPipeline {
    /// Build a pipeline, downloading model assets on first use (cached by
    /// the HuggingFace hub).
    ///
    /// # Errors
    ///
    /// Returns an error if a download fails (including unknown voice
    /// names) or any asset fails to load.
    pub fn new(config: &SynthConfig) -> Result<Self> {
        let assets = fetch_assets(&config.model_variant, &config.voice)?;
        Self::from_assets(assets, config)
    }

    /// Build a pipeline from already-downloaded assets.
    ///
    /// # Errors
    ///
    /// Returns an error if the model, tokenizer, or voice tensor fails to
    /// load.
    pub fn from_assets(assets: KokoroAssets, config: &SynthConfig) -> Result<Self> {
        info!("loading Kokoro ONNX model: {}", assets.model_onnx.display());
        let session = Session::builder()
            .and_then(|b| Ok(b.with_intra_threads(4)?))
            .and_then(|mut b| b.commit_from_file(&assets.model_onnx))
            .map_err(|e| SynthError::Model(format!("failed to load Kokoro ONNX model: {e}")))?;

        let tokenizer = load_tokenizer(&assets.tokenizer_json)?;
        let phonemizer = Phonemizer::for_voice(&config.voice);
        let voice_styles = load_voice_styles(&assets.voice_bin)?;

        info!(
            "Kokoro pipeline ready (voice={}, variant={})",
            config.voice, config.model_variant
        );

        Ok(Self {
            session,
            tokenizer,
            phonemizer,
            voice_styles,
            speed: config.speed.clamp(0.5, 2.0),
        })
    }

    /// The pipeline's fixed output sample rate.
    pub fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    /// Synthesize `text`, yielding one [`SpeechSegment`] per sentence-level
    /// segment, in input order. Inference runs lazily as the iterator is
    /// advanced; empty input yields no segments.
    pub fn synthesize<'a>(&'a mut self, text: &str) -> Segments<'a> {
        let mut segments = split_segments(text);
        segments.reverse(); // pop() from the back yields input order
        Segments {
            pipeline: self,
            pending: segments,
        }
    }

    /// Run one segment through phonemize → tokenize → inference.
    fn synthesize_segment(&mut self, graphemes: &str) -> Result<SpeechSegment> {
        let phonemes = self.phonemizer.phonemize(graphemes)?;
        debug!("segment phonemes: \"{phonemes}\"");

        let encoding = self
            .tokenizer
            .encode(phonemes.as_str(), false)
            .map_err(|e| SynthError::Synthesis(format!("tokenization failed: {e}")))?;
        let raw_ids = encoding.get_ids();

        // The post-processor was stripped at load time (tokenizers v0.22
        // compat), so wrap with the pad token (id 0) manually.
        let mut token_ids: Vec<i64> = Vec::with_capacity(raw_ids.len() + 2);
        token_ids.push(0);
        token_ids.extend(raw_ids.iter().map(|&id| i64::from(id)));
        token_ids.push(0);

        if token_ids.len() > MAX_CONTEXT {
            return Err(SynthError::Synthesis(format!(
                "segment too long: {} tokens (max {MAX_CONTEXT})",
                token_ids.len(),
            )));
        }

        let style = self.style_for(token_ids.len().saturating_sub(2));
        let samples = self.run_inference(&token_ids, &style)?;

        debug!(
            "synthesized {} samples ({:.1}s) for \"{graphemes}\"",
            samples.len(),
            samples.len() as f32 / SAMPLE_RATE as f32,
        );

        Ok(SpeechSegment {
            graphemes: graphemes.to_owned(),
            phonemes,
            samples,
        })
    }

    /// Select the 256-dim style slice for a segment of `content_tokens`
    /// tokens. The tensor has one entry per possible token count.
    fn style_for(&self, content_tokens: usize) -> Vec<f32> {
        let entries = self.voice_styles.len() / STYLE_DIM;
        let index = content_tokens.max(1).min(entries.saturating_sub(1));
        let offset = index * STYLE_DIM;
        self.voice_styles[offset..offset + STYLE_DIM].to_vec()
    }

    /// One ONNX inference call: `input_ids` + `style` + `speed` → samples.
    fn run_inference(&mut self, token_ids: &[i64], style: &[f32]) -> Result<Vec<f32>> {
        use ort::session::{SessionInputValue, SessionInputs};

        let seq_len = token_ids.len();

        let input_ids = Tensor::from_array(([1_usize, seq_len], token_ids.to_vec()))
            .map_err(|e| SynthError::Synthesis(format!("failed to create input_ids tensor: {e}")))?;
        let style_tensor = Tensor::from_array(([1_usize, STYLE_DIM], style.to_vec()))
            .map_err(|e| SynthError::Synthesis(format!("failed to create style tensor: {e}")))?;
        let speed_tensor = Tensor::from_array(([1_usize], vec![self.speed]))
            .map_err(|e| SynthError::Synthesis(format!("failed to create speed tensor: {e}")))?;

        let mut feed: HashMap<String, SessionInputValue> = HashMap::new();
        feed.insert("input_ids".to_string(), input_ids.into());
        feed.insert("style".to_string(), style_tensor.into());
        feed.insert("speed".to_string(), speed_tensor.into());

        let outputs = self
            .session
            .run(SessionInputs::from(feed))
            .map_err(|e| SynthError::Synthesis(format!("ONNX inference failed: {e}")))?;

        // Output 0: waveform of shape [1, num_samples].
        let (_shape, data) = outputs[0_usize]
            .try_extract_tensor::<f32>()
            .map_err(|e| SynthError::Synthesis(format!("failed to extract output tensor: {e}")))?;

        Ok(data.to_vec())
    }
}

/// Ordered stream of synthesized segments for one `synthesize` call.
///
/// Each `next` runs inference for one pending segment.
pub struct Segments<'a> {
    pipeline: &'a mut KokoroPipeline,
    /// Remaining text segments, stored reversed so `pop` is O(1).
    pending: Vec<String>,
}

impl Iterator for Segments<'_> {
    type Item = Result<SpeechSegment>;

    fn next(&mut self) -> Option<Self::Item> {
        let graphemes = self.pending.pop()?;
        Some(self.pipeline.synthesize_segment(&graphemes))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.pending.len(), Some(self.pending.len()))
    }
}

/// Load and patch the Kokoro tokenizer.
///
/// `tokenizers` v0.22 cannot deserialize the `TemplateProcessing`
/// post-processor in Kokoro's `tokenizer.json`, so it is stripped here and
/// pad tokens are inserted manually during synthesis. The `model` section
/// also needs `type`/`unk_token` fields the upstream file omits.
fn load_tokenizer(path: &std::path::Path) -> Result<tokenizers::Tokenizer> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        SynthError::Model(format!("failed to read tokenizer {}: {e}", path.display()))
    })?;

    let mut json: serde_json::Value = serde_json::from_str(&raw)
        .map_err(|e| SynthError::Model(format!("failed to parse tokenizer JSON: {e}")))?;

    if let Some(obj) = json.as_object_mut() {
        obj.remove("post_processor");

        if let Some(model) = obj.get_mut("model").and_then(|m| m.as_object_mut()) {
            model
                .entry("type")
                .or_insert_with(|| serde_json::Value::String("WordLevel".to_string()));
            model
                .entry("unk_token")
                .or_insert_with(|| serde_json::Value::String("$".to_string()));
        }
    }

    let patched = serde_json::to_string(&json)
        .map_err(|e| SynthError::Model(format!("failed to serialize patched tokenizer: {e}")))?;

    tokenizers::Tokenizer::from_bytes(patched)
        .map_err(|e| SynthError::Model(format!("failed to load tokenizer: {e}")))
}

/// Load a voice style `.bin` as a flat little-endian f32 vector of shape
/// `(N, 1, 256)`.
fn load_voice_styles(path: &std::path::Path) -> Result<Vec<f32>> {
    let bytes = std::fs::read(path)
        .map_err(|e| SynthError::Model(format!("failed to read voice {}: {e}", path.display())))?;

    if bytes.len() % 4 != 0 {
        return Err(SynthError::Model(format!(
            "voice file size {} is not a multiple of 4 (expected f32 array)",
            bytes.len()
        )));
    }

    let floats: Vec<f32> = bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();

    if floats.is_empty() || floats.len() % STYLE_DIM != 0 {
        return Err(SynthError::Model(format!(
            "voice file has {} floats, expected a non-empty multiple of {STYLE_DIM}",
            floats.len()
        )));
    }

    debug!("loaded voice style: {} entries", floats.len() / STYLE_DIM);
    Ok(floats)
}
