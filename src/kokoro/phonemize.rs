//! Misaki G2P (grapheme-to-phoneme) wrapper.
//!
//! Converts English text to the phoneme strings Kokoro's character-level
//! tokenizer expects. Input is normalized first: smart punctuation is
//! replaced with ASCII and runs of whitespace collapse to single spaces,
//! both of which otherwise degrade pronunciation.

use crate::error::{Result, SynthError};

/// Thin wrapper around `misaki-rs` G2P.
pub struct Phonemizer {
    g2p: misaki_rs::G2P,
}

impl Phonemizer {
    /// Create a phonemizer for the given voice.
    ///
    /// British English pronunciation is used for `bf_`/`bm_` voices,
    /// American English for everything else.
    pub fn for_voice(voice: &str) -> Self {
        let british = voice.starts_with("bf_") || voice.starts_with("bm_");
        let lang = if british {
            misaki_rs::Language::EnglishGB
        } else {
            misaki_rs::Language::EnglishUS
        };
        Self {
            g2p: misaki_rs::G2P::new(lang),
        }
    }

    /// Convert a text segment to a phoneme string.
    ///
    /// # Errors
    ///
    /// Returns an error if G2P fails or produces empty output.
    pub fn phonemize(&self, text: &str) -> Result<String> {
        let normalized = normalize_text(text);
        let (phonemes, _tokens) = self
            .g2p
            .g2p(&normalized)
            .map_err(|e| SynthError::Synthesis(format!("phonemization failed: {e}")))?;
        if phonemes.is_empty() {
            return Err(SynthError::Synthesis(
                "phonemization produced empty output".into(),
            ));
        }
        Ok(phonemes)
    }
}

/// Normalize a segment before phonemization: ASCII-fy smart punctuation
/// and collapse whitespace runs.
pub fn normalize_text(text: &str) -> String {
    let replaced = text
        .replace(['\u{2018}', '\u{2019}'], "'")
        .replace(['\u{201C}', '\u{201D}'], "\"")
        .replace(['\u{2014}', '\u{2013}'], " - ")
        .replace('\u{2026}', "...");

    let mut result = String::with_capacity(replaced.len());
    let mut last_was_space = false;
    for ch in replaced.chars() {
        if ch.is_whitespace() {
            if !last_was_space && !result.is_empty() {
                result.push(' ');
            }
            last_was_space = true;
        } else {
            result.push(ch);
            last_was_space = false;
        }
    }
    while result.ends_with(' ') {
        result.pop();
    }
    result
}
