//! The synthesis driver: text in, one audio file out.

use crate::audio::{AudioFormat, write_samples};
use crate::error::Result;
use crate::kokoro::{KokoroPipeline, SpeechSegment};
use std::path::{Path, PathBuf};
use tracing::info;

/// Synthesize `text` through `pipeline` and write the result to `output`.
///
/// Audio chunks are concatenated in yield order into one buffer, the
/// output format is selected from the path suffix (MP3 when nothing
/// matches), and the file is written at the pipeline's fixed 24 kHz rate.
/// Returns the output path unchanged.
///
/// # Errors
///
/// Propagates synthesis and encoding errors unmodified; a partially
/// written file is left as the encoder left it.
pub fn synthesize_to_file(
    pipeline: &mut KokoroPipeline,
    text: &str,
    output: &Path,
) -> Result<PathBuf> {
    let samples = concat_segments(pipeline.synthesize(text))?;
    let format = AudioFormat::from_path(output);

    info!(
        "writing {} samples as {format:?} to {}",
        samples.len(),
        output.display()
    );
    write_samples(output, &samples, pipeline.sample_rate(), format)?;

    Ok(output.to_path_buf())
}

/// Concatenate segment audio into one contiguous buffer, preserving the
/// iterator's order. The first error aborts and is returned as-is.
pub fn concat_segments<I>(segments: I) -> Result<Vec<f32>>
where
    I: Iterator<Item = Result<SpeechSegment>>,
{
    let mut buffer = Vec::new();
    for segment in segments {
        buffer.extend_from_slice(&segment?.samples);
    }
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::error::SynthError;

    fn segment(samples: &[f32]) -> Result<SpeechSegment> {
        Ok(SpeechSegment {
            graphemes: String::new(),
            phonemes: String::new(),
            samples: samples.to_vec(),
        })
    }

    #[test]
    fn test_concat_preserves_chunk_order() {
        let chunks = vec![
            segment(&[1.0, 2.0]),
            segment(&[3.0]),
            segment(&[4.0, 5.0, 6.0]),
        ];
        let buffer = match concat_segments(chunks.into_iter()) {
            Ok(b) => b,
            Err(e) => panic!("concat failed: {e}"),
        };
        assert_eq!(buffer, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_concat_empty_iterator() {
        let buffer = concat_segments(std::iter::empty()).unwrap_or_default();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_concat_stops_at_first_error() {
        let chunks = vec![
            segment(&[1.0]),
            Err(SynthError::Synthesis("boom".into())),
            segment(&[2.0]),
        ];
        assert!(concat_segments(chunks.into_iter()).is_err());
    }
}
