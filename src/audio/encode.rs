//! Sample-buffer encoders for the supported output formats.
//!
//! All encoders take mono f32 samples in `[-1.0, 1.0]` and write one file
//! at the given path. On failure the file is left in whatever state the
//! encoding library leaves it; there is no partial-write cleanup.

use crate::audio::AudioFormat;
use crate::error::{Result, SynthError};
use std::io::Write;
use std::num::{NonZeroU8, NonZeroU32};
use std::path::Path;

/// Encode `samples` at `sample_rate` into `path` using `format`.
///
/// # Errors
///
/// Returns an error if the path is unwritable or the encoder rejects the
/// buffer.
pub fn write_samples(
    path: &Path,
    samples: &[f32],
    sample_rate: u32,
    format: AudioFormat,
) -> Result<()> {
    match format {
        AudioFormat::Wav => write_wav(path, samples, sample_rate),
        AudioFormat::Flac => write_flac(path, samples, sample_rate),
        AudioFormat::Ogg => write_ogg(path, samples, sample_rate),
        AudioFormat::Mp3 => write_mp3(path, samples, sample_rate),
    }
}

/// Convert f32 samples to 16-bit PCM with clamping.
fn to_pcm16(samples: &[f32]) -> Vec<i16> {
    samples
        .iter()
        .map(|&s| (s.clamp(-1.0, 1.0) * f32::from(i16::MAX)).round() as i16)
        .collect()
}

fn write_wav(path: &Path, samples: &[f32], sample_rate: u32) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)
        .map_err(|e| SynthError::Encode(format!("failed to create wav writer: {e}")))?;

    for v in to_pcm16(samples) {
        writer
            .write_sample(v)
            .map_err(|e| SynthError::Encode(format!("failed to write wav sample: {e}")))?;
    }
    writer
        .finalize()
        .map_err(|e| SynthError::Encode(format!("failed to finalize wav: {e}")))?;
    Ok(())
}

fn write_flac(path: &Path, samples: &[f32], sample_rate: u32) -> Result<()> {
    use flacenc::component::BitRepr;
    use flacenc::error::Verify;

    let pcm: Vec<i32> = to_pcm16(samples).into_iter().map(i32::from).collect();

    let config = flacenc::config::Encoder::default()
        .into_verified()
        .map_err(|(_, e)| SynthError::Encode(format!("invalid FLAC encoder config: {e:?}")))?;
    let source = flacenc::source::MemSource::from_samples(&pcm, 1, 16, sample_rate as usize);
    let stream = flacenc::encode_with_fixed_block_size(&config, source, config.block_size)
        .map_err(|e| SynthError::Encode(format!("FLAC encoding failed: {e:?}")))?;

    let mut sink = flacenc::bitsink::ByteSink::new();
    stream
        .write(&mut sink)
        .map_err(|e| SynthError::Encode(format!("failed to serialize FLAC stream: {e:?}")))?;
    std::fs::write(path, sink.as_slice())?;
    Ok(())
}

fn write_ogg(path: &Path, samples: &[f32], sample_rate: u32) -> Result<()> {
    let rate = NonZeroU32::new(sample_rate)
        .ok_or_else(|| SynthError::Encode("sample rate must be non-zero".into()))?;
    let channels = NonZeroU8::new(1)
        .ok_or_else(|| SynthError::Encode("channel count must be non-zero".into()))?;

    let file = std::fs::File::create(path)?;
    let mut encoder = vorbis_rs::VorbisEncoderBuilder::new(rate, channels, std::io::BufWriter::new(file))
        .map_err(|e| SynthError::Encode(format!("failed to configure Vorbis encoder: {e}")))?
        .build()
        .map_err(|e| SynthError::Encode(format!("failed to initialize Vorbis encoder: {e}")))?;

    encoder
        .encode_audio_block([samples])
        .map_err(|e| SynthError::Encode(format!("Vorbis encoding failed: {e}")))?;
    let mut writer = encoder
        .finish()
        .map_err(|e| SynthError::Encode(format!("failed to finalize Vorbis stream: {e}")))?;
    writer.flush()?;
    Ok(())
}

fn write_mp3(path: &Path, samples: &[f32], sample_rate: u32) -> Result<()> {
    use mp3lame_encoder::{Bitrate, Builder, FlushNoGap, MonoPcm, Quality};

    let pcm = to_pcm16(samples);

    let mut builder = Builder::new()
        .ok_or_else(|| SynthError::Encode("failed to allocate LAME encoder".into()))?;
    builder
        .set_num_channels(1)
        .map_err(|e| SynthError::Encode(format!("failed to set MP3 channels: {e:?}")))?;
    builder
        .set_sample_rate(sample_rate)
        .map_err(|e| SynthError::Encode(format!("failed to set MP3 sample rate: {e:?}")))?;
    builder
        .set_brate(Bitrate::Kbps192)
        .map_err(|e| SynthError::Encode(format!("failed to set MP3 bitrate: {e:?}")))?;
    builder
        .set_quality(Quality::Best)
        .map_err(|e| SynthError::Encode(format!("failed to set MP3 quality: {e:?}")))?;
    let mut encoder = builder
        .build()
        .map_err(|e| SynthError::Encode(format!("failed to initialize LAME encoder: {e:?}")))?;

    let mut out = Vec::new();
    out.reserve(mp3lame_encoder::max_required_buffer_size(pcm.len()));

    let written = encoder
        .encode(MonoPcm(&pcm), out.spare_capacity_mut())
        .map_err(|e| SynthError::Encode(format!("MP3 encoding failed: {e:?}")))?;
    // SAFETY: `encode` initialized exactly `written` bytes of spare capacity.
    unsafe { out.set_len(out.len() + written) };

    let written = encoder
        .flush::<FlushNoGap>(out.spare_capacity_mut())
        .map_err(|e| SynthError::Encode(format!("failed to flush MP3 encoder: {e:?}")))?;
    // SAFETY: as above, `flush` initialized exactly `written` bytes.
    unsafe { out.set_len(out.len() + written) };

    std::fs::write(path, &out)?;
    Ok(())
}
