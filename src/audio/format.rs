//! Output format selection from the destination path.

use std::path::Path;

/// Audio container/codec for the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    /// 16-bit PCM WAV.
    Wav,
    /// FLAC (lossless).
    Flac,
    /// Ogg Vorbis.
    Ogg,
    /// MP3 (the default when no suffix matches).
    Mp3,
}

/// Suffix → format table. Matching is case-sensitive; anything not listed
/// here (including upper-case variants like `.WAV`) falls back to MP3.
const SUFFIXES: &[(&str, AudioFormat)] = &[
    (".ogg", AudioFormat::Ogg),
    (".flac", AudioFormat::Flac),
    (".wav", AudioFormat::Wav),
];

impl AudioFormat {
    /// Select the output format from the destination path's suffix.
    pub fn from_path(path: &Path) -> Self {
        let name = path.to_string_lossy();
        SUFFIXES
            .iter()
            .find(|(suffix, _)| name.ends_with(suffix))
            .map(|&(_, format)| format)
            .unwrap_or(AudioFormat::Mp3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_known_suffixes() {
        assert_eq!(
            AudioFormat::from_path(&PathBuf::from("out.wav")),
            AudioFormat::Wav
        );
        assert_eq!(
            AudioFormat::from_path(&PathBuf::from("out.flac")),
            AudioFormat::Flac
        );
        assert_eq!(
            AudioFormat::from_path(&PathBuf::from("out.ogg")),
            AudioFormat::Ogg
        );
    }

    #[test]
    fn test_default_is_mp3() {
        assert_eq!(
            AudioFormat::from_path(&PathBuf::from("out.mp3")),
            AudioFormat::Mp3
        );
        assert_eq!(
            AudioFormat::from_path(&PathBuf::from("out.opus")),
            AudioFormat::Mp3
        );
        assert_eq!(
            AudioFormat::from_path(&PathBuf::from("no_suffix")),
            AudioFormat::Mp3
        );
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert_eq!(
            AudioFormat::from_path(&PathBuf::from("out.WAV")),
            AudioFormat::Mp3
        );
        assert_eq!(
            AudioFormat::from_path(&PathBuf::from("out.Flac")),
            AudioFormat::Mp3
        );
    }

    #[test]
    fn test_suffix_within_directory_name_does_not_count() {
        assert_eq!(
            AudioFormat::from_path(&PathBuf::from("music.wav/out")),
            AudioFormat::Mp3
        );
    }
}
