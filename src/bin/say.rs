//! `kokoro-say`: synthesize speech from text on the command line.

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use kokoro_say::{KokoroPipeline, SynthConfig, synthesize_to_file};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Convert text to speech using Kokoro TTS.
///
/// The output format follows the output path's suffix: `.wav`, `.flac`,
/// and `.ogg` select their formats; anything else is written as MP3.
#[derive(Parser)]
#[command(name = "kokoro-say", version, about, long_about = None)]
#[command(after_help = "\
Voices follow Kokoro-82M naming, e.g.:
  American English: af_heart, af_bella, af_nova, am_adam, am_michael
  British English:  bf_alice, bf_emma, bm_daniel, bm_george

Full list: https://huggingface.co/hexgrad/Kokoro-82M/blob/main/VOICES.md")]
struct Cli {
    /// Text to convert to speech.
    text: String,

    /// Output audio file path.
    #[arg(short, long, default_value = "output.mp3")]
    output: PathBuf,

    /// Voice to use [default: af_heart].
    #[arg(short, long)]
    voice: Option<String>,

    /// ONNX model variant (fp32, fp16, q8, q8f16, q4, q4f16).
    #[arg(long)]
    variant: Option<String>,

    /// Speech speed multiplier (0.5–2.0).
    #[arg(long)]
    speed: Option<f32>,

    /// Path to a TOML configuration file; flags override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // Suppress noisy dependency logs by default; RUST_LOG overrides.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("kokoro_say=info,hf_hub=warn,ort=warn")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => SynthConfig::from_file(path)?,
        None => SynthConfig::default(),
    };
    if let Some(voice) = cli.voice {
        config.voice = voice;
    }
    if let Some(variant) = cli.variant {
        config.model_variant = variant;
    }
    if let Some(speed) = cli.speed {
        config.speed = speed;
    }

    let spinner = spinner("Generating speech...");
    let mut pipeline = KokoroPipeline::new(&config)?;
    let saved = synthesize_to_file(&mut pipeline, &cli.text, &cli.output)?;
    spinner.finish_and_clear();

    println!("✓ Saved to {}", saved.display());
    Ok(())
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb
}
