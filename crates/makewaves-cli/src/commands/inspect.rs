//! Inspect command implementation
//!
//! Reports the format of a WAV file and how it splits into waves.

use anyhow::{Context, Result};
use colored::Colorize;
use makewaves::wav::compute_pcm_hash;
use makewaves::SAMPLE_RATE;
use std::fs;
use std::io::Cursor;
use std::process::ExitCode;

/// Layout of a WAV file read back from disk.
#[derive(Debug, PartialEq, Eq)]
struct Layout {
    channels: u16,
    sample_rate: u32,
    bits_per_sample: u16,
    is_int: bool,
    frames: u32,
}

impl Layout {
    /// Whether the file uses the mono 16-bit 44.1 kHz wavetable format.
    fn is_wavetable_format(&self) -> bool {
        self.channels == 1
            && self.sample_rate == SAMPLE_RATE
            && self.bits_per_sample == 16
            && self.is_int
    }
}

fn read_layout(bytes: &[u8]) -> Result<Layout> {
    let reader = hound::WavReader::new(Cursor::new(bytes)).context("Not a valid WAV file")?;
    let spec = reader.spec();

    Ok(Layout {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        is_int: spec.sample_format == hound::SampleFormat::Int,
        frames: reader.duration(),
    })
}

/// Run the inspect command
///
/// # Arguments
/// * `input` - Path to the WAV file
/// * `wave_samples` - Samples per wave used to split the file
///
/// # Returns
/// Exit code: 0 if the file is a well-formed wavetable, 1 otherwise
pub fn run(input: &str, wave_samples: usize) -> Result<ExitCode> {
    if wave_samples == 0 {
        anyhow::bail!("--wave-samples must be greater than zero");
    }

    let bytes = fs::read(input).with_context(|| format!("Failed to read file: {}", input))?;
    let layout = read_layout(&bytes).with_context(|| format!("Failed to parse: {}", input))?;

    println!("{} {}", "Inspecting:".cyan().bold(), input);
    println!("  {} {}", "channels:".dimmed(), layout.channels);
    println!("  {} {} Hz", "sample rate:".dimmed(), layout.sample_rate);
    println!(
        "  {} {}-bit {}",
        "sample format:".dimmed(),
        layout.bits_per_sample,
        if layout.is_int { "PCM" } else { "float" }
    );
    println!("  {} {}", "frames:".dimmed(), layout.frames);
    if let Some(hash) = compute_pcm_hash(&bytes) {
        println!("  {} {}", "PCM hash:".dimmed(), hash);
    }

    let mut ok = true;

    if !layout.is_wavetable_format() {
        println!(
            "  {} expected mono 16-bit PCM at {} Hz",
            "!".yellow(),
            SAMPLE_RATE
        );
        ok = false;
    }

    let frames = layout.frames as usize;
    let waves = frames / wave_samples;
    let remainder = frames % wave_samples;
    if remainder == 0 && waves > 0 {
        println!(
            "  {} {} waves of {} samples",
            "waves:".dimmed(),
            waves,
            wave_samples
        );
    } else {
        println!(
            "  {} {} frames is not a whole number of {}-sample waves",
            "!".yellow(),
            frames,
            wave_samples
        );
        ok = false;
    }

    if ok {
        println!("{}", "Valid wavetable".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}
