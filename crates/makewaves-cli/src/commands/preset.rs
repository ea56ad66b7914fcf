//! Preset command implementation
//!
//! Renders a table from the built-in shapes without a definition file.

use anyhow::{anyhow, Result};
use colored::Colorize;
use makewaves::{Shape, WaveEntry, WavetableDefinition};
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use super::reporting::report_render;

/// Run the preset command
///
/// # Arguments
/// * `shape` - Name of the starting shape
/// * `to` - Optional shape to morph into over `steps` waves
/// * `steps` - Number of morph waves
/// * `output` - Output WAV path
/// * `wave_samples` - Samples per wave
///
/// # Returns
/// Exit code: 0 success, 2 render error
pub fn run(
    shape: &str,
    to: Option<&str>,
    steps: usize,
    output: &str,
    wave_samples: usize,
) -> Result<ExitCode> {
    let start = Instant::now();
    let definition = preset_definition(shape, to, steps, wave_samples)?;

    match to {
        Some(to) => println!(
            "{} {} -> {} over {} waves",
            "Preset:".cyan().bold(),
            shape,
            to,
            steps
        ),
        None => println!("{} {}", "Preset:".cyan().bold(), shape),
    }

    let result = definition.render(Path::new(output));
    Ok(report_render(output, result, start.elapsed()))
}

fn parse_shape(name: &str) -> Result<Shape> {
    Shape::from_name(name).ok_or_else(|| anyhow!("unknown shape: {}", name))
}

/// Builds the definition for a single shape or a two-shape morph.
fn preset_definition(
    shape: &str,
    to: Option<&str>,
    steps: usize,
    wave_samples: usize,
) -> Result<WavetableDefinition> {
    let from = parse_shape(shape)?;
    let entry = match to {
        Some(to) => WaveEntry::Morph {
            from,
            to: parse_shape(to)?,
            steps,
            gain: 1.0,
        },
        None => WaveEntry::Single {
            shape: from,
            gain: 1.0,
        },
    };

    Ok(WavetableDefinition {
        wave_samples,
        waves: vec![entry],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_single_shape_definition() {
        let def = preset_definition("triangle", None, 16, 256).unwrap();
        assert_eq!(def.wave_count().unwrap(), 1);
        assert_eq!(def.wave_samples, 256);
    }

    #[test]
    fn test_morph_definition() {
        let def = preset_definition("sine", Some("saw"), 8, 2048).unwrap();
        assert_eq!(def.wave_count().unwrap(), 8);
    }

    #[test]
    fn test_unknown_shape() {
        assert!(preset_definition("noise", None, 1, 64).is_err());
    }

    #[test]
    fn test_preset_render() {
        let tmp = tempfile::tempdir().unwrap();
        let wav_path = tmp.path().join("morph.wav");

        let code = run("saw", Some("square"), 4, wav_path.to_str().unwrap(), 128).unwrap();

        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(fs::metadata(&wav_path).unwrap().len(), 44 + 4 * 128 * 2);
    }

    #[test]
    fn test_preset_zero_steps_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let wav_path = tmp.path().join("empty.wav");

        let code = run("saw", Some("square"), 0, wav_path.to_str().unwrap(), 128).unwrap();
        assert_eq!(code, ExitCode::from(2));
    }
}
