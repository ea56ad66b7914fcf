//! Render command implementation
//!
//! Renders a JSON wavetable definition to a WAV file.

use anyhow::{Context, Result};
use colored::Colorize;
use makewaves::WavetableDefinition;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use super::reporting::report_render;

/// Run the render command
///
/// # Arguments
/// * `definition_path` - Path to the definition file (JSON)
/// * `output` - Output WAV path
/// * `wave_samples` - Optional override of the definition's samples per wave
///
/// # Returns
/// Exit code: 0 success, 1 definition error, 2 render error
pub fn run(definition_path: &str, output: &str, wave_samples: Option<usize>) -> Result<ExitCode> {
    let start = Instant::now();

    println!("{} {}", "Rendering:".cyan().bold(), definition_path);

    let mut definition = WavetableDefinition::from_file(definition_path)
        .with_context(|| format!("Failed to load definition: {}", definition_path))?;
    if let Some(wave_samples) = wave_samples {
        definition.wave_samples = wave_samples;
    }
    let wave_count = definition
        .wave_count()
        .with_context(|| format!("Invalid definition: {}", definition_path))?;

    println!(
        "{} {} waves x {} samples",
        "Table:".dimmed(),
        wave_count,
        definition.wave_samples
    );

    let result = definition.render(Path::new(output));
    Ok(report_render(output, result, start.elapsed()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const DEFINITION: &str = r#"{
        "wave_samples": 64,
        "waves": [
            { "type": "single", "shape": { "kind": "sine" } },
            { "type": "morph", "from": { "kind": "sine" }, "to": { "kind": "square" }, "steps": 3 }
        ]
    }"#;

    #[test]
    fn test_render_definition() {
        let tmp = tempfile::tempdir().unwrap();
        let def_path = tmp.path().join("table.json");
        let wav_path = tmp.path().join("table.wav");
        fs::write(&def_path, DEFINITION).unwrap();

        let code = run(
            def_path.to_str().unwrap(),
            wav_path.to_str().unwrap(),
            None,
        )
        .unwrap();

        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(fs::metadata(&wav_path).unwrap().len(), 44 + 4 * 64 * 2);
    }

    #[test]
    fn test_render_wave_samples_override() {
        let tmp = tempfile::tempdir().unwrap();
        let def_path = tmp.path().join("table.json");
        let wav_path = tmp.path().join("table.wav");
        fs::write(&def_path, DEFINITION).unwrap();

        let code = run(
            def_path.to_str().unwrap(),
            wav_path.to_str().unwrap(),
            Some(16),
        )
        .unwrap();

        assert_eq!(code, ExitCode::SUCCESS);
        assert_eq!(fs::metadata(&wav_path).unwrap().len(), 44 + 4 * 16 * 2);
    }

    #[test]
    fn test_render_overflowing_gain_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let def_path = tmp.path().join("loud.json");
        let wav_path = tmp.path().join("loud.wav");
        fs::write(
            &def_path,
            r#"{ "waves": [ { "type": "single", "shape": { "kind": "square" }, "gain": 4.0 } ] }"#,
        )
        .unwrap();

        let code = run(
            def_path.to_str().unwrap(),
            wav_path.to_str().unwrap(),
            None,
        )
        .unwrap();

        assert_eq!(code, ExitCode::from(2));
        assert!(!wav_path.exists());
    }

    #[test]
    fn test_render_huge_morph_fails_cleanly() {
        let tmp = tempfile::tempdir().unwrap();
        let def_path = tmp.path().join("huge.json");
        let wav_path = tmp.path().join("huge.wav");
        let steps = 1u64 << 63;
        fs::write(
            &def_path,
            format!(
                r#"{{ "waves": [
                    {{ "type": "morph", "from": {{ "kind": "sine" }}, "to": {{ "kind": "saw" }}, "steps": {steps} }},
                    {{ "type": "morph", "from": {{ "kind": "saw" }}, "to": {{ "kind": "sine" }}, "steps": {steps} }}
                ] }}"#
            ),
        )
        .unwrap();

        let result = run(
            def_path.to_str().unwrap(),
            wav_path.to_str().unwrap(),
            None,
        );

        assert!(result.is_err());
        assert!(!wav_path.exists());
    }

    #[test]
    fn test_render_missing_definition() {
        let result = run("/nonexistent/table.json", "/nonexistent/table.wav", None);
        assert!(result.is_err());
    }
}
