//! Shared human-readable output for render commands.

use colored::Colorize;
use makewaves::{RenderSummary, WavetableError};
use std::process::ExitCode;
use std::time::Duration;

/// Exit code when rendering fails.
pub(crate) const RENDER_FAILED: u8 = 2;

/// Prints the outcome of a render and maps it to an exit code.
pub(crate) fn report_render(
    output: &str,
    result: Result<RenderSummary, WavetableError>,
    elapsed: Duration,
) -> ExitCode {
    match result {
        Ok(summary) => {
            println!(
                "{} {} ({} waves x {} samples, {} frames)",
                "Wrote:".green().bold(),
                output,
                summary.waves,
                summary.wave_samples,
                summary.total_frames
            );
            println!("{} {}", "PCM hash:".dimmed(), summary.pcm_hash);
            println!("{} {:.2?}", "Elapsed:".dimmed(), elapsed);
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{} [{}] {}", "Render failed:".red().bold(), e.code(), e);
            if let WavetableError::Quantization { .. } = e {
                println!(
                    "  {} waveform values must stay within [-1, 1], nothing is clipped",
                    "hint:".yellow()
                );
            }
            ExitCode::from(RENDER_FAILED)
        }
    }
}
