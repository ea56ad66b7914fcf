//! makewaves CLI - renders wavetable WAV files
//!
//! Thin front-end over the `makewaves` library: render JSON definitions or
//! built-in presets, and inspect existing wavetables.

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli_args;
mod commands;

use cli_args::{Cli, Commands};

/// Log filter from `RUST_LOG` when set, otherwise `warn` (`debug` with `--verbose`).
fn log_filter(rust_log: Option<&str>, verbose: bool) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(if verbose { "debug" } else { "warn" }))
}

fn init_tracing(verbose: bool) {
    let rust_log = std::env::var("RUST_LOG").ok();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref(), verbose))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Render {
            definition,
            output,
            wave_samples,
        } => commands::render::run(&definition, &output, wave_samples),
        Commands::Preset {
            shape,
            to,
            steps,
            output,
            wave_samples,
        } => commands::preset::run(&shape, to.as_deref(), steps, &output, wave_samples),
        Commands::Inspect {
            input,
            wave_samples,
        } => commands::inspect::run(&input, wave_samples),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
