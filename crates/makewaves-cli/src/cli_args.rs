//! CLI argument definitions for the makewaves command-line interface.

use clap::{Parser, Subcommand};
use makewaves::DEFAULT_WAVE_SAMPLES;

/// makewaves - wavetable WAV files for software synthesizers
#[derive(Parser)]
#[command(name = "makewaves")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence when set)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Render a JSON wavetable definition to a WAV file
    Render {
        /// Path to the wavetable definition (JSON)
        #[arg(short, long)]
        definition: String,

        /// Output WAV file path
        #[arg(short, long)]
        output: String,

        /// Override the definition's samples per wave
        #[arg(long)]
        wave_samples: Option<usize>,
    },

    /// Render a table from a built-in shape, optionally morphing into another
    Preset {
        /// Starting shape
        #[arg(short, long, value_parser = SHAPE_NAMES)]
        shape: String,

        /// Shape to morph into
        #[arg(long, value_parser = SHAPE_NAMES)]
        to: Option<String>,

        /// Number of waves in the morph (ignored without --to)
        #[arg(long, default_value_t = 16)]
        steps: usize,

        /// Output WAV file path
        #[arg(short, long)]
        output: String,

        /// Samples per wave
        #[arg(long, default_value_t = DEFAULT_WAVE_SAMPLES)]
        wave_samples: usize,
    },

    /// Report the format and wave layout of a WAV file
    Inspect {
        /// Path to the WAV file
        #[arg(short, long)]
        input: String,

        /// Samples per wave used to split the file
        #[arg(long, default_value_t = DEFAULT_WAVE_SAMPLES)]
        wave_samples: usize,
    },
}

const SHAPE_NAMES: [&str; 4] = ["sine", "triangle", "saw", "square"];
