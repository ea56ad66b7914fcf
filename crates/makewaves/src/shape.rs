//! Built-in single-cycle waveform shapes.
//!
//! Every shape maps a phase in `[0, 1)` to an amplitude in `[-1, 1]`. Shapes
//! with a zero crossing start at zero and rise, so they line up with `Sine`
//! when morphed.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

/// A basic waveform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    /// Sine wave.
    Sine,
    /// Triangle wave.
    Triangle,
    /// Naive (non band-limited) sawtooth.
    Saw,
    /// Square wave (50% duty).
    Square,
    /// Pulse wave with variable duty cycle.
    Pulse {
        /// Fraction of the cycle spent high, in (0, 1).
        duty: f64,
    },
    /// Sum of harmonic sine partials.
    Harmonics {
        /// Amplitude of each harmonic (index 0 = fundamental).
        amplitudes: Vec<f64>,
    },
}

impl Shape {
    /// Evaluates the shape at `phase`.
    pub fn sample(&self, phase: f64) -> f64 {
        match self {
            Shape::Sine => (phase * TAU).sin(),
            Shape::Triangle => {
                if phase < 0.25 {
                    4.0 * phase
                } else if phase < 0.75 {
                    2.0 - 4.0 * phase
                } else {
                    4.0 * phase - 4.0
                }
            }
            Shape::Saw => {
                if phase < 0.5 {
                    2.0 * phase
                } else {
                    2.0 * phase - 2.0
                }
            }
            Shape::Square => pulse(phase, 0.5),
            Shape::Pulse { duty } => pulse(phase, *duty),
            Shape::Harmonics { amplitudes } => harmonics(phase, amplitudes),
        }
    }

    /// Parses the name of a parameterless shape.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sine" => Some(Shape::Sine),
            "triangle" => Some(Shape::Triangle),
            "saw" | "sawtooth" => Some(Shape::Saw),
            "square" => Some(Shape::Square),
            _ => None,
        }
    }
}

/// Linear crossfade between two shapes, `t = 0` is all `from`.
pub fn morph(from: &Shape, to: &Shape, t: f64, phase: f64) -> f64 {
    from.sample(phase) * (1.0 - t) + to.sample(phase) * t
}

fn pulse(phase: f64, duty: f64) -> f64 {
    if phase < duty {
        1.0
    } else {
        -1.0
    }
}

/// Additive partials normalised by the total absolute amplitude.
fn harmonics(phase: f64, amplitudes: &[f64]) -> f64 {
    let total: f64 = amplitudes.iter().map(|a| a.abs()).sum();
    if total == 0.0 {
        return 0.0;
    }

    let sum: f64 = amplitudes
        .iter()
        .enumerate()
        .map(|(i, a)| a * (phase * TAU * (i + 1) as f64).sin())
        .sum();
    sum / total
}
