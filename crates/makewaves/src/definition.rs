//! JSON wavetable definitions.
//!
//! A definition lists the waves of a table using the built-in [`Shape`]s:
//!
//! ```json
//! {
//!   "wave_samples": 2048,
//!   "waves": [
//!     { "type": "single", "shape": { "kind": "sine" } },
//!     { "type": "morph", "from": { "kind": "saw" }, "to": { "kind": "square" }, "steps": 8 }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{WavetableError, WavetableResult};
use crate::render::{RenderSummary, Sink, WavetableWriter, DEFAULT_WAVE_SAMPLES};
use crate::shape::{morph, Shape};

/// A boxed waveform function.
pub type WaveFn = Box<dyn Fn(f64) -> f64>;

/// A complete wavetable description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WavetableDefinition {
    /// Samples per wave.
    #[serde(default = "default_wave_samples")]
    pub wave_samples: usize,
    /// Wave entries, in table order.
    pub waves: Vec<WaveEntry>,
}

/// One entry of a definition, expanding to one or more waves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WaveEntry {
    /// A single wave.
    Single {
        /// Waveform shape.
        shape: Shape,
        /// Output gain. Not clamped.
        #[serde(default = "default_gain")]
        gain: f64,
    },
    /// `steps` waves crossfading linearly from `from` to `to`.
    Morph {
        /// First wave of the run.
        from: Shape,
        /// Last wave of the run.
        to: Shape,
        /// Number of waves, including both ends.
        steps: usize,
        /// Output gain. Not clamped.
        #[serde(default = "default_gain")]
        gain: f64,
    },
}

fn default_wave_samples() -> usize {
    DEFAULT_WAVE_SAMPLES
}

fn default_gain() -> f64 {
    1.0
}

impl WaveEntry {
    /// Number of waves this entry expands to.
    pub fn wave_count(&self) -> usize {
        match self {
            WaveEntry::Single { .. } => 1,
            WaveEntry::Morph { steps, .. } => *steps,
        }
    }
}

impl WavetableDefinition {
    /// Parses a definition from JSON.
    pub fn from_json(json: &str) -> WavetableResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a definition file.
    pub fn from_file(path: impl AsRef<Path>) -> WavetableResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Total number of waves after expanding morphs.
    ///
    /// Fails if the step counts add up past `usize::MAX`.
    pub fn wave_count(&self) -> WavetableResult<usize> {
        self.waves
            .iter()
            .try_fold(0usize, |total, entry| total.checked_add(entry.wave_count()))
            .ok_or_else(|| WavetableError::invalid_param("waves", "too many waves"))
    }

    /// Expands the entries into waveform functions, in table order.
    ///
    /// The table size is checked against the WAV size limit before any
    /// wave is built.
    pub fn waves(&self) -> WavetableResult<Vec<WaveFn>> {
        for (index, entry) in self.waves.iter().enumerate() {
            if let WaveEntry::Morph { steps: 0, .. } = entry {
                return Err(WavetableError::invalid_param(
                    format!("waves[{}].steps", index),
                    "a morph needs at least one step",
                ));
            }
        }

        let count = self.wave_count()?;
        self.writer().total_frames(count)?;

        let mut waves: Vec<WaveFn> = Vec::with_capacity(count);

        for entry in &self.waves {
            match entry {
                WaveEntry::Single { shape, gain } => {
                    let (shape, gain) = (shape.clone(), *gain);
                    waves.push(Box::new(move |phase: f64| gain * shape.sample(phase)));
                }
                WaveEntry::Morph {
                    from,
                    to,
                    steps,
                    gain,
                } => {
                    for step in 0..*steps {
                        let t = if *steps == 1 {
                            0.0
                        } else {
                            step as f64 / (*steps - 1) as f64
                        };
                        let (from, to, gain) = (from.clone(), to.clone(), *gain);
                        waves.push(Box::new(move |phase: f64| gain * morph(&from, &to, t, phase)));
                    }
                }
            }
        }

        Ok(waves)
    }

    /// Renders the definition into `sink`.
    pub fn render<'a>(&self, sink: impl Into<Sink<'a>>) -> WavetableResult<RenderSummary> {
        let waves = self.waves()?;
        self.writer().render(sink, &waves)
    }

    fn writer(&self) -> WavetableWriter {
        WavetableWriter::with_wave_samples(self.wave_samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_defaults() {
        let def = WavetableDefinition::from_json(
            r#"{ "waves": [ { "type": "single", "shape": { "kind": "sine" } } ] }"#,
        )
        .unwrap();

        assert_eq!(def.wave_samples, 1024);
        assert_eq!(
            def.waves,
            vec![WaveEntry::Single {
                shape: Shape::Sine,
                gain: 1.0
            }]
        );
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = WavetableDefinition::from_json(r#"{ "waves": [], "rate": 48000 }"#).unwrap_err();
        assert_eq!(err.code(), "WAVETABLE_003");
    }

    #[test]
    fn test_morph_expansion() {
        let def = WavetableDefinition::from_json(
            r#"{
                "wave_samples": 4,
                "waves": [
                    { "type": "single", "shape": { "kind": "square" }, "gain": 0.5 },
                    { "type": "morph", "from": { "kind": "saw" }, "to": { "kind": "square" }, "steps": 3 }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(def.wave_count().unwrap(), 4);
        let waves = def.waves().unwrap();
        assert_eq!(waves.len(), 4);

        assert_eq!(waves[0](0.0), 0.5);
        // Morph ends land exactly on the endpoint shapes.
        assert_eq!(waves[1](0.25), Shape::Saw.sample(0.25));
        assert_eq!(waves[2](0.25), 0.75);
        assert_eq!(waves[3](0.25), 1.0);
    }

    #[test]
    fn test_single_step_morph_is_from_shape() {
        let def = WavetableDefinition {
            wave_samples: 8,
            waves: vec![WaveEntry::Morph {
                from: Shape::Triangle,
                to: Shape::Square,
                steps: 1,
                gain: 1.0,
            }],
        };
        let waves = def.waves().unwrap();
        assert_eq!(waves.len(), 1);
        assert_eq!(waves[0](0.25), 1.0);
        assert_eq!(waves[0](0.5), 0.0);
    }

    #[test]
    fn test_zero_step_morph_rejected() {
        let def = WavetableDefinition {
            wave_samples: 8,
            waves: vec![WaveEntry::Morph {
                from: Shape::Sine,
                to: Shape::Saw,
                steps: 0,
                gain: 1.0,
            }],
        };
        match def.waves() {
            Err(WavetableError::InvalidParameter { name, .. }) => {
                assert_eq!(name, "waves[0].steps")
            }
            other => panic!("expected invalid parameter, got {:?}", other.map(|w| w.len())),
        }
    }

    #[test]
    fn test_huge_step_count_rejected_before_building_waves() {
        let def = WavetableDefinition::from_json(
            r#"{
                "waves": [
                    { "type": "morph", "from": { "kind": "sine" }, "to": { "kind": "saw" },
                      "steps": 18446744073709551615 }
                ]
            }"#,
        )
        .unwrap();

        let mut out = std::io::Cursor::new(Vec::new());
        let err = def.render(&mut out).unwrap_err();
        assert_eq!(err.code(), "WAVETABLE_002");
        assert!(out.get_ref().is_empty());
    }

    #[test]
    fn test_step_total_overflow_rejected() {
        let morph = WaveEntry::Morph {
            from: Shape::Sine,
            to: Shape::Saw,
            steps: 1 << (usize::BITS - 1),
            gain: 1.0,
        };
        let def = WavetableDefinition {
            wave_samples: 1,
            waves: vec![morph.clone(), morph],
        };

        assert!(matches!(
            def.wave_count(),
            Err(WavetableError::InvalidParameter { ref name, .. }) if name == "waves"
        ));
        assert!(def.waves().is_err());
    }

    #[test]
    fn test_table_past_size_limit_rejected() {
        // 10^9 waves of 1024 samples is far past the 4 GiB data limit
        let def = WavetableDefinition {
            wave_samples: 1024,
            waves: vec![WaveEntry::Morph {
                from: Shape::Sine,
                to: Shape::Square,
                steps: 1_000_000_000,
                gain: 1.0,
            }],
        };

        assert_eq!(def.wave_count().unwrap(), 1_000_000_000);
        match def.waves() {
            Err(WavetableError::InvalidParameter { name, .. }) => assert_eq!(name, "wave_samples"),
            other => panic!("expected invalid parameter, got {:?}", other.map(|w| w.len())),
        }
    }

    #[test]
    fn test_render_to_buffer() {
        let def = WavetableDefinition {
            wave_samples: 16,
            waves: vec![
                WaveEntry::Single {
                    shape: Shape::Sine,
                    gain: 1.0,
                },
                WaveEntry::Single {
                    shape: Shape::Saw,
                    gain: 1.0,
                },
            ],
        };

        let mut out = std::io::Cursor::new(Vec::new());
        let summary = def.render(&mut out).unwrap();
        assert_eq!(summary.total_frames, 32);
        assert_eq!(out.into_inner().len(), 44 + 64);
    }

    #[test]
    fn test_excess_gain_is_not_clamped() {
        let def = WavetableDefinition {
            wave_samples: 4,
            waves: vec![WaveEntry::Single {
                shape: Shape::Square,
                gain: 1.5,
            }],
        };

        let mut out = std::io::Cursor::new(Vec::new());
        let err = def.render(&mut out).unwrap_err();
        assert!(matches!(
            err,
            WavetableError::Quantization {
                wave_index: 0,
                phase,
                value,
            } if phase == 0.0 && value == 1.5
        ));
    }
}
