//! makewaves - wavetable WAV files from waveform functions
//!
//! Renders an ordered list of single-cycle waveform functions into one mono,
//! 16-bit, 44.1 kHz WAV file, each cycle stored back-to-back as a fixed
//! number of samples. Software synthesizers that import wavetables (Ableton
//! Wavetable, Serum, Vital) slice such a file into its individual cycles.
//!
//! # Example
//!
//! ```no_run
//! use std::f64::consts::TAU;
//! use makewaves::WavetableWriter;
//!
//! // Sine morphing into a clipped sine over 16 waves
//! let waves: Vec<Box<dyn Fn(f64) -> f64>> = (0..16)
//!     .map(|i| {
//!         let drive = 1.0 + i as f64;
//!         Box::new(move |phase: f64| ((phase * TAU).sin() * drive).clamp(-1.0, 1.0))
//!             as Box<dyn Fn(f64) -> f64>
//!     })
//!     .collect();
//!
//! let summary = WavetableWriter::with_wave_samples(2048).render("drive.wav", &waves)?;
//! println!("{} frames, PCM hash {}", summary.total_frames, summary.pcm_hash);
//! # Ok::<(), makewaves::WavetableError>(())
//! ```
//!
//! # Quantization
//!
//! Each sample is `trunc(f(s / wave_samples) * 32767)`. Values are never
//! clipped: a result outside the `i16` range fails the whole render with
//! [`WavetableError::Quantization`], which carries the wave index, the phase
//! and the offending value.
//!
//! # Crate Structure
//!
//! - [`render()`] / [`WavetableWriter`] - Main entry points
//! - [`quantize`] - Amplitude to 16-bit PCM conversion
//! - [`wav`] - WAV container writer
//! - [`shape`] - Built-in waveform shapes
//! - [`definition`] - JSON wavetable definitions

pub mod definition;
pub mod error;
pub mod quantize;
pub mod render;
pub mod shape;
pub mod wav;

// Re-export main types at crate root
pub use definition::{WaveEntry, WaveFn, WavetableDefinition};
pub use error::{WavetableError, WavetableResult};
pub use render::{
    render, RenderSummary, Sink, WavSink, WavetableWriter, DEFAULT_WAVE_SAMPLES, SAMPLE_RATE,
};
pub use shape::Shape;
