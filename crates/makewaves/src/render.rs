//! Wavetable rendering.
//!
//! [`WavetableWriter`] evaluates each waveform function once per sample
//! position and streams the quantized cycles, in order, into a mono 16-bit
//! 44.1 kHz WAV container whose frame count is declared before any sample
//! is written.

use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Seek, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{WavetableError, WavetableResult};
use crate::quantize::encode_wave;
use crate::wav::{WavContainer, MAX_DATA_SIZE};

/// Samples per wave when none is specified.
pub const DEFAULT_WAVE_SAMPLES: usize = 1024;

/// Frame rate written into every wavetable header.
pub const SAMPLE_RATE: u32 = 44100;

/// A writable, seekable binary destination.
pub trait WavSink: Write + Seek {}

impl<T: Write + Seek + ?Sized> WavSink for T {}

/// Where a wavetable is written.
///
/// A `Path` sink is created (or truncated), owned and closed by the render
/// call. A `Borrowed` sink stays owned by the caller and is only flushed.
pub enum Sink<'a> {
    /// File path opened internally.
    Path(PathBuf),
    /// Caller-supplied writer, written from its current position.
    Borrowed(&'a mut dyn WavSink),
}

impl fmt::Debug for Sink<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sink::Path(path) => f.debug_tuple("Path").field(path).finish(),
            Sink::Borrowed(_) => f.write_str("Borrowed(..)"),
        }
    }
}

impl From<&str> for Sink<'_> {
    fn from(path: &str) -> Self {
        Sink::Path(PathBuf::from(path))
    }
}

impl From<String> for Sink<'_> {
    fn from(path: String) -> Self {
        Sink::Path(PathBuf::from(path))
    }
}

impl From<&Path> for Sink<'_> {
    fn from(path: &Path) -> Self {
        Sink::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for Sink<'_> {
    fn from(path: PathBuf) -> Self {
        Sink::Path(path)
    }
}

impl<'a, W: WavSink> From<&'a mut W> for Sink<'a> {
    fn from(writer: &'a mut W) -> Self {
        Sink::Borrowed(writer)
    }
}

/// Outcome of a successful render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSummary {
    /// Number of waves written.
    pub waves: usize,
    /// Samples per wave.
    pub wave_samples: usize,
    /// Frame count declared in (and written to) the container.
    pub total_frames: u32,
    /// BLAKE3 hash of the sample data only (not the header).
    pub pcm_hash: String,
}

impl RenderSummary {
    /// Size of the `data` chunk in bytes.
    pub fn data_size(&self) -> u64 {
        u64::from(self.total_frames) * 2
    }
}

/// Renders waveform functions into a wavetable WAV file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavetableWriter {
    wave_samples: usize,
}

impl Default for WavetableWriter {
    fn default() -> Self {
        Self {
            wave_samples: DEFAULT_WAVE_SAMPLES,
        }
    }
}

impl WavetableWriter {
    /// Creates a writer producing [`DEFAULT_WAVE_SAMPLES`] samples per wave.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a writer producing `wave_samples` samples per wave.
    ///
    /// Any positive count is accepted. Most synthesizers expect a power of
    /// two (Ableton Wavetable uses 1024, Serum uses 2048).
    pub fn with_wave_samples(wave_samples: usize) -> Self {
        Self { wave_samples }
    }

    /// Samples per wave.
    pub fn wave_samples(&self) -> usize {
        self.wave_samples
    }

    /// Renders `waves` into `sink`.
    ///
    /// Wave `i` sample `s` is `trunc(waves[i](s / wave_samples) * 32767)`.
    /// The first value that does not fit a signed 16-bit sample aborts the
    /// whole render with [`WavetableError::Quantization`]; no later sample or
    /// wave is evaluated.
    ///
    /// If the render fails, or a waveform panics, a file opened from a path is
    /// removed. A borrowed sink may be left holding a partial wavetable;
    /// cleaning it up is the caller's responsibility.
    pub fn render<'a, F>(
        &self,
        sink: impl Into<Sink<'a>>,
        waves: &[F],
    ) -> WavetableResult<RenderSummary>
    where
        F: Fn(f64) -> f64,
    {
        let total_frames = self.total_frames(waves.len())?;

        match sink.into() {
            Sink::Borrowed(writer) => self.render_into(writer, waves, total_frames),
            Sink::Path(path) => self.render_to_file(&path, waves, total_frames),
        }
    }

    /// Validates the table shape and returns the frame count to declare.
    pub(crate) fn total_frames(&self, wave_count: usize) -> WavetableResult<u32> {
        if self.wave_samples == 0 {
            return Err(WavetableError::invalid_param(
                "wave_samples",
                "must be greater than zero",
            ));
        }
        if wave_count == 0 {
            return Err(WavetableError::invalid_param(
                "waves",
                "at least one waveform is required",
            ));
        }

        self.wave_samples
            .checked_mul(wave_count)
            .filter(|&frames| (frames as u64).saturating_mul(2) <= MAX_DATA_SIZE)
            .map(|frames| frames as u32)
            .ok_or_else(|| {
                WavetableError::invalid_param(
                    "wave_samples",
                    format!(
                        "{} waves of {} samples exceeds the WAV size limit",
                        wave_count, self.wave_samples
                    ),
                )
            })
    }

    fn render_to_file<F>(
        &self,
        path: &Path,
        waves: &[F],
        total_frames: u32,
    ) -> WavetableResult<RenderSummary>
    where
        F: Fn(f64) -> f64,
    {
        let file = File::create(path)?;
        let mut guard = PartialFile::new(path);

        let summary = {
            let mut writer = BufWriter::new(file);
            self.render_into(&mut writer, waves, total_frames)?
        };

        guard.keep();
        Ok(summary)
    }

    fn render_into<W, F>(
        &self,
        writer: W,
        waves: &[F],
        total_frames: u32,
    ) -> WavetableResult<RenderSummary>
    where
        W: Write + Seek,
        F: Fn(f64) -> f64,
    {
        let mut container = WavContainer::open(writer, SAMPLE_RATE, total_frames)?;
        let mut hasher = blake3::Hasher::new();
        let mut buf = Vec::with_capacity(self.wave_samples * 2);

        for (wave_index, wave) in waves.iter().enumerate() {
            encode_wave(wave_index, wave, self.wave_samples, &mut buf)?;
            container.write_frames(&buf)?;
            hasher.update(&buf);
            debug!(wave_index, samples = self.wave_samples, "wrote wave");
        }

        container.finish()?;

        let summary = RenderSummary {
            waves: waves.len(),
            wave_samples: self.wave_samples,
            total_frames,
            pcm_hash: hasher.finalize().to_hex().to_string(),
        };
        info!(
            waves = summary.waves,
            wave_samples = summary.wave_samples,
            total_frames = summary.total_frames,
            "rendered wavetable"
        );

        Ok(summary)
    }
}

/// Removes a file created by a path render unless it completed.
///
/// Dropped on every exit from the render, including an unwinding panic
/// raised by a waveform function.
struct PartialFile<'p> {
    path: &'p Path,
    keep: bool,
}

impl<'p> PartialFile<'p> {
    fn new(path: &'p Path) -> Self {
        Self { path, keep: false }
    }

    /// Marks the file as complete.
    fn keep(&mut self) {
        self.keep = true;
    }
}

impl Drop for PartialFile<'_> {
    fn drop(&mut self) {
        if self.keep {
            return;
        }
        if let Err(e) = fs::remove_file(self.path) {
            warn!(path = %self.path.display(), error = %e, "failed to remove partial wavetable");
        }
    }
}

/// Renders `waves` into `sink` with `wave_samples` samples per wave.
///
/// Shorthand for [`WavetableWriter::with_wave_samples`] followed by
/// [`WavetableWriter::render`].
///
/// # Example
///
/// ```
/// use std::f64::consts::TAU;
/// use std::io::Cursor;
///
/// let waves: Vec<Box<dyn Fn(f64) -> f64>> = vec![
///     Box::new(|p: f64| (p * TAU).sin()),
///     Box::new(|p: f64| 2.0 * p - 1.0),
/// ];
///
/// let mut out = Cursor::new(Vec::new());
/// let summary = makewaves::render(&mut out, &waves, 256).unwrap();
/// assert_eq!(summary.total_frames, 512);
/// assert_eq!(out.into_inner().len(), 44 + 512 * 2);
/// ```
pub fn render<'a, F>(
    sink: impl Into<Sink<'a>>,
    waves: &[F],
    wave_samples: usize,
) -> WavetableResult<RenderSummary>
where
    F: Fn(f64) -> f64,
{
    WavetableWriter::with_wave_samples(wave_samples).render(sink, waves)
}
