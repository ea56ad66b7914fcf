//! Conversion of waveform amplitudes to 16-bit PCM.
//!
//! Amplitudes are scaled by [`FULL_SCALE`] and truncated toward zero. A value
//! whose truncated result does not fit in an `i16` is an error, never clipped.

use crate::error::{WavetableError, WavetableResult};

/// Scale factor from a nominal [-1, 1] amplitude to a 16-bit sample (0x7fff).
pub const FULL_SCALE: f64 = 32767.0;

/// Quantizes one amplitude to a signed 16-bit sample.
///
/// Returns `None` for NaN, infinities and values whose scaled magnitude
/// overflows `i16`. Note the asymmetric range: `-1.00004` still truncates
/// to `-32768`, while anything that truncates above `32767` is rejected.
pub fn quantize(value: f64) -> Option<i16> {
    let scaled = (value * FULL_SCALE).trunc();
    if scaled.is_finite() && scaled >= f64::from(i16::MIN) && scaled <= f64::from(i16::MAX) {
        Some(scaled as i16)
    } else {
        None
    }
}

/// Phase of sample `index` within a cycle of `wave_samples` samples.
///
/// Always in `[0, 1)`.
#[inline]
pub fn phase(index: usize, wave_samples: usize) -> f64 {
    index as f64 / wave_samples as f64
}

/// Renders one wave into `buf` as little-endian 16-bit samples.
///
/// `buf` is cleared first. Stops at the first sample that cannot be
/// quantized; the waveform is not called for any later phase.
pub fn encode_wave<F>(
    wave_index: usize,
    wave: &F,
    wave_samples: usize,
    buf: &mut Vec<u8>,
) -> WavetableResult<()>
where
    F: Fn(f64) -> f64 + ?Sized,
{
    buf.clear();
    wave_samples
        .checked_mul(2)
        .and_then(|bytes| buf.try_reserve(bytes).ok())
        .ok_or_else(|| {
            WavetableError::invalid_param("wave_samples", "wave is too large to buffer")
        })?;

    for s in 0..wave_samples {
        let phase = phase(s, wave_samples);
        let value = wave(phase);
        let sample = quantize(value).ok_or(WavetableError::Quantization {
            wave_index,
            phase,
            value,
        })?;
        buf.extend_from_slice(&sample.to_le_bytes());
    }

    Ok(())
}
