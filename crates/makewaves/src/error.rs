//! Error types for wavetable rendering.

use thiserror::Error;

/// Result type for wavetable operations.
pub type WavetableResult<T> = Result<T, WavetableError>;

/// Errors that can occur while rendering a wavetable.
#[derive(Debug, Error)]
pub enum WavetableError {
    /// A waveform produced a value that does not fit a signed 16-bit sample
    /// once scaled to full range.
    #[error("wave {wave_index}, phase {phase}: invalid value: {value}")]
    Quantization {
        /// Zero-based index of the offending wave.
        wave_index: usize,
        /// Phase that was passed to the waveform function.
        phase: f64,
        /// Raw value returned by the waveform function.
        value: f64,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// Malformed wavetable definition.
    #[error("invalid wavetable definition: {0}")]
    Definition(#[from] serde_json::Error),

    /// I/O error from the output sink.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl WavetableError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Stable error code for reporting.
    pub fn code(&self) -> &'static str {
        match self {
            WavetableError::Quantization { .. } => "WAVETABLE_001",
            WavetableError::InvalidParameter { .. } => "WAVETABLE_002",
            WavetableError::Definition(_) => "WAVETABLE_003",
            WavetableError::Io(_) => "WAVETABLE_004",
        }
    }
}
