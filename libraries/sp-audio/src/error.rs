//! Error types for audio I/O

use crate::resampling::ResamplingError;
use thiserror::Error;

/// Result type for audio operations
pub type Result<T> = std::result::Result<T, AudioError>;

/// Errors that can occur while decoding, resampling, or writing audio
#[derive(Error, Debug)]
pub enum AudioError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Symphonia probe or codec setup error
    #[error("Symphonia error: {0}")]
    Symphonia(String),

    /// Decoding error
    #[error("Failed to decode audio: {0}")]
    DecodeError(String),

    /// Unsupported stream layout
    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    /// Resampling error
    #[error("Resampling failed: {0}")]
    Resampling(#[from] ResamplingError),

    /// WAV encoding error
    #[error("WAV encoding failed: {0}")]
    Encode(#[from] hound::Error),

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
