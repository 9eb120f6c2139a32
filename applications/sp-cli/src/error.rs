//! Error types for the batch pipeline

use sp_audio::{AudioError, EffectError, ResamplingError};
use sp_loudness::LoudnessError;
use thiserror::Error;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors that can abort a batch run
///
/// Everything up to `UnknownParameter` is detected during the upfront
/// validation pass, before any audio processing begins. The rest can only
/// occur mid-batch.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("'{0}' output directory does not exist")]
    OutputDirMissing(String),

    #[error("'{0}' vst does not exist")]
    PluginMissing(String),

    #[error("'{0}' is not a file")]
    NotAFile(String),

    #[error("'{0}' does not have the extension '.wav'")]
    WrongExtension(String),

    #[error("'{0}' already exists, delete to continue")]
    ArtifactCollision(String),

    #[error("'{key}' vst parameter is not a valid effect parameter.\nValid parameters: {valid:?}")]
    UnknownParameter { key: String, valid: Vec<String> },

    #[error("Effect transform failed: {0}")]
    Transform(#[from] EffectError),

    #[error("Loudness analysis failed: {0}")]
    Analysis(#[from] LoudnessError),

    #[error("Audio codec error: {0}")]
    Audio(#[from] AudioError),

    #[error("Resampling failed: {0}")]
    Resample(#[from] ResamplingError),

    #[error("Cannot finalize '{temp}': output '{output}' already exists")]
    RenameCollision { temp: String, output: String },

    #[error("Failed to rename '{temp}' to '{output}': {source}")]
    Rename {
        temp: String,
        output: String,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
