//! Run configuration
//!
//! Collected once from the CLI, immutable for the whole batch.

use crate::error::{PipelineError, Result};
use std::path::PathBuf;

/// Audio files will be re-sampled to this rate when none is specified
pub const DEFAULT_SAMPLE_RATE_HZ: u32 = 44100;

/// Configuration for one batch run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Input `.wav` paths, in CLI order
    pub inputs: Vec<PathBuf>,
    /// Path to the effect to load (file or bundle directory)
    pub plugin_path: PathBuf,
    /// User-supplied effect parameters (keys validated against the loaded
    /// effect's declared names)
    pub plugin_parameters: serde_json::Map<String, serde_json::Value>,
    /// Processing sample rate in Hz
    pub sample_rate_hz: u32,
    /// Output directory; each input's own directory when absent
    pub output_dir: Option<PathBuf>,
    /// Normalization target: peak level this far below full scale, in dB
    pub target_peak_db: f64,
}

impl RunConfig {
    /// Check the configuration-level preconditions
    ///
    /// The output directory (when given) must exist, and the effect path
    /// must exist as a file or a directory. Checked before anything else,
    /// in that order.
    pub fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.output_dir {
            if !dir.is_dir() {
                return Err(PipelineError::OutputDirMissing(
                    dir.display().to_string(),
                ));
            }
        }

        if !self.plugin_path.is_file() && !self.plugin_path.is_dir() {
            return Err(PipelineError::PluginMissing(
                self.plugin_path.display().to_string(),
            ));
        }

        Ok(())
    }
}
