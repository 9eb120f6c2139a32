//! Effect transform boundary
//!
//! The pipeline treats the effect stage as an opaque transform
//! `(samples, sample_rate) -> samples` with declared parameters. An effect
//! is loaded from a manifest file (JSON) naming one of the built-in
//! transforms and its default parameter values:
//!
//! ```json
//! { "effect": "gain", "parameters": { "gain_db": 3.0 } }
//! ```
//!
//! For `.vst3`-style bundle directories the manifest is read from
//! `<bundle>/effect.json`. Parameter keys supplied by the user must be a
//! subset of the loaded effect's declared names; violations list the valid
//! names.

mod gain;
mod limiter;

pub use gain::{amplify_wav_file, db_to_linear, GainEffect};
pub use limiter::LimiterEffect;

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Effect names known to the manifest loader
const KNOWN_EFFECTS: &[&str] = &["gain", "limiter"];

/// Manifest filename looked up inside bundle directories
const BUNDLE_MANIFEST: &str = "effect.json";

/// Errors from the effect boundary
#[derive(Error, Debug)]
pub enum EffectError {
    #[error("'{0}' effect does not exist")]
    PluginNotFound(String),

    #[error("Failed to read effect manifest: {0}")]
    ManifestError(String),

    #[error("'{name}' is not a known effect. Known effects: {known:?}")]
    UnknownEffect { name: String, known: Vec<String> },

    #[error("'{name}' is not a valid effect parameter. Valid parameters: {valid:?}")]
    UnknownParameter { name: String, valid: Vec<String> },

    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Effect processing failed: {0}")]
    ProcessingFailed(String),

    #[error("WAV I/O failed: {0}")]
    Wav(#[from] hound::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for effect operations
pub type Result<T> = std::result::Result<T, EffectError>;

/// An opaque audio transform with declared parameters
///
/// Implementations may change the buffer length (e.g. a reverb tail), but
/// must keep the interleaved layout and channel count.
pub trait EffectPlugin: Send {
    /// Effect name (for messages)
    fn name(&self) -> &str;

    /// Names of the parameters this effect declares
    fn parameter_names(&self) -> Vec<String>;

    /// Set a parameter by name
    ///
    /// Values arrive as JSON (numbers or numeric strings, matching the
    /// `--vst-parameters` surface).
    fn set_parameter(&mut self, name: &str, value: &serde_json::Value) -> Result<()>;

    /// Process an interleaved buffer in place
    fn process(&mut self, samples: &mut Vec<f32>, sample_rate: u32, channels: u16) -> Result<()>;
}

/// Effect manifest file contents
#[derive(Debug, Deserialize)]
struct EffectManifest {
    /// Name of the built-in effect
    effect: String,
    /// Default parameter values applied at load time
    #[serde(default)]
    parameters: serde_json::Map<String, serde_json::Value>,
}

/// Load an effect from a manifest path
///
/// The path must exist as a file (the manifest itself) or a directory (a
/// bundle containing `effect.json`).
pub fn load_plugin(path: &Path) -> Result<Box<dyn EffectPlugin>> {
    let manifest_path = if path.is_dir() {
        path.join(BUNDLE_MANIFEST)
    } else if path.is_file() {
        path.to_path_buf()
    } else {
        return Err(EffectError::PluginNotFound(path.display().to_string()));
    };

    let raw = std::fs::read_to_string(&manifest_path).map_err(|e| {
        EffectError::ManifestError(format!("{}: {}", manifest_path.display(), e))
    })?;

    let manifest: EffectManifest = serde_json::from_str(&raw)
        .map_err(|e| EffectError::ManifestError(format!("{}: {}", manifest_path.display(), e)))?;

    let mut plugin: Box<dyn EffectPlugin> = match manifest.effect.as_str() {
        "gain" => Box::new(GainEffect::default()),
        "limiter" => Box::new(LimiterEffect::default()),
        other => {
            return Err(EffectError::UnknownEffect {
                name: other.to_string(),
                known: KNOWN_EFFECTS.iter().map(|s| (*s).to_string()).collect(),
            })
        }
    };

    for (name, value) in &manifest.parameters {
        plugin.set_parameter(name, value)?;
    }

    tracing::debug!("Loaded '{}' effect from {}", plugin.name(), path.display());
    Ok(plugin)
}

/// Interpret a JSON parameter value as f64
///
/// Accepts numbers and numeric strings (the original CLI passed both).
pub(crate) fn value_as_f64(name: &str, value: &serde_json::Value) -> Result<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64().ok_or_else(|| EffectError::InvalidParameter {
            name: name.to_string(),
            reason: format!("{} is not representable as f64", n),
        }),
        serde_json::Value::String(s) => {
            s.parse::<f64>().map_err(|_| EffectError::InvalidParameter {
                name: name.to_string(),
                reason: format!("'{}' is not a number", s),
            })
        }
        other => Err(EffectError::InvalidParameter {
            name: name.to_string(),
            reason: format!("expected a number, got {}", other),
        }),
    }
}
