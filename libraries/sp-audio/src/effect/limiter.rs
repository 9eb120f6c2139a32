//! Peak limiter effect
//!
//! A simple brick-wall limiter with instant attack and exponential release.
//! Useful ahead of normalization to tame outliers without dragging the whole
//! file down.

use super::{value_as_f64, EffectError, EffectPlugin, Result};

/// Default ceiling in dBFS
const DEFAULT_CEILING_DB: f64 = -0.3;

/// Default release time in milliseconds
const DEFAULT_RELEASE_MS: f64 = 100.0;

/// Brick-wall peak limiter
///
/// Parameters: `ceiling_db` (threshold, dBFS) and `release_ms`.
#[derive(Debug)]
pub struct LimiterEffect {
    ceiling_db: f64,
    release_ms: f64,
}

impl Default for LimiterEffect {
    fn default() -> Self {
        Self {
            ceiling_db: DEFAULT_CEILING_DB,
            release_ms: DEFAULT_RELEASE_MS,
        }
    }
}

impl EffectPlugin for LimiterEffect {
    fn name(&self) -> &str {
        "limiter"
    }

    fn parameter_names(&self) -> Vec<String> {
        vec!["ceiling_db".to_string(), "release_ms".to_string()]
    }

    fn set_parameter(&mut self, name: &str, value: &serde_json::Value) -> Result<()> {
        match name {
            "ceiling_db" => {
                self.ceiling_db = value_as_f64(name, value)?;
                Ok(())
            }
            "release_ms" => {
                let release = value_as_f64(name, value)?;
                if release <= 0.0 {
                    return Err(EffectError::InvalidParameter {
                        name: name.to_string(),
                        reason: format!("release must be positive, got {}", release),
                    });
                }
                self.release_ms = release;
                Ok(())
            }
            other => Err(EffectError::UnknownParameter {
                name: other.to_string(),
                valid: self.parameter_names(),
            }),
        }
    }

    fn process(&mut self, samples: &mut Vec<f32>, sample_rate: u32, channels: u16) -> Result<()> {
        let channels = channels as usize;
        if channels == 0 || samples.len() % channels != 0 {
            return Err(EffectError::ProcessingFailed(format!(
                "Sample count {} is not divisible by channel count {}",
                samples.len(),
                channels
            )));
        }

        let ceiling = super::db_to_linear(self.ceiling_db);
        let release_samples = (sample_rate as f64 * self.release_ms / 1000.0).max(1.0);
        // Per-frame recovery factor toward unity gain
        let release_coeff = (-1.0 / release_samples).exp() as f32;

        let mut gain = 1.0_f32;
        let frames = samples.len() / channels;

        for frame_idx in 0..frames {
            let frame = &mut samples[frame_idx * channels..(frame_idx + 1) * channels];

            let mut frame_peak = 0.0_f32;
            for sample in frame.iter() {
                frame_peak = frame_peak.max(sample.abs());
            }

            let target_gain = if frame_peak * gain > ceiling {
                ceiling / frame_peak
            } else {
                1.0
            };

            // Instant attack, smoothed release
            if target_gain < gain {
                gain = target_gain;
            } else {
                gain = 1.0 - (1.0 - gain) * release_coeff;
            }

            for sample in frame.iter_mut() {
                *sample *= gain;
            }
        }

        Ok(())
    }
}
