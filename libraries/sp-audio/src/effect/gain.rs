//! Gain effect and the file-to-file gain-adjustment mode
//!
//! The gain-adjustment mode is what the finalizer invokes when a temp
//! artifact measures quieter than the normalization target: the temp file is
//! re-read, boosted in the linear domain, and written to the output path at
//! the same rate and format.

use super::{value_as_f64, EffectError, EffectPlugin, Result};
use std::path::Path;

/// Convert a dB gain to a linear multiplier
pub fn db_to_linear(gain_db: f64) -> f32 {
    10.0_f32.powf(gain_db as f32 / 20.0)
}

/// Fixed gain effect
///
/// A single `gain_db` parameter, 0 dB by default (pass-through).
#[derive(Debug, Default)]
pub struct GainEffect {
    gain_db: f64,
}

impl GainEffect {
    pub fn new(gain_db: f64) -> Self {
        Self { gain_db }
    }
}

impl EffectPlugin for GainEffect {
    fn name(&self) -> &str {
        "gain"
    }

    fn parameter_names(&self) -> Vec<String> {
        vec!["gain_db".to_string()]
    }

    fn set_parameter(&mut self, name: &str, value: &serde_json::Value) -> Result<()> {
        match name {
            "gain_db" => {
                self.gain_db = value_as_f64(name, value)?;
                Ok(())
            }
            other => Err(EffectError::UnknownParameter {
                name: other.to_string(),
                valid: self.parameter_names(),
            }),
        }
    }

    fn process(&mut self, samples: &mut Vec<f32>, _sample_rate: u32, _channels: u16) -> Result<()> {
        let gain = db_to_linear(self.gain_db);
        if (gain - 1.0).abs() > 0.0001 {
            for sample in samples.iter_mut() {
                *sample *= gain;
            }
        }
        Ok(())
    }
}

/// Apply a dB gain to a WAV file, writing the result to `output`
///
/// The output keeps the input's sample rate, channel count, and sample
/// format. The input file is left untouched.
pub fn amplify_wav_file(input: &Path, output: &Path, gain_db: f64) -> Result<()> {
    let mut reader = hound::WavReader::open(input)?;
    let spec = reader.spec();
    let gain = db_to_linear(gain_db);

    let mut writer = hound::WavWriter::create(output, spec)?;

    match spec.sample_format {
        hound::SampleFormat::Float => {
            for sample in reader.samples::<f32>() {
                writer.write_sample(sample? * gain)?;
            }
        }
        hound::SampleFormat::Int => {
            // Scale in float, clamp back into the integer range
            let full_scale = (1_i64 << (spec.bits_per_sample - 1)) as f32;
            let max = full_scale - 1.0;
            for sample in reader.samples::<i32>() {
                let scaled = (sample? as f32 * gain).round().clamp(-full_scale, max);
                writer.write_sample(scaled as i32)?;
            }
        }
    }

    writer.finalize()?;
    Ok(())
}
