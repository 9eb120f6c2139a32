//! Batch runner
//!
//! Validate everything, then process every item in order. Each item runs
//! decode -> resample -> effect -> write temp -> measure -> decide ->
//! finalize as an uninterruptible unit; the collaborators are blocking, so
//! items are strictly sequential.

use crate::config::RunConfig;
use crate::error::{PipelineError, Result};
use crate::finalizer;
use crate::validator::{self, WorkItem};
use sp_audio::{resampling, writer, EffectPlugin, WavDecoder};
use sp_loudness::{decide, measure_wav_file, GainDecision};

/// Run a whole batch
///
/// Phase one performs every validation (configuration, file set, effect
/// parameters) before any audio is touched; phase two processes the items
/// sequentially. A mid-batch failure propagates immediately - earlier
/// outputs stay finalized, the failing item's temp artifact stays on disk
/// for inspection.
pub fn run(config: &RunConfig) -> Result<()> {
    config.validate()?;

    let items = validator::validate_batch(&config.inputs, config.output_dir.as_deref())?;

    let mut plugin = sp_audio::load_plugin(&config.plugin_path)?;
    check_parameter_keys(plugin.as_ref(), &config.plugin_parameters)?;
    for (key, value) in &config.plugin_parameters {
        plugin.set_parameter(key, value)?;
    }

    tracing::info!(
        "Processing {} file(s) with '{}' at {} Hz",
        items.len(),
        plugin.name(),
        config.sample_rate_hz
    );

    for item in &items {
        process_item(item, plugin.as_mut(), config)?;
    }

    Ok(())
}

/// Reject parameter keys the loaded effect does not declare
fn check_parameter_keys(
    plugin: &dyn EffectPlugin,
    parameters: &serde_json::Map<String, serde_json::Value>,
) -> Result<()> {
    let valid = plugin.parameter_names();
    for key in parameters.keys() {
        if !valid.iter().any(|name| name == key) {
            return Err(PipelineError::UnknownParameter {
                key: key.clone(),
                valid: valid.clone(),
            });
        }
    }
    Ok(())
}

/// Process a single validated work item
fn process_item(item: &WorkItem, plugin: &mut dyn EffectPlugin, config: &RunConfig) -> Result<()> {
    let name = item.file_name();
    tracing::debug!("{}: decoding", name);

    let decoded = WavDecoder::decode(&item.input_path)?;
    let mut samples = resampling::resample(
        &decoded.samples,
        decoded.channels as usize,
        decoded.sample_rate,
        config.sample_rate_hz,
    )?;

    plugin.process(&mut samples, config.sample_rate_hz, decoded.channels)?;

    writer::write_wav(
        &item.temp_path,
        &samples,
        config.sample_rate_hz,
        decoded.channels,
    )?;

    let info = measure_wav_file(&item.temp_path)?;

    // The decision works on the peak's magnitude below full scale, the
    // same convention the analyzer's dBFS figure negates
    let decision = decide(-info.sample_peak_dbfs, config.target_peak_db);

    match decision {
        GainDecision::Amplify { gain_db } => {
            tracing::info!("{}: Increasing volume by {} dB.", name, gain_db);
        }
        GainDecision::PassThroughExact => {
            tracing::warn!("{}: Volume is at 0dB, audio might be clipped.", name);
        }
        GainDecision::PassThroughQuiet => {
            tracing::info!("{}: Volume is already good.", name);
        }
    }

    finalizer::finalize(&decision, item)
}
