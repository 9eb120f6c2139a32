//! Artifact finalization
//!
//! Executes the normalization decision for one work item. Exactly one of
//! {temp deleted, temp renamed} happens on success; on failure the temp
//! artifact stays on disk so no data is lost.

use crate::error::{PipelineError, Result};
use crate::validator::WorkItem;
use sp_audio::effect;
use sp_loudness::GainDecision;
use std::fs;

/// Finalize one work item according to its gain decision
///
/// - [`GainDecision::Amplify`]: the effect transform's gain-adjustment mode
///   writes the boosted output, then the temp file is deleted. A transform
///   failure leaves the temp file in place.
/// - Both pass-through decisions: the temp file is renamed to the output
///   path. A pre-existing output at this point should be impossible given
///   upfront validation and is treated as a fatal consistency violation.
pub fn finalize(decision: &GainDecision, item: &WorkItem) -> Result<()> {
    match decision {
        GainDecision::Amplify { gain_db } => {
            effect::amplify_wav_file(&item.temp_path, &item.output_path, *gain_db)?;
            fs::remove_file(&item.temp_path)?;
        }
        GainDecision::PassThroughExact | GainDecision::PassThroughQuiet => {
            if item.output_path.exists() {
                return Err(PipelineError::RenameCollision {
                    temp: item.temp_path.display().to_string(),
                    output: item.output_path.display().to_string(),
                });
            }

            fs::rename(&item.temp_path, &item.output_path).map_err(|source| {
                PipelineError::Rename {
                    temp: item.temp_path.display().to_string(),
                    output: item.output_path.display().to_string(),
                    source,
                }
            })?;
        }
    }

    Ok(())
}
