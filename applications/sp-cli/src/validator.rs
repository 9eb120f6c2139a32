//! Batch pre-flight validation
//!
//! Produces the validated work-item list for a run. The whole batch is
//! checked before any item begins processing: a single missing file, wrong
//! extension, or pre-existing artifact rejects everything with zero
//! filesystem mutations. Checks are read-only, so validating the same
//! inputs twice yields the same items.

use crate::error::{PipelineError, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Prefix of the transient artifact written by the effect stage
pub const TEMP_PREFIX: &str = "temp-";

/// Prefix of the finalized output artifact
pub const OUTPUT_PREFIX: &str = "sp-";

/// One input file and its derived artifact paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    /// The source `.wav` file
    pub input_path: PathBuf,
    /// Transient artifact (`temp-<name>`), created by the effect stage and
    /// destroyed by the finalizer - deleted or renamed, never both
    pub temp_path: PathBuf,
    /// Final artifact (`sp-<name>`)
    pub output_path: PathBuf,
}

impl WorkItem {
    /// The input's file name, for progress messages
    pub fn file_name(&self) -> String {
        self.input_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.input_path.display().to_string())
    }
}

/// Validate a batch of candidate inputs
///
/// For each path, in input order:
/// 1. must exist as a regular file
/// 2. must have the extension `.wav` (case-insensitive)
/// 3. neither derived artifact path may already exist on disk
///
/// `output_dir` overrides the per-file default of the input's own
/// directory.
pub fn validate_batch(inputs: &[PathBuf], output_dir: Option<&Path>) -> Result<Vec<WorkItem>> {
    let mut items = Vec::with_capacity(inputs.len());

    for input in inputs {
        if !input.is_file() {
            return Err(PipelineError::NotAFile(input.display().to_string()));
        }

        let is_wav = input
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("wav"))
            .unwrap_or(false);
        if !is_wav {
            return Err(PipelineError::WrongExtension(input.display().to_string()));
        }

        // is_file() above all but guarantees a final component
        let Some(file_name) = input.file_name() else {
            return Err(PipelineError::NotAFile(input.display().to_string()));
        };

        let resolved_dir = match output_dir {
            Some(dir) => dir.to_path_buf(),
            None => input
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        };

        let temp_path = resolved_dir.join(prefixed(TEMP_PREFIX, file_name));
        let output_path = resolved_dir.join(prefixed(OUTPUT_PREFIX, file_name));

        for artifact in [&temp_path, &output_path] {
            if artifact.exists() {
                return Err(PipelineError::ArtifactCollision(
                    artifact.display().to_string(),
                ));
            }
        }

        items.push(WorkItem {
            input_path: input.clone(),
            temp_path,
            output_path,
        });
    }

    Ok(items)
}

/// Prepend a prefix to a file name without losing non-UTF-8 names
fn prefixed(prefix: &str, file_name: &std::ffi::OsStr) -> OsString {
    let mut name = OsString::from(prefix);
    name.push(file_name);
    name
}
