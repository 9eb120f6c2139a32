//! WAV writing for temp artifacts
//!
//! Processed audio is written as 32-bit float WAV so no precision is lost
//! between the effect stage and the finalization stage.

use crate::error::Result;
use std::path::Path;

/// Write interleaved f32 samples as a 32-bit float WAV file
pub fn write_wav(path: &Path, samples: &[f32], sample_rate: u32, channels: u16) -> Result<()> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut writer = hound::WavWriter::create(path, spec)?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    Ok(())
}
