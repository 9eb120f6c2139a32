//! Offline sample rate conversion
//!
//! Whole-buffer sinc resampling using the rubato crate. This is a batch
//! tool, so there is no streaming state to manage: the full decoded buffer
//! goes in, the full resampled buffer comes out.

use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};
use thiserror::Error;

/// Resampling errors
#[derive(Error, Debug)]
pub enum ResamplingError {
    #[error("Invalid sample rate: {0} Hz (must be > 0 and < 1MHz)")]
    InvalidSampleRate(u32),

    #[error("Invalid channel count: {0} (must be 1-8)")]
    InvalidChannelCount(usize),

    #[error("Input buffer size mismatch: {samples} samples is not divisible by {channels} channels")]
    BufferSizeMismatch { samples: usize, channels: usize },

    #[error("Resampler initialization failed: {0}")]
    InitializationFailed(String),

    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

pub type Result<T> = std::result::Result<T, ResamplingError>;

/// Input chunk size the sinc resampler is configured with
const CHUNK_FRAMES: usize = 1024;

/// Resample an interleaved buffer from `from_hz` to `to_hz`
///
/// Returns the input unchanged when the rates already match. Uses a
/// cubic-interpolated sinc filter (128-tap, 0.95 cutoff) - a quality level
/// suited for offline processing without being needlessly slow.
pub fn resample(samples: &[f32], channels: usize, from_hz: u32, to_hz: u32) -> Result<Vec<f32>> {
    for rate in [from_hz, to_hz] {
        if rate == 0 || rate >= 1_000_000 {
            return Err(ResamplingError::InvalidSampleRate(rate));
        }
    }
    if !(1..=8).contains(&channels) {
        return Err(ResamplingError::InvalidChannelCount(channels));
    }
    if samples.len() % channels != 0 {
        return Err(ResamplingError::BufferSizeMismatch {
            samples: samples.len(),
            channels,
        });
    }

    if from_hz == to_hz {
        return Ok(samples.to_vec());
    }

    let frames = samples.len() / channels;
    let ratio = to_hz as f64 / from_hz as f64;

    // De-interleave into planar channel buffers
    let mut planar: Vec<Vec<f32>> = vec![Vec::with_capacity(frames); channels];
    for frame in samples.chunks_exact(channels) {
        for (ch, &sample) in frame.iter().enumerate() {
            planar[ch].push(sample);
        }
    }

    let params = SincInterpolationParameters {
        sinc_len: 128,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Cubic,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris,
    };

    let mut resampler = SincFixedIn::<f32>::new(ratio, 2.0, params, CHUNK_FRAMES, channels)
        .map_err(|e| {
            ResamplingError::InitializationFailed(format!("SincFixedIn creation failed: {}", e))
        })?;

    let mut out_planar: Vec<Vec<f32>> = vec![Vec::new(); channels];
    let mut pos = 0;

    // Full chunks
    while frames - pos >= resampler.input_frames_next() {
        let needed = resampler.input_frames_next();
        let chunk: Vec<&[f32]> = planar.iter().map(|ch| &ch[pos..pos + needed]).collect();
        let processed = resampler
            .process(&chunk, None)
            .map_err(|e| ResamplingError::ProcessingFailed(e.to_string()))?;
        append_planar(&mut out_planar, processed);
        pos += needed;
    }

    // Tail shorter than a chunk
    if pos < frames {
        let chunk: Vec<&[f32]> = planar.iter().map(|ch| &ch[pos..]).collect();
        let processed = resampler
            .process_partial(Some(&chunk), None)
            .map_err(|e| ResamplingError::ProcessingFailed(e.to_string()))?;
        append_planar(&mut out_planar, processed);
    }

    // Flush the filter's delay line
    let processed = resampler
        .process_partial::<&[f32]>(None, None)
        .map_err(|e| ResamplingError::ProcessingFailed(e.to_string()))?;
    append_planar(&mut out_planar, processed);

    // Re-interleave
    let out_frames = out_planar[0].len();
    let mut out = Vec::with_capacity(out_frames * channels);
    for frame in 0..out_frames {
        for ch in &out_planar {
            out.push(ch[frame]);
        }
    }

    Ok(out)
}

fn append_planar(out_planar: &mut [Vec<f32>], processed: Vec<Vec<f32>>) {
    for (ch, chunk) in processed.into_iter().enumerate() {
        out_planar[ch].extend_from_slice(&chunk);
    }
}
