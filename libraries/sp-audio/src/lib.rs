//! Audio I/O and effect transforms for sound-press
//!
//! This crate provides the codec and effect collaborators of the batch
//! pipeline:
//! - WAV decoding via Symphonia (any sample format, to interleaved f32)
//! - Offline sample rate conversion via rubato
//! - 32-bit float WAV writing via hound (the temp artifact format)
//! - The [`EffectPlugin`] boundary: an opaque `(samples, rate) -> samples`
//!   transform with declared, validated parameters
//!
//! # Example
//!
//! ```ignore
//! use sp_audio::{decoder::WavDecoder, resampling, writer};
//!
//! let decoded = WavDecoder::decode(Path::new("in.wav"))?;
//! let samples = resampling::resample(
//!     &decoded.samples,
//!     decoded.channels as usize,
//!     decoded.sample_rate,
//!     44100,
//! )?;
//! writer::write_wav(Path::new("temp-in.wav"), &samples, 44100, decoded.channels)?;
//! ```

#![deny(unsafe_code)]

pub mod decoder;
pub mod effect;
mod error;
pub mod resampling;
pub mod writer;

pub use decoder::{DecodedAudio, WavDecoder};
pub use effect::{load_plugin, EffectError, EffectPlugin};
pub use error::{AudioError, Result};
pub use resampling::ResamplingError;
