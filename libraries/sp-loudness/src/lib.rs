//! Peak measurement and normalization decisions for sound-press
//!
//! This crate provides:
//! - Sample/true peak measurement (ebur128-backed)
//! - The normalization decision: given a measured peak and a target peak,
//!   amplify, pass through, or pass through with a clipping warning
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌───────────────┐
//! │ Temp WAV    │ ──► │ PeakAnalyzer │ ──► │   PeakInfo    │
//! └─────────────┘     └──────────────┘     └───────────────┘
//!                                                  │
//!                                                  ▼
//!                                          ┌──────────────┐
//!                                          │   decide()   │ ──► GainDecision
//!                                          └──────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use sp_loudness::{decide, measure_wav_file, GainDecision, DEFAULT_TARGET_PEAK_DB};
//!
//! let info = measure_wav_file(Path::new("temp-track.wav"))?;
//! match decide(-info.sample_peak_dbfs, DEFAULT_TARGET_PEAK_DB) {
//!     GainDecision::Amplify { gain_db } => println!("boost by {} dB", gain_db),
//!     GainDecision::PassThroughExact => println!("at 0 dB, might be clipped"),
//!     GainDecision::PassThroughQuiet => println!("already good"),
//! }
//! ```

#![deny(unsafe_code)]

mod analyzer;
mod error;
mod normalizer;

pub use analyzer::{measure_wav_file, PeakAnalyzer, PeakInfo};
pub use error::{LoudnessError, Result};
pub use normalizer::{decide, round_tenths, GainDecision};

/// Default normalization target: peak level this far below full scale, in dB
pub const DEFAULT_TARGET_PEAK_DB: f64 = 0.5;
