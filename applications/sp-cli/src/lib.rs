//! sp-it - batch .wav processing pipeline
//!
//! Each input file is re-sampled, processed with the configured effect,
//! written to a `temp-` artifact, peak-measured, and finalized as an `sp-`
//! artifact: amplified up to the normalization target when it measures
//! quiet, renamed as-is otherwise.
//!
//! The run is two-phase: every cheap check (output directory, effect path,
//! input files, artifact collisions, parameter keys) happens before any
//! audio is touched, and a single bad item rejects the whole batch with
//! zero side effects. Once processing starts, a failure halts the remaining
//! items but leaves already-finalized outputs intact.

#![deny(unsafe_code)]

pub mod config;
mod error;
pub mod finalizer;
pub mod runner;
pub mod validator;

pub use config::{RunConfig, DEFAULT_SAMPLE_RATE_HZ};
pub use error::{PipelineError, Result};
pub use runner::run;
pub use validator::{validate_batch, WorkItem};
