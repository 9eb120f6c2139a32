//! Normalization decision
//!
//! The decision is a pure function of two scalars: the measured peak level
//! and the configured target peak, both expressed as positive magnitudes in
//! dB below full scale. The difference is rounded to one decimal place
//! before branching, and the rounding is load-bearing: it determines which
//! branch a near-boundary measurement falls into.

/// Outcome of the normalization decision for one artifact
///
/// A tagged three-way classification; the exact-full-scale case is its own
/// variant so it can never silently merge with the general quiet case.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GainDecision {
    /// Measured level is quieter than target; boost by exactly `gain_db`
    Amplify {
        /// Positive dB gain, already rounded to one decimal place
        gain_db: f64,
    },
    /// Measured peak sits exactly at full scale (0 dBFS); the audio may
    /// already be clipped, pass it through with a warning
    PassThroughExact,
    /// Measured level is already at or above the target; nothing to do
    PassThroughQuiet,
}

/// Round to one decimal place, half away from zero
///
/// `f64::round` rounds half away from zero, which is the tie-break rule
/// locked in by the boundary tests below.
pub fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Decide the gain adjustment for a measured peak level
///
/// # Arguments
/// * `measured_peak_db` - the analyzer's reported max volume as a positive
///   magnitude in dB below full scale (a peak of -3.2 dBFS arrives as 3.2)
/// * `target_peak_db` - configured target, same convention (e.g. 0.5)
///
/// # Algorithm
/// 1. `gain = round(measured - target)` at one decimal place
/// 2. `gain > 0` - the signal needs boosting by exactly `gain` dB
/// 3. `gain == -target` - the peak is exactly at full scale; flag clipping
/// 4. anything else non-positive - already loud enough
pub fn decide(measured_peak_db: f64, target_peak_db: f64) -> GainDecision {
    let gain_db = round_tenths(measured_peak_db - target_peak_db);

    if gain_db > 0.0 {
        GainDecision::Amplify { gain_db }
    } else if gain_db == -target_peak_db {
        GainDecision::PassThroughExact
    } else {
        GainDecision::PassThroughQuiet
    }
}
