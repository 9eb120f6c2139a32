//! Peak level measurement
//!
//! Measures the maximum signal level of an audio artifact using the ebur128
//! crate:
//! - Sample peak (dBFS) - the maximum sample value; this is what the
//!   normalization decision consumes
//! - True peak (dBTP) - the maximum inter-sample peak (4x oversampling),
//!   reported for diagnostics

use crate::error::{LoudnessError, Result};
use ebur128::{EbuR128, Mode};
use std::fmt;
use std::path::Path;

/// Peak information for one audio artifact
#[derive(Debug, Clone, PartialEq)]
pub struct PeakInfo {
    /// Sample peak in dBFS (0 dB = full scale; always <= 0 for integer
    /// sources, can exceed 0 for float sources)
    pub sample_peak_dbfs: f64,

    /// True peak in dBTP, accounting for inter-sample peaks
    pub true_peak_dbfs: f64,

    /// Duration of the analyzed audio in seconds
    pub duration_seconds: f64,

    /// Sample rate of the analyzed audio
    pub sample_rate: u32,

    /// Number of channels
    pub channels: u32,
}

impl fmt::Display for PeakInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Sample Peak: {:.1} dBFS, True Peak: {:.1} dBTP",
            self.sample_peak_dbfs, self.true_peak_dbfs
        )
    }
}

/// Peak analyzer
///
/// Feed interleaved f32 frames, then call [`PeakAnalyzer::finalize`] to get
/// the measured peaks.
pub struct PeakAnalyzer {
    /// EBU R128 analyzer instance (peak modes only)
    ebur128: EbuR128,
    /// Sample rate
    sample_rate: u32,
    /// Number of channels
    channels: u32,
    /// Total samples processed
    samples_processed: usize,
}

impl PeakAnalyzer {
    /// Create a new peak analyzer
    ///
    /// # Arguments
    /// * `sample_rate` - Sample rate in Hz (8000-384000)
    /// * `channels` - Number of channels (1-8)
    pub fn new(sample_rate: u32, channels: u32) -> Result<Self> {
        if !(8000..=384000).contains(&sample_rate) {
            return Err(LoudnessError::InvalidSampleRate(sample_rate));
        }
        if !(1..=8).contains(&channels) {
            return Err(LoudnessError::InvalidChannelCount(channels));
        }

        let mode = Mode::SAMPLE_PEAK | Mode::TRUE_PEAK;
        let ebur128 = EbuR128::new(channels, sample_rate, mode)?;

        Ok(Self {
            ebur128,
            sample_rate,
            channels,
            samples_processed: 0,
        })
    }

    /// Add interleaved audio frames for analysis
    ///
    /// Length must be divisible by the channel count.
    pub fn add_frames(&mut self, samples: &[f32]) -> Result<()> {
        if samples.is_empty() {
            return Ok(());
        }

        if samples.len() % self.channels as usize != 0 {
            return Err(LoudnessError::AnalysisError(format!(
                "Sample count {} is not divisible by channel count {}",
                samples.len(),
                self.channels
            )));
        }

        self.ebur128.add_frames_f32(samples)?;
        self.samples_processed += samples.len();

        Ok(())
    }

    /// Finalize analysis and return the measured peaks
    ///
    /// # Errors
    /// Returns [`LoudnessError::NoSamples`] if nothing was fed, and
    /// [`LoudnessError::SilentAudio`] if the signal is all zeros - a silent
    /// file has no finite peak and would otherwise request an infinite gain
    /// downstream.
    pub fn finalize(self) -> Result<PeakInfo> {
        if self.samples_processed == 0 {
            return Err(LoudnessError::NoSamples);
        }

        let frames = self.samples_processed / self.channels as usize;
        let duration_seconds = frames as f64 / self.sample_rate as f64;

        // Maximum across all channels
        let mut sample_peak_linear = 0.0_f64;
        let mut true_peak_linear = 0.0_f64;
        for ch in 0..self.channels {
            sample_peak_linear = sample_peak_linear.max(self.ebur128.sample_peak(ch)?);
            true_peak_linear = true_peak_linear.max(self.ebur128.true_peak(ch)?);
        }

        if sample_peak_linear <= 0.0 {
            return Err(LoudnessError::SilentAudio);
        }

        Ok(PeakInfo {
            sample_peak_dbfs: 20.0 * sample_peak_linear.log10(),
            true_peak_dbfs: 20.0 * true_peak_linear.log10(),
            duration_seconds,
            sample_rate: self.sample_rate,
            channels: self.channels,
        })
    }

    /// Get the number of samples processed so far
    pub fn samples_processed(&self) -> usize {
        self.samples_processed
    }
}

/// Measure the peak level of a WAV file
///
/// Handles both float and integer sample formats; integers are scaled
/// symmetrically (divide by 2^(N-1)).
pub fn measure_wav_file(path: &Path) -> Result<PeakInfo> {
    if !path.exists() {
        return Err(LoudnessError::FileNotFound(path.display().to_string()));
    }

    let mut reader = hound::WavReader::open(path)?;
    let spec = reader.spec();

    let mut analyzer = PeakAnalyzer::new(spec.sample_rate, u32::from(spec.channels))?;

    // Feed in ~1 second chunks
    let chunk_samples = spec.sample_rate as usize * spec.channels as usize;
    let mut buffer = Vec::with_capacity(chunk_samples);

    match spec.sample_format {
        hound::SampleFormat::Float => {
            for sample in reader.samples::<f32>() {
                buffer.push(sample?);
                if buffer.len() == chunk_samples {
                    analyzer.add_frames(&buffer)?;
                    buffer.clear();
                }
            }
        }
        hound::SampleFormat::Int => {
            let full_scale = (1_i64 << (spec.bits_per_sample - 1)) as f32;
            for sample in reader.samples::<i32>() {
                buffer.push(sample? as f32 / full_scale);
                if buffer.len() == chunk_samples {
                    analyzer.add_frames(&buffer)?;
                    buffer.clear();
                }
            }
        }
    }

    if !buffer.is_empty() {
        analyzer.add_frames(&buffer)?;
    }

    let info = analyzer.finalize()?;
    tracing::debug!("{}: {}", path.display(), info);
    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyzer_creation() {
        assert!(PeakAnalyzer::new(44100, 2).is_ok());
        assert!(PeakAnalyzer::new(48000, 1).is_ok());

        assert!(PeakAnalyzer::new(100, 2).is_err());
        assert!(PeakAnalyzer::new(500000, 2).is_err());
        assert!(PeakAnalyzer::new(44100, 0).is_err());
        assert!(PeakAnalyzer::new(44100, 10).is_err());
    }

    #[test]
    fn test_no_samples_error() {
        let analyzer = PeakAnalyzer::new(44100, 2).unwrap();
        assert!(matches!(analyzer.finalize(), Err(LoudnessError::NoSamples)));
    }

    #[test]
    fn test_silent_audio() {
        let mut analyzer = PeakAnalyzer::new(44100, 2).unwrap();
        let silence = vec![0.0_f32; 44100 * 2];
        analyzer.add_frames(&silence).unwrap();

        assert!(matches!(
            analyzer.finalize(),
            Err(LoudnessError::SilentAudio)
        ));
    }

    #[test]
    fn test_invalid_sample_count() {
        let mut analyzer = PeakAnalyzer::new(44100, 2).unwrap();
        // 5 samples is not divisible by 2 channels
        assert!(analyzer.add_frames(&[0.1; 5]).is_err());
    }

    #[test]
    fn test_half_scale_sine_peak() {
        let mut analyzer = PeakAnalyzer::new(44100, 2).unwrap();

        // 0.5 amplitude sine = -6.02 dBFS sample peak
        let mut samples = Vec::with_capacity(44100 * 2);
        for i in 0..44100 {
            let t = i as f32 / 44100.0;
            let s = 0.5 * (2.0 * std::f32::consts::PI * 997.0 * t).sin();
            samples.push(s);
            samples.push(s);
        }
        analyzer.add_frames(&samples).unwrap();

        let info = analyzer.finalize().unwrap();
        assert!(
            (info.sample_peak_dbfs - (-6.02)).abs() < 0.1,
            "Expected about -6 dBFS, got {:.2}",
            info.sample_peak_dbfs
        );
        assert!((info.duration_seconds - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_measure_wav_file_int16() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");

        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for i in 0..44100 {
            let t = i as f32 / 44100.0;
            let s = 0.25 * (2.0 * std::f32::consts::PI * 440.0 * t).sin();
            writer.write_sample((s * 32768.0) as i16).unwrap();
        }
        writer.finalize().unwrap();

        let info = measure_wav_file(&path).unwrap();
        // 0.25 amplitude = about -12 dBFS
        assert!(
            (info.sample_peak_dbfs - (-12.04)).abs() < 0.2,
            "Expected about -12 dBFS, got {:.2}",
            info.sample_peak_dbfs
        );
        assert_eq!(info.channels, 1);
        assert_eq!(info.sample_rate, 44100);
    }

    #[test]
    fn test_measure_missing_file() {
        assert!(matches!(
            measure_wav_file(Path::new("/nonexistent/foo.wav")),
            Err(LoudnessError::FileNotFound(_))
        ));
    }
}
