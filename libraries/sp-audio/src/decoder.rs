/// WAV decoder implementation using Symphonia
use crate::error::{AudioError, Result};
use std::path::Path;
use symphonia::core::audio::{AudioBufferRef, Signal};
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Fully decoded audio, interleaved f32 in [-1.0, 1.0]
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    /// Interleaved samples (ch0, ch1, ..., ch0, ch1, ...)
    pub samples: Vec<f32>,
    /// Source sample rate in Hz
    pub sample_rate: u32,
    /// Number of channels (preserved from the source file)
    pub channels: u16,
}

impl DecodedAudio {
    /// Number of frames (samples per channel)
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            0
        } else {
            self.samples.len() / self.channels as usize
        }
    }
}

/// WAV decoder using Symphonia
///
/// Decodes an entire file into memory. The channel count is preserved so the
/// processed artifact keeps the source layout; samples are converted to f32
/// using symmetric scaling for signed integers (divide by 2^(N-1)) so the
/// [-1.0, 1.0] range is symmetric.
pub struct WavDecoder;

impl WavDecoder {
    /// Decode a complete file into a [`DecodedAudio`] buffer
    pub fn decode(path: &Path) -> Result<DecodedAudio> {
        if !path.exists() {
            return Err(AudioError::FileNotFound(path.display().to_string()));
        }

        let file = std::fs::File::open(path)?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        // Hint the format registry with the file extension
        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| AudioError::Symphonia(format!("Failed to probe file: {}", e)))?;

        let mut format = probed.format;

        let track = format
            .default_track()
            .ok_or_else(|| AudioError::DecodeError("No audio tracks found".to_string()))?;

        let track_id = track.id;
        let (sample_rate, channels) = Self::stream_params(&track.codec_params)?;

        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())
            .map_err(|e| AudioError::Symphonia(format!("Failed to create decoder: {}", e)))?;

        let mut samples = Vec::new();

        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(SymphoniaError::ResetRequired) => break,
                Err(e) => {
                    return Err(AudioError::DecodeError(format!(
                        "Failed to read packet: {}",
                        e
                    )))
                }
            };

            if packet.track_id() != track_id {
                continue;
            }

            match decoder.decode(&packet) {
                Ok(decoded) => Self::append_interleaved(decoded, &mut samples),
                Err(SymphoniaError::DecodeError(e)) => {
                    // Skip malformed packets, keep what we have
                    tracing::warn!("Skipping malformed packet in {}: {}", path.display(), e);
                }
                Err(e) => {
                    return Err(AudioError::DecodeError(format!(
                        "Failed to decode packet: {}",
                        e
                    )))
                }
            }
        }

        if samples.is_empty() {
            return Err(AudioError::DecodeError(format!(
                "No audio data in {}",
                path.display()
            )));
        }

        Ok(DecodedAudio {
            samples,
            sample_rate,
            channels,
        })
    }

    /// Extract the sample rate and channel count a stream declares
    ///
    /// A stream that omits either is rejected rather than processed under
    /// invented parameters.
    fn stream_params(
        codec_params: &symphonia::core::codecs::CodecParameters,
    ) -> Result<(u32, u16)> {
        let sample_rate = codec_params.sample_rate.ok_or_else(|| {
            AudioError::UnsupportedFormat("stream declares no sample rate".to_string())
        })?;
        let channels = codec_params
            .channels
            .map(|c| c.count() as u16)
            .ok_or_else(|| {
                AudioError::UnsupportedFormat("stream declares no channel layout".to_string())
            })?;

        Ok((sample_rate, channels))
    }

    /// Append a decoded Symphonia buffer as interleaved f32 samples
    fn append_interleaved(decoded: AudioBufferRef, out: &mut Vec<f32>) {
        match decoded {
            AudioBufferRef::F32(buf) => {
                // F32 audio can carry intersample peaks > 1.0, so we clamp
                Self::interleave(&buf, out, |s| s.clamp(-1.0, 1.0));
            }
            AudioBufferRef::F64(buf) => {
                Self::interleave(&buf, out, |s| (s as f32).clamp(-1.0, 1.0));
            }
            AudioBufferRef::S32(buf) => {
                Self::interleave(&buf, out, |s| s as f32 / 2147483648.0);
            }
            AudioBufferRef::S24(buf) => {
                Self::interleave(&buf, out, |s| s.inner() as f32 / 8388608.0);
            }
            AudioBufferRef::S16(buf) => {
                Self::interleave(&buf, out, |s| s as f32 / 32768.0);
            }
            AudioBufferRef::S8(buf) => {
                Self::interleave(&buf, out, |s| s as f32 / 128.0);
            }
            AudioBufferRef::U32(buf) => {
                Self::interleave(&buf, out, |s| (s as f32 / u32::MAX as f32) * 2.0 - 1.0);
            }
            AudioBufferRef::U24(buf) => {
                Self::interleave(&buf, out, |s| (s.inner() as f32 / 16777215.0) * 2.0 - 1.0);
            }
            AudioBufferRef::U16(buf) => {
                Self::interleave(&buf, out, |s| (s as f32 / u16::MAX as f32) * 2.0 - 1.0);
            }
            AudioBufferRef::U8(buf) => {
                Self::interleave(&buf, out, |s| (s as f32 / u8::MAX as f32) * 2.0 - 1.0);
            }
        }
    }

    /// Interleave a planar Symphonia buffer into `out`, converting each
    /// sample with `normalize`
    fn interleave<T, F>(
        buf: &symphonia::core::audio::AudioBuffer<T>,
        out: &mut Vec<f32>,
        normalize: F,
    ) where
        T: symphonia::core::sample::Sample + Copy,
        F: Fn(T) -> f32,
    {
        let channels = buf.spec().channels.count();
        let frames = buf.frames();
        out.reserve(frames * channels);

        for frame in 0..frames {
            for ch in 0..channels {
                out.push(normalize(buf.chan(ch)[frame]));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use symphonia::core::audio::Channels;
    use symphonia::core::codecs::CodecParameters;

    #[test]
    fn test_stream_params_extracted_when_declared() {
        let mut params = CodecParameters::new();
        params
            .with_sample_rate(48000)
            .with_channels(Channels::FRONT_LEFT | Channels::FRONT_RIGHT);

        let (sample_rate, channels) = WavDecoder::stream_params(&params).unwrap();
        assert_eq!(sample_rate, 48000);
        assert_eq!(channels, 2);
    }

    #[test]
    fn test_missing_sample_rate_is_unsupported() {
        let mut params = CodecParameters::new();
        params.with_channels(Channels::FRONT_LEFT);

        assert!(matches!(
            WavDecoder::stream_params(&params),
            Err(AudioError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_missing_channel_layout_is_unsupported() {
        let mut params = CodecParameters::new();
        params.with_sample_rate(44100);

        assert!(matches!(
            WavDecoder::stream_params(&params),
            Err(AudioError::UnsupportedFormat(_))
        ));
    }
}
