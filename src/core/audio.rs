use crate::error::{AudioError, AudioResult};
use std::time::Duration;

/// Channel configuration for audio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channels {
    /// Mono (1 channel)
    Mono = 1,
    /// Stereo (2 channels)
    Stereo = 2,
    /// Quad (4 channels)
    Quad = 4,
    /// 5.1 surround sound
    SurroundFivePointOne = 6,
    /// 7.1 surround sound
    SurroundSevenPointOne = 8,
}

impl Channels {
    /// Create Channels from channel count
    pub fn from_count(count: u32) -> AudioResult<Self> {
        match count {
            1 => Ok(Channels::Mono),
            2 => Ok(Channels::Stereo),
            4 => Ok(Channels::Quad),
            6 => Ok(Channels::SurroundFivePointOne),
            8 => Ok(Channels::SurroundSevenPointOne),
            n => Err(AudioError::InvalidChannels {
                expected: 1,
                got: n,
            }),
        }
    }

    /// Get the number of channels
    pub fn count(&self) -> u32 {
        *self as u32
    }

    /// Get channel layout name
    pub fn name(&self) -> &'static str {
        match self {
            Channels::Mono => "Mono",
            Channels::Stereo => "Stereo",
            Channels::Quad => "Quad",
            Channels::SurroundFivePointOne => "5.1 Surround",
            Channels::SurroundSevenPointOne => "7.1 Surround",
        }
    }
}

/// Bit depth of the source material
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitDepth {
    /// 8-bit signed
    I8,
    /// 16-bit signed (-32768 to 32767)
    I16,
    /// 24-bit signed
    I24,
    /// 32-bit signed
    I32,
    /// 32-bit floating point (internal standard)
    F32,
    /// 64-bit floating point
    F64,
}

impl BitDepth {
    /// Get bytes per sample
    pub fn bytes_per_sample(&self) -> usize {
        match self {
            BitDepth::I8 => 1,
            BitDepth::I16 => 2,
            BitDepth::I24 => 3,
            BitDepth::I32 => 4,
            BitDepth::F32 => 4,
            BitDepth::F64 => 8,
        }
    }
}

/// Decoded audio held in memory: interleaved f32 samples plus the
/// metadata needed to interpret them.
///
/// Samples are normalized to [-1.0, 1.0]. The source bit depth is kept
/// as metadata so a reconstruction stage can report the original sample
/// width even though all processing happens in f32.
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    /// Audio samples (interleaved for multiple channels, f32 from -1.0 to 1.0)
    samples: Vec<f32>,
    /// Sample rate in Hz (e.g., 44100, 48000, 16000)
    sample_rate: u32,
    /// Number of channels
    channels: Channels,
    /// Bit depth of the material this buffer was decoded from
    bit_depth: BitDepth,
}

impl AudioBuffer {
    /// Create a new audio buffer
    pub fn new(
        samples: Vec<f32>,
        sample_rate: u32,
        channels: Channels,
        bit_depth: BitDepth,
    ) -> AudioResult<Self> {
        if sample_rate == 0 {
            return Err(AudioError::InvalidSampleRate { rate: sample_rate });
        }

        if samples.len() % channels.count() as usize != 0 {
            return Err(AudioError::BufferError(
                "Sample count not divisible by channel count".to_string(),
            ));
        }

        Ok(AudioBuffer {
            samples,
            sample_rate,
            channels,
            bit_depth,
        })
    }

    /// Get reference to the samples
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Get mutable reference to the samples
    pub fn samples_mut(&mut self) -> &mut [f32] {
        &mut self.samples
    }

    /// Get owned samples (consumes buffer)
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    /// Get sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Get channel configuration
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Get the bit depth of the source material
    pub fn bit_depth(&self) -> BitDepth {
        self.bit_depth
    }

    /// Get number of samples per channel
    pub fn samples_per_channel(&self) -> usize {
        self.samples.len() / self.channels.count() as usize
    }

    /// Get duration of the audio
    pub fn duration(&self) -> Duration {
        Duration::from_secs_f64(self.samples_per_channel() as f64 / self.sample_rate as f64)
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Extract a sub-buffer covering the given per-channel frame range.
    /// `start` and `end` index frames, not interleaved samples.
    pub fn slice_frames(&self, start: usize, end: usize) -> AudioResult<AudioBuffer> {
        let frames = self.samples_per_channel();
        if start > end || end > frames {
            return Err(AudioError::BufferError(format!(
                "Frame range {}..{} out of bounds for {} frames",
                start, end, frames
            )));
        }

        let ch = self.channels.count() as usize;
        let samples = self.samples[start * ch..end * ch].to_vec();

        AudioBuffer::new(samples, self.sample_rate, self.channels, self.bit_depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels_from_count() {
        assert_eq!(Channels::from_count(1).unwrap(), Channels::Mono);
        assert_eq!(Channels::from_count(2).unwrap(), Channels::Stereo);
        assert!(Channels::from_count(0).is_err());
        assert!(Channels::from_count(3).is_err());
    }

    #[test]
    fn test_channels_count() {
        assert_eq!(Channels::Mono.count(), 1);
        assert_eq!(Channels::Stereo.count(), 2);
        assert_eq!(Channels::Quad.count(), 4);
    }

    #[test]
    fn test_audio_buffer_creation() {
        let samples = vec![0.1, 0.2, 0.3, 0.4];
        let buffer = AudioBuffer::new(samples, 44100, Channels::Stereo, BitDepth::I16).unwrap();

        assert_eq!(buffer.sample_rate(), 44100);
        assert_eq!(buffer.channels(), Channels::Stereo);
        assert_eq!(buffer.samples_per_channel(), 2);
        assert_eq!(buffer.bit_depth(), BitDepth::I16);
    }

    #[test]
    fn test_audio_buffer_invalid_samples() {
        // Odd number of samples for stereo should fail
        let samples = vec![0.1, 0.2, 0.3];
        let result = AudioBuffer::new(samples, 44100, Channels::Stereo, BitDepth::F32);
        assert!(result.is_err());
    }

    #[test]
    fn test_duration_consistency() {
        // One second of stereo at 8 kHz: 16000 interleaved samples
        let samples = vec![0.0; 16000];
        let buffer = AudioBuffer::new(samples, 8000, Channels::Stereo, BitDepth::F32).unwrap();

        assert_eq!(buffer.samples_per_channel(), 8000);
        assert!((buffer.duration().as_secs_f64() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_slice_frames() {
        let samples = vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5];
        let buffer = AudioBuffer::new(samples, 44100, Channels::Stereo, BitDepth::F32).unwrap();

        let slice = buffer.slice_frames(1, 3).unwrap();
        assert_eq!(slice.samples(), &[0.2, 0.3, 0.4, 0.5]);

        assert!(buffer.slice_frames(2, 4).is_err());
    }
}
