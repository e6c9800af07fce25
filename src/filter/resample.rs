use crate::core::{AudioBuffer, Channels};
use crate::error::{AudioError, AudioResult};

/// Audio resampler - converts from one sample rate to another using linear interpolation
pub struct Resample {
    input_rate: u32,
    output_rate: u32,
    channels: Channels,
}

impl Resample {
    /// Create a new resampler
    ///
    /// # Arguments
    /// * `input_rate` - Input sample rate in Hz
    /// * `output_rate` - Output sample rate in Hz
    /// * `channels` - Number of channels
    pub fn new(input_rate: u32, output_rate: u32, channels: Channels) -> AudioResult<Self> {
        if input_rate == 0 || output_rate == 0 {
            return Err(AudioError::InvalidSampleRate { rate: 0 });
        }

        Ok(Resample {
            input_rate,
            output_rate,
            channels,
        })
    }

    /// Get the input sample rate
    pub fn input_rate(&self) -> u32 {
        self.input_rate
    }

    /// Get the output sample rate
    pub fn output_rate(&self) -> u32 {
        self.output_rate
    }

    /// Linear interpolation over one deinterleaved channel.
    /// `ratio` is input samples per output sample.
    fn linear_resample(input: &[f32], ratio: f64) -> Vec<f32> {
        if input.is_empty() || ratio <= 0.0 {
            return Vec::new();
        }

        let output_len = (input.len() as f64 / ratio).ceil() as usize;
        let mut output = Vec::with_capacity(output_len);

        for i in 0..output_len {
            let input_pos = i as f64 * ratio;
            let input_idx = input_pos.floor() as usize;

            if input_idx + 1 < input.len() {
                // Linear interpolation between two samples
                let frac = input_pos - input_idx as f64;
                let sample = (input[input_idx] as f64 * (1.0 - frac)
                    + input[input_idx + 1] as f64 * frac) as f32;
                output.push(sample.clamp(-1.0, 1.0));
            } else if input_idx < input.len() {
                // Edge case: last sample
                output.push(input[input_idx]);
            }
        }

        output
    }
}

impl super::Filter for Resample {
    fn process(&mut self, buffer: &AudioBuffer) -> AudioResult<AudioBuffer> {
        if buffer.channels() != self.channels {
            return Err(AudioError::InvalidChannels {
                expected: self.channels.count(),
                got: buffer.channels().count(),
            });
        }

        if buffer.sample_rate() != self.input_rate {
            return Err(AudioError::InvalidSampleRate {
                rate: buffer.sample_rate(),
            });
        }

        if self.input_rate == self.output_rate {
            // No resampling needed
            return Ok(buffer.clone());
        }

        let ratio = self.input_rate as f64 / self.output_rate as f64;
        let ch = self.channels.count() as usize;
        let samples = buffer.samples();

        // Resample each channel separately, then re-interleave
        let mut per_channel: Vec<Vec<f32>> = Vec::with_capacity(ch);
        for c in 0..ch {
            let channel: Vec<f32> = samples.iter().skip(c).step_by(ch).copied().collect();
            per_channel.push(Self::linear_resample(&channel, ratio));
        }

        let out_frames = per_channel.iter().map(|c| c.len()).min().unwrap_or(0);
        let mut resampled = Vec::with_capacity(out_frames * ch);
        for i in 0..out_frames {
            for channel in &per_channel {
                resampled.push(channel[i]);
            }
        }

        AudioBuffer::new(
            resampled,
            self.output_rate,
            self.channels,
            buffer.bit_depth(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BitDepth;
    use crate::filter::Filter;

    #[test]
    fn test_resample_creation() {
        let resample = Resample::new(44100, 16000, Channels::Stereo);
        assert!(resample.is_ok());
        let r = resample.unwrap();
        assert_eq!(r.input_rate(), 44100);
        assert_eq!(r.output_rate(), 16000);
    }

    #[test]
    fn test_resample_invalid_rate() {
        let resample = Resample::new(0, 16000, Channels::Stereo);
        assert!(resample.is_err());
    }

    #[test]
    fn test_linear_resample() {
        let input = vec![0.0, 1.0, 0.5];
        // Downsample by 2x (reduce from 3 to 1-2 samples)
        let output = Resample::linear_resample(&input, 2.0);
        assert!(!output.is_empty());
    }

    #[test]
    fn test_downsample_halves_length() {
        let samples = vec![0.0f32; 8000];
        let buffer = AudioBuffer::new(samples, 8000, Channels::Mono, BitDepth::F32).unwrap();

        let mut resampler = Resample::new(8000, 4000, Channels::Mono).unwrap();
        let result = resampler.process(&buffer).unwrap();

        assert_eq!(result.sample_rate(), 4000);
        // Duration preserved within rounding
        let diff = (result.samples_per_channel() as i64 - 4000).abs();
        assert!(diff <= 1);
    }
}
