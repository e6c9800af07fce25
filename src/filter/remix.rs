use crate::core::{AudioBuffer, Channels};
use crate::error::{AudioError, AudioResult};

/// Audio channel remixer - converts between channel layouts
pub struct Remix {
    input_channels: Channels,
    output_channels: Channels,
}

impl Remix {
    /// Create a new channel remixer
    pub fn new(input_channels: Channels, output_channels: Channels) -> Self {
        Remix {
            input_channels,
            output_channels,
        }
    }

    /// Downmix any interleaved layout to mono by averaging channels
    fn downmix_to_mono(input: &[f32], channels: usize) -> Vec<f32> {
        let mut output = Vec::with_capacity(input.len() / channels);
        for frame in input.chunks_exact(channels) {
            let avg = frame.iter().sum::<f32>() / channels as f32;
            output.push(avg);
        }
        output
    }

    /// Remix mono to stereo by duplicating the channel
    fn mono_to_stereo(input: &[f32]) -> Vec<f32> {
        let mut output = Vec::with_capacity(input.len() * 2);
        for &sample in input {
            output.push(sample);
            output.push(sample);
        }
        output
    }
}

impl super::Filter for Remix {
    fn process(&mut self, buffer: &AudioBuffer) -> AudioResult<AudioBuffer> {
        if buffer.channels() != self.input_channels {
            return Err(AudioError::InvalidChannels {
                expected: self.input_channels.count(),
                got: buffer.channels().count(),
            });
        }

        let samples = buffer.samples();

        let output_samples = match (self.input_channels, self.output_channels) {
            // Pass through same channel count
            (src, dst) if src == dst => samples.to_vec(),

            // Anything to Mono (average all channels)
            (src, Channels::Mono) => Self::downmix_to_mono(samples, src.count() as usize),

            // Mono to Stereo
            (Channels::Mono, Channels::Stereo) => Self::mono_to_stereo(samples),

            // Quad to Stereo: FL+RL and FR+RR pairs
            (Channels::Quad, Channels::Stereo) => {
                let mut output = Vec::with_capacity(samples.len() / 2);
                for frame in samples.chunks_exact(4) {
                    output.push((frame[0] + frame[2]) / 2.0);
                    output.push((frame[1] + frame[3]) / 2.0);
                }
                output
            }

            _ => {
                return Err(AudioError::ProcessingError(format!(
                    "Remix from {} to {} not supported",
                    self.input_channels.name(),
                    self.output_channels.name()
                )));
            }
        };

        AudioBuffer::new(
            output_samples,
            buffer.sample_rate(),
            self.output_channels,
            buffer.bit_depth(),
        )
    }
}
