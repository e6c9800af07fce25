use crate::core::AudioBuffer;
use crate::error::{AudioError, AudioResult};
use biquad::{Biquad, Coefficients, DirectForm1, Q_BUTTERWORTH_F32, ToHertz, Type};

/// High-pass filter for removing sub-audible rumble.
///
/// Cascaded 2nd-order Butterworth biquads give a 4th-order
/// (24 dB/octave) slope. Each channel of interleaved audio gets its own
/// filter state.
pub struct HighPass {
    cutoff_hz: f32,
    filters: Vec<[DirectForm1<f32>; 2]>,
}

impl HighPass {
    /// Create a high-pass filter for the given sample rate, cutoff and
    /// channel count.
    pub fn new(sample_rate: u32, cutoff_hz: f32, channels: u32) -> AudioResult<Self> {
        if cutoff_hz <= 0.0 || cutoff_hz >= sample_rate as f32 / 2.0 {
            return Err(AudioError::ConfigError(format!(
                "High-pass cutoff {} Hz out of range for {} Hz sample rate",
                cutoff_hz, sample_rate
            )));
        }

        let coeffs = Coefficients::<f32>::from_params(
            Type::HighPass,
            (sample_rate as f32).hz(),
            cutoff_hz.hz(),
            Q_BUTTERWORTH_F32,
        )
        .map_err(|e| {
            AudioError::ConfigError(format!("Failed to create highpass coefficients: {:?}", e))
        })?;

        let filters = (0..channels)
            .map(|_| [DirectForm1::<f32>::new(coeffs), DirectForm1::<f32>::new(coeffs)])
            .collect();

        Ok(HighPass { cutoff_hz, filters })
    }

    /// Get the cutoff frequency in Hz
    pub fn cutoff_hz(&self) -> f32 {
        self.cutoff_hz
    }
}

impl super::Filter for HighPass {
    fn process(&mut self, buffer: &AudioBuffer) -> AudioResult<AudioBuffer> {
        let ch = buffer.channels().count() as usize;
        if ch != self.filters.len() {
            return Err(AudioError::InvalidChannels {
                expected: self.filters.len() as u32,
                got: ch as u32,
            });
        }

        let mut samples = buffer.samples().to_vec();

        // Two cascaded passes per channel
        for stage in 0..2 {
            for (i, sample) in samples.iter_mut().enumerate() {
                *sample = self.filters[i % ch][stage].run(*sample);
            }
        }

        AudioBuffer::new(
            samples,
            buffer.sample_rate(),
            buffer.channels(),
            buffer.bit_depth(),
        )
    }
}
