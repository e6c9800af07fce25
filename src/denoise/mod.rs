//! Spectral noise reduction
//!
//! The noise profile is estimated from a short leading slice of the
//! recording at its original sample rate, then subtracted from the
//! whole buffer after conversion to the target rate and channel layout.

pub mod spectral;

pub use spectral::{NoiseProfile, SpectralDenoiser};

use crate::core::{AudioBuffer, Channels};
use crate::error::AudioResult;
use crate::filter::{Filter, Remix, Resample};
use log::debug;

/// Number of leading interleaved samples used as the noise reference slice
pub const NOISE_SLICE_SAMPLES: usize = 2000;

/// FFT size for noise profiling and subtraction
pub const FFT_SIZE: usize = 1024;

/// Default noise reduction strength in dB
pub const DEFAULT_REDUCTION_DB: f32 = 12.0;

/// Run the full noise-reduction stage over a buffer.
///
/// The profile is taken from the first [`NOISE_SLICE_SAMPLES`] samples of
/// the buffer as-is, before any conversion. The buffer is then remixed to
/// `target_channels`, resampled to `target_rate`, and the profile is
/// subtracted from the converted stream. The result keeps the source bit
/// depth of the input.
pub fn reduce_noise(
    buffer: &AudioBuffer,
    target_rate: u32,
    target_channels: Channels,
) -> AudioResult<AudioBuffer> {
    if buffer.is_empty() {
        return Ok(buffer.clone());
    }

    let slice_len = NOISE_SLICE_SAMPLES.min(buffer.samples().len());
    let profile = NoiseProfile::from_samples(&buffer.samples()[..slice_len], FFT_SIZE)?;

    debug!(
        "noise profile from {} samples at {} Hz",
        slice_len,
        buffer.sample_rate()
    );

    // Convert to the target layout before subtraction
    let mut remix = Remix::new(buffer.channels(), target_channels);
    let remixed = remix.process(buffer)?;

    let mut resample = Resample::new(remixed.sample_rate(), target_rate, target_channels)?;
    let resampled = resample.process(&remixed)?;

    let mut samples = resampled.into_samples();
    let mut denoiser = SpectralDenoiser::new(profile, DEFAULT_REDUCTION_DB);
    denoiser.process(&mut samples);

    AudioBuffer::new(samples, target_rate, target_channels, buffer.bit_depth())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BitDepth;

    #[test]
    fn test_reduce_noise_targets_applied() {
        // Two seconds of quiet stereo noise-ish signal at 8 kHz
        let samples: Vec<f32> = (0..32000).map(|i| ((i % 17) as f32 - 8.0) * 0.005).collect();
        let buffer = AudioBuffer::new(samples, 8000, Channels::Stereo, BitDepth::I16).unwrap();

        let result = reduce_noise(&buffer, 4000, Channels::Mono).unwrap();

        assert_eq!(result.sample_rate(), 4000);
        assert_eq!(result.channels(), Channels::Mono);
        assert_eq!(result.bit_depth(), BitDepth::I16);

        // Duration preserved within resampling rounding
        let in_secs = buffer.duration().as_secs_f64();
        let out_secs = result.duration().as_secs_f64();
        assert!((in_secs - out_secs).abs() < 0.01);
    }

    #[test]
    fn test_reduce_noise_short_input() {
        // Shorter than the 2000-sample noise slice; must still run
        let samples = vec![0.05f32; 500];
        let buffer = AudioBuffer::new(samples, 8000, Channels::Mono, BitDepth::F32).unwrap();

        let result = reduce_noise(&buffer, 8000, Channels::Mono).unwrap();
        assert_eq!(result.sample_rate(), 8000);
    }
}
