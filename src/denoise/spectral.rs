use crate::error::{AudioError, AudioResult};
use realfft::{ComplexToReal, RealFftPlanner, RealToComplex};
use std::sync::Arc;

/// Averaged magnitude spectrum of background noise.
///
/// Built once from a leading slice of the recording, consumed once by
/// [`SpectralDenoiser`], then dropped. Not persisted anywhere.
#[derive(Debug, Clone)]
pub struct NoiseProfile {
    fft_size: usize,
    magnitudes: Vec<f32>,
}

impl NoiseProfile {
    /// Estimate a noise profile from a slice of samples.
    ///
    /// The slice is cut into Hann-windowed frames (75% overlap) and the
    /// magnitude spectra are averaged. A slice shorter than one FFT frame
    /// is zero-padded into a single frame.
    pub fn from_samples(samples: &[f32], fft_size: usize) -> AudioResult<Self> {
        if samples.is_empty() {
            return Err(AudioError::ProcessingError(
                "Cannot build a noise profile from empty input".to_string(),
            ));
        }

        let mut planner = RealFftPlanner::<f32>::new();
        let forward = planner.plan_fft_forward(fft_size);
        let window = hann_window(fft_size);
        let hop = fft_size / 4;

        let mut spectrum_sum = vec![0.0f32; fft_size / 2 + 1];
        let mut frame_count = 0usize;

        let mut accumulate = |frame: &[f32]| {
            let mut buffer: Vec<f32> = frame.iter().zip(&window).map(|(s, w)| s * w).collect();
            buffer.resize(fft_size, 0.0);

            let mut spectrum = forward.make_output_vec();
            if forward.process(&mut buffer, &mut spectrum).is_ok() {
                for (sum, c) in spectrum_sum.iter_mut().zip(&spectrum) {
                    *sum += c.norm();
                }
                frame_count += 1;
            }
        };

        if samples.len() < fft_size {
            accumulate(samples);
        } else {
            let mut pos = 0;
            while pos + fft_size <= samples.len() {
                accumulate(&samples[pos..pos + fft_size]);
                pos += hop;
            }
        }

        if frame_count == 0 {
            return Err(AudioError::ProcessingError(
                "Noise profile estimation produced no frames".to_string(),
            ));
        }

        let magnitudes = spectrum_sum
            .into_iter()
            .map(|sum| sum / frame_count as f32)
            .collect();

        Ok(NoiseProfile {
            fft_size,
            magnitudes,
        })
    }

    /// FFT size this profile was computed with
    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Per-bin average noise magnitudes (len = fft_size / 2 + 1)
    pub fn magnitudes(&self) -> &[f32] {
        &self.magnitudes
    }
}

/// FFT-based spectral subtraction.
///
/// Applies a Wiener-style gain per frequency bin against a
/// [`NoiseProfile`], with overlap-add reconstruction.
pub struct SpectralDenoiser {
    fft_size: usize,
    hop_size: usize,
    profile: NoiseProfile,
    reduction_db: f32,
    forward_fft: Arc<dyn RealToComplex<f32>>,
    inverse_fft: Arc<dyn ComplexToReal<f32>>,
    window: Vec<f32>,
}

impl SpectralDenoiser {
    /// Create a denoiser around a noise profile.
    ///
    /// `reduction_db` scales the profile before subtraction (0-24 dB is
    /// a sensible range).
    pub fn new(profile: NoiseProfile, reduction_db: f32) -> Self {
        let fft_size = profile.fft_size();
        let hop_size = fft_size / 4; // 75% overlap

        let mut planner = RealFftPlanner::<f32>::new();
        let forward_fft = planner.plan_fft_forward(fft_size);
        let inverse_fft = planner.plan_fft_inverse(fft_size);

        SpectralDenoiser {
            fft_size,
            hop_size,
            profile,
            reduction_db,
            forward_fft,
            inverse_fft,
            window: hann_window(fft_size),
        }
    }

    /// Denoise samples in place.
    ///
    /// Input shorter than one FFT frame is left untouched.
    pub fn process(&mut self, samples: &mut [f32]) {
        if samples.len() < self.fft_size {
            return;
        }

        let reduction_factor = 10.0_f32.powf(self.reduction_db / 20.0);
        let floor = 0.02; // Minimum gain to avoid complete silence

        let mut output = vec![0.0f32; samples.len()];
        let mut window_sum = vec![0.0f32; samples.len()];

        let mut pos = 0;
        while pos + self.fft_size <= samples.len() {
            // Extract and window frame
            let mut buffer: Vec<f32> = samples[pos..pos + self.fft_size]
                .iter()
                .zip(&self.window)
                .map(|(s, w)| s * w)
                .collect();

            let mut spectrum = self.forward_fft.make_output_vec();

            if self.forward_fft.process(&mut buffer, &mut spectrum).is_ok() {
                // Wiener gain against the noise profile
                for (c, &noise) in spectrum.iter_mut().zip(self.profile.magnitudes()) {
                    let signal_mag = c.norm();
                    let noise_mag = noise * reduction_factor;

                    let gain = if signal_mag > 0.0 {
                        let snr = signal_mag / (noise_mag + 1e-10);
                        ((snr - 1.0) / snr).max(floor)
                    } else {
                        floor
                    };

                    *c = *c * gain;
                }

                let mut time_buffer = self.inverse_fft.make_output_vec();
                if self
                    .inverse_fft
                    .process(&mut spectrum, &mut time_buffer)
                    .is_ok()
                {
                    // Normalize and window for overlap-add
                    let norm = 1.0 / self.fft_size as f32;
                    for (i, sample) in time_buffer.iter().enumerate() {
                        output[pos + i] += sample * norm * self.window[i];
                        window_sum[pos + i] += self.window[i] * self.window[i];
                    }
                }
            }

            pos += self.hop_size;
        }

        // Overlap-add normalization
        for (i, sample) in samples.iter_mut().enumerate() {
            if window_sum[i] > 0.001 {
                *sample = output[i] / window_sum[i];
            }
        }
    }
}

fn hann_window(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| 0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / size as f32).cos()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_from_samples() {
        let samples = vec![0.01f32; 2000];
        let profile = NoiseProfile::from_samples(&samples, 1024).unwrap();
        assert_eq!(profile.fft_size(), 1024);
        assert_eq!(profile.magnitudes().len(), 513);
    }

    #[test]
    fn test_profile_short_slice_padded() {
        let samples = vec![0.01f32; 100];
        let profile = NoiseProfile::from_samples(&samples, 1024).unwrap();
        assert_eq!(profile.magnitudes().len(), 513);
    }

    #[test]
    fn test_profile_empty_input() {
        assert!(NoiseProfile::from_samples(&[], 1024).is_err());
    }

    #[test]
    fn test_denoise_runs_and_preserves_length() {
        let profile = NoiseProfile::from_samples(&vec![0.01f32; 2000], 1024).unwrap();
        let mut denoiser = SpectralDenoiser::new(profile, 12.0);

        let mut samples = vec![0.1f32; 4096];
        denoiser.process(&mut samples);
        assert_eq!(samples.len(), 4096);
    }

    #[test]
    fn test_denoise_short_input_untouched() {
        let profile = NoiseProfile::from_samples(&vec![0.01f32; 2000], 1024).unwrap();
        let mut denoiser = SpectralDenoiser::new(profile, 12.0);

        let mut samples = vec![0.25f32; 100];
        denoiser.process(&mut samples);
        assert_eq!(samples, vec![0.25f32; 100]);
    }
}
