use crate::core::AudioBuffer;
use crate::error::{AudioError, AudioResult};
use log::debug;

/// Splits audio into non-silent segments at silence boundaries.
///
/// Energy is measured per millisecond window (RMS across all channels,
/// converted to dBFS). A run of at least `min_silence_ms` consecutive
/// windows below `threshold_db` is a cut point; everything between cut
/// points becomes one segment.
#[derive(Debug, Clone)]
pub struct SilenceSplitter {
    /// Minimum silence duration that acts as a cut point, in milliseconds
    min_silence_ms: u64,
    /// Energy level (dBFS) below which a window counts as silent
    threshold_db: f32,
}

impl SilenceSplitter {
    /// Create a new splitter
    pub fn new(min_silence_ms: u64, threshold_db: f32) -> AudioResult<Self> {
        if min_silence_ms == 0 {
            return Err(AudioError::SegmentationError(
                "Minimum silence duration must be greater than zero".to_string(),
            ));
        }

        Ok(SilenceSplitter {
            min_silence_ms,
            threshold_db,
        })
    }

    /// Get the minimum silence duration in milliseconds
    pub fn min_silence_ms(&self) -> u64 {
        self.min_silence_ms
    }

    /// Get the silence threshold in dBFS
    pub fn threshold_db(&self) -> f32 {
        self.threshold_db
    }

    /// Split a buffer into its non-silent segments, in temporal order.
    ///
    /// If no qualifying silence exists the whole input comes back as a
    /// single segment. A fully silent input yields no segments.
    pub fn split(&self, buffer: &AudioBuffer) -> AudioResult<Vec<AudioBuffer>> {
        if buffer.is_empty() {
            return Ok(Vec::new());
        }

        let frames_per_ms = (buffer.sample_rate() as usize / 1000).max(1);
        let ch = buffer.channels().count() as usize;
        let total_frames = buffer.samples_per_channel();
        let samples = buffer.samples();

        // Per-millisecond silence flags
        let num_windows = total_frames.div_ceil(frames_per_ms);
        let mut silent = Vec::with_capacity(num_windows);
        for w in 0..num_windows {
            let start = w * frames_per_ms * ch;
            let end = ((w + 1) * frames_per_ms * ch).min(samples.len());
            silent.push(dbfs(&samples[start..end]) < self.threshold_db);
        }

        // Frame ranges of silence runs long enough to act as cut points
        let min_run = self.min_silence_ms as usize;
        let mut cuts: Vec<(usize, usize)> = Vec::new();
        let mut run_start: Option<usize> = None;
        for (w, &is_silent) in silent.iter().enumerate() {
            match (is_silent, run_start) {
                (true, None) => run_start = Some(w),
                (false, Some(start)) => {
                    if w - start >= min_run {
                        cuts.push((start * frames_per_ms, w * frames_per_ms));
                    }
                    run_start = None;
                }
                _ => {}
            }
        }
        if let Some(start) = run_start {
            if num_windows - start >= min_run {
                cuts.push((start * frames_per_ms, total_frames));
            }
        }

        // No qualifying silence: the whole input is one segment. A fully
        // silent input falls through and produces no spans at all.
        if cuts.is_empty() {
            return Ok(vec![buffer.clone()]);
        }

        // Non-silent spans between cut points
        let mut segments = Vec::new();
        let mut span_start = 0usize;
        for &(cut_start, cut_end) in &cuts {
            if cut_start > span_start {
                segments.push(buffer.slice_frames(span_start, cut_start.min(total_frames))?);
            }
            span_start = cut_end;
        }
        if span_start < total_frames {
            segments.push(buffer.slice_frames(span_start, total_frames)?);
        }

        debug!(
            "split {} frames into {} segments ({} cut points)",
            total_frames,
            segments.len(),
            cuts.len()
        );

        Ok(segments)
    }
}

/// RMS energy of a window in dBFS (negative infinity for digital silence)
fn dbfs(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return f32::NEG_INFINITY;
    }
    let sum_squared: f32 = samples.iter().map(|&s| s * s).sum();
    let rms = (sum_squared / samples.len() as f32).sqrt();
    if rms <= 0.0 {
        f32::NEG_INFINITY
    } else {
        20.0 * rms.log10()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BitDepth, Channels};
    use std::f32::consts::PI;

    const RATE: u32 = 8000;

    fn tone_frames(secs: f64) -> Vec<f32> {
        let n = (secs * RATE as f64) as usize;
        (0..n)
            .map(|i| (2.0 * PI * 440.0 * i as f32 / RATE as f32).sin() * 0.5)
            .collect()
    }

    fn silence_frames(secs: f64) -> Vec<f32> {
        vec![0.0; (secs * RATE as f64) as usize]
    }

    fn buffer(samples: Vec<f32>) -> AudioBuffer {
        AudioBuffer::new(samples, RATE, Channels::Mono, BitDepth::F32).unwrap()
    }

    #[test]
    fn test_invalid_min_duration() {
        assert!(SilenceSplitter::new(0, -40.0).is_err());
    }

    #[test]
    fn test_no_silence_single_segment() {
        let buf = buffer(tone_frames(2.0));
        let splitter = SilenceSplitter::new(1000, -40.0).unwrap();

        let segments = splitter.split(&buf).unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].samples_per_channel(), buf.samples_per_channel());
    }

    #[test]
    fn test_two_voiced_spans() {
        // voiced - 1.5 s gap - voiced, min silence 1000 ms
        let mut samples = tone_frames(6.0);
        samples.extend(silence_frames(1.5));
        samples.extend(tone_frames(6.0));
        let buf = buffer(samples);

        let splitter = SilenceSplitter::new(1000, -40.0).unwrap();
        let segments = splitter.split(&buf).unwrap();

        assert_eq!(segments.len(), 2);

        // Boundaries monotone and non-overlapping: total segment length
        // never exceeds the input
        let total: usize = segments.iter().map(|s| s.samples_per_channel()).sum();
        assert!(total <= buf.samples_per_channel());

        // Each span is roughly six seconds
        for seg in &segments {
            assert!((seg.duration().as_secs_f64() - 6.0).abs() < 0.1);
        }
    }

    #[test]
    fn test_gap_shorter_than_minimum_not_cut() {
        let mut samples = tone_frames(2.0);
        samples.extend(silence_frames(0.5));
        samples.extend(tone_frames(2.0));
        let buf = buffer(samples);

        let splitter = SilenceSplitter::new(1000, -40.0).unwrap();
        let segments = splitter.split(&buf).unwrap();
        assert_eq!(segments.len(), 1);
    }

    #[test]
    fn test_fully_silent_input() {
        let buf = buffer(silence_frames(3.0));
        let splitter = SilenceSplitter::new(1000, -40.0).unwrap();

        let segments = splitter.split(&buf).unwrap();
        assert!(segments.is_empty());
    }

    #[test]
    fn test_leading_and_trailing_silence_trimmed() {
        let mut samples = silence_frames(2.0);
        samples.extend(tone_frames(3.0));
        samples.extend(silence_frames(2.0));
        let buf = buffer(samples);

        let splitter = SilenceSplitter::new(1000, -40.0).unwrap();
        let segments = splitter.split(&buf).unwrap();

        assert_eq!(segments.len(), 1);
        assert!((segments[0].duration().as_secs_f64() - 3.0).abs() < 0.1);
    }

    #[test]
    fn test_empty_buffer() {
        let buf = buffer(Vec::new());
        let splitter = SilenceSplitter::new(1000, -40.0).unwrap();
        assert!(splitter.split(&buf).unwrap().is_empty());
    }
}
