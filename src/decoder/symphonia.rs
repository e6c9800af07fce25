use crate::core::{BitDepth, Channels};
use crate::error::{AudioError, AudioResult};
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Symphonia-based audio decoder
pub struct SymphoniaDecoder {
    /// Current reader for the audio source
    reader: Box<dyn symphonia::core::formats::FormatReader>,
    /// Track information
    track_id: u32,
    /// Sample rate
    sample_rate: u32,
    /// Number of channels
    channels: Channels,
    /// Bit depth of the source material
    bit_depth: BitDepth,
    /// Whether decoding is finished
    finished: bool,
    /// Current decoder state
    decoder: Box<dyn symphonia::core::codecs::Decoder>,
}

impl SymphoniaDecoder {
    /// Create decoder from file path.
    ///
    /// A missing file or an unrecognized container both map to
    /// [`AudioError::FileNotReadable`]; everything after a successful probe
    /// reports more specific errors.
    pub fn from_file<P: AsRef<Path>>(path: P) -> AudioResult<Self> {
        let path = path.as_ref();

        let file = Box::new(File::open(path).map_err(|_| AudioError::FileNotReadable {
            path: path.to_path_buf(),
        })?);

        // Create media source stream
        let mss = MediaSourceStream::new(file, Default::default());

        // Probe the file to detect format
        let mut hint = Hint::new();
        if let Some(ext) = path.extension() {
            if let Some(ext_str) = ext.to_str() {
                hint.with_extension(ext_str);
            }
        }

        let format_opts = FormatOptions::default();
        let metadata_opts = MetadataOptions::default();

        let probed = symphonia::default::get_probe()
            .format(&hint, mss, &format_opts, &metadata_opts)
            .map_err(|_| AudioError::FileNotReadable {
                path: path.to_path_buf(),
            })?;

        let reader = probed.format;

        // Find the first audio track
        let track = reader
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != symphonia::core::codecs::CODEC_TYPE_NULL)
            .ok_or_else(|| AudioError::InvalidMetadata("No audio track found".to_string()))?
            .clone();

        let track_id = track.id;
        let codec_params = &track.codec_params;

        let sample_rate = codec_params
            .sample_rate
            .ok_or_else(|| AudioError::InvalidMetadata("Unknown sample rate".to_string()))?;

        let channels = if let Some(channels) = codec_params.channels {
            Channels::from_count(channels.count() as u32)?
        } else {
            return Err(AudioError::InvalidMetadata(
                "Unknown channel count".to_string(),
            ));
        };

        let bit_depth = match codec_params.bits_per_sample {
            Some(8) => BitDepth::I8,
            Some(16) => BitDepth::I16,
            Some(24) => BitDepth::I24,
            Some(32) => BitDepth::I32,
            _ => BitDepth::F32,
        };

        let decoder = symphonia::default::get_codecs()
            .make(codec_params, &Default::default())
            .map_err(|e| AudioError::DecodeError(e.to_string()))?;

        Ok(SymphoniaDecoder {
            reader,
            track_id,
            sample_rate,
            channels,
            bit_depth,
            finished: false,
            decoder,
        })
    }

    /// Get sample rate
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Get channels
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Get the bit depth of the source material
    pub fn bit_depth(&self) -> BitDepth {
        self.bit_depth
    }
}

impl super::Decoder for SymphoniaDecoder {
    fn decode_chunk(&mut self) -> AudioResult<Option<Vec<f32>>> {
        if self.finished {
            return Ok(None);
        }

        loop {
            // Get next packet
            let packet = match self.reader.next_packet() {
                Ok(packet) => packet,
                Err(symphonia::core::errors::Error::IoError(ref e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    self.finished = true;
                    return Ok(None);
                }
                Err(symphonia::core::errors::Error::DecodeError(_)) => {
                    // Skip corrupt packets and keep going
                    continue;
                }
                Err(e) => return Err(AudioError::DecodeError(e.to_string())),
            };

            if packet.track_id() != self.track_id {
                continue;
            }

            let decoded = match self.decoder.decode(&packet) {
                Ok(decoded) => decoded,
                Err(symphonia::core::errors::Error::DecodeError(_)) => continue,
                Err(e) => return Err(AudioError::DecodeError(e.to_string())),
            };

            // Convert whatever sample format the codec produced into
            // interleaved f32 via Symphonia's SampleBuffer.
            let spec = *decoded.spec();
            let capacity = decoded.capacity() as u64;

            let mut sample_buf = SampleBuffer::<f32>::new(capacity, spec);
            sample_buf.copy_interleaved_ref(decoded);

            let samples = sample_buf.samples().to_vec();
            if samples.is_empty() {
                continue;
            }

            return Ok(Some(samples));
        }
    }

    fn is_finished(&self) -> bool {
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::load_file;
    use tempfile::TempDir;

    fn write_test_wav(path: &Path, samples: &[f32], sample_rate: u32, channels: u16) {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_invalid_file() {
        let result = SymphoniaDecoder::from_file("/nonexistent/file.mp3");
        assert!(matches!(
            result,
            Err(AudioError::FileNotReadable { .. })
        ));
    }

    #[test]
    fn test_load_wav_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tone.wav");

        // Half a second of mono at 8 kHz
        let samples: Vec<f32> = (0..4000)
            .map(|i| (i as f32 * 0.05).sin() * 0.5)
            .collect();
        write_test_wav(&path, &samples, 8000, 1);

        let buffer = load_file(&path).unwrap();
        assert_eq!(buffer.sample_rate(), 8000);
        assert_eq!(buffer.channels(), Channels::Mono);
        assert_eq!(buffer.samples_per_channel(), 4000);

        // Length consistent with rate * channels * duration
        let expected = buffer.sample_rate() as f64 * buffer.duration().as_secs_f64();
        assert!((buffer.samples().len() as f64 - expected).abs() < 1.0);
    }
}
