//! Audio encoder implementations

pub mod wav;

pub use wav::WavEncoder;

use crate::core::AudioBuffer;
use crate::error::{AudioError, AudioResult};
use log::debug;
use std::path::{Path, PathBuf};

/// Trait for audio encoders
pub trait Encoder {
    /// Encode an audio buffer to output
    fn encode(&mut self, buffer: &AudioBuffer) -> AudioResult<()>;

    /// Finalize encoding (flush any remaining data)
    fn finalize(&mut self) -> AudioResult<()> {
        Ok(())
    }
}

/// Check that an output format identifier has an encoder.
pub fn validate_format(format: &str) -> AudioResult<()> {
    match format {
        "wav" => Ok(()),
        other => Err(AudioError::UnsupportedFormat(other.to_string())),
    }
}

/// Write one segment to `<output_dir>/clip_<index>.<format>`.
///
/// Returns the path of the written file. Overwrites an existing file of
/// the same name; no atomic-write guarantee.
pub fn export_segment(
    buffer: &AudioBuffer,
    output_dir: &Path,
    index: usize,
    format: &str,
) -> AudioResult<PathBuf> {
    validate_format(format)?;

    let path = output_dir.join(format!("clip_{}.{}", index, format));

    let mut encoder = WavEncoder::new(&path, buffer.sample_rate(), buffer.channels())?;
    encoder.encode(buffer)?;
    encoder.finalize()?;

    debug!("wrote {:?} ({} samples)", path, buffer.samples().len());

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BitDepth, Channels};
    use tempfile::TempDir;

    #[test]
    fn test_validate_format() {
        assert!(validate_format("wav").is_ok());
        assert!(matches!(
            validate_format("mp3"),
            Err(AudioError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_export_segment_naming() {
        let dir = TempDir::new().unwrap();
        let buffer =
            AudioBuffer::new(vec![0.1, -0.1], 44100, Channels::Mono, BitDepth::F32).unwrap();

        let path = export_segment(&buffer, dir.path(), 3, "wav").unwrap();
        assert_eq!(path.file_name().unwrap(), "clip_3.wav");
        assert!(path.exists());
    }
}
