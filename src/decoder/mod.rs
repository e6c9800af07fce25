//! Audio decoder implementations

pub mod symphonia;

pub use symphonia::SymphoniaDecoder;

use crate::core::AudioBuffer;
use crate::error::AudioResult;
use log::debug;
use std::path::Path;

/// Trait for audio decoders
pub trait Decoder: Send {
    /// Get the next chunk of interleaved f32 samples from the stream
    fn decode_chunk(&mut self) -> AudioResult<Option<Vec<f32>>>;

    /// Check if decoder is finished
    fn is_finished(&self) -> bool;
}

/// Decode an entire file into a single [`AudioBuffer`].
pub fn load_file<P: AsRef<Path>>(path: P) -> AudioResult<AudioBuffer> {
    let mut decoder = SymphoniaDecoder::from_file(path.as_ref())?;

    let sample_rate = decoder.sample_rate();
    let channels = decoder.channels();
    let bit_depth = decoder.bit_depth();

    let mut samples = Vec::new();
    while let Some(chunk) = decoder.decode_chunk()? {
        samples.extend_from_slice(&chunk);
    }

    debug!(
        "decoded {:?}: {} samples, {} Hz, {}",
        path.as_ref(),
        samples.len(),
        sample_rate,
        channels.name()
    );

    AudioBuffer::new(samples, sample_rate, channels, bit_depth)
}
