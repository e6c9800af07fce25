//! Audio filter implementations

pub mod highpass;
pub mod normalize;
pub mod remix;
pub mod resample;

pub use highpass::HighPass;
pub use normalize::Normalize;
pub use remix::Remix;
pub use resample::Resample;

use crate::core::AudioBuffer;
use crate::error::AudioResult;

/// Trait for audio filters
pub trait Filter {
    /// Process an audio buffer through this filter
    fn process(&mut self, buffer: &AudioBuffer) -> AudioResult<AudioBuffer>;
}
