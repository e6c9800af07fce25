#![warn(missing_docs)]

//! # clipsplit: silence-splitting audio cleanup
//!
//! Batch-processes a single recording into cleaned, normalized clips
//! split at silence boundaries.
//!
//! ## Pipeline
//!
//! - **Load** - decode any Symphonia-supported format into one buffer
//! - **Denoise** (optional) - spectral subtraction against a noise
//!   profile taken from the start of the recording
//! - **Split** - cut the audio at silence gaps into non-silent segments
//! - **Enhance/Export** - normalize, high-pass at 30 Hz, and write each
//!   segment as `clip_<i>.wav`
//!
//! ## Quick Start
//!
//! ```ignore
//! use clipsplit::processor::{AudioPipeline, PipelineConfig};
//!
//! let config = PipelineConfig::default();
//! let pipeline = AudioPipeline::new("input.mp3".into(), "clips".into(), config);
//! let report = pipeline.run()?;
//! println!("wrote {} clips", report.segments_written);
//! ```

// Declare modules
/// Core audio types and structures
pub mod core;
/// Spectral noise reduction
pub mod denoise;
/// Error types for audio operations
pub mod error;
/// Audio decoder implementations
pub mod decoder;
/// Audio filter implementations
pub mod filter;
/// Audio encoder implementations
pub mod encoder;
/// Silence segmentation and pipeline orchestration
pub mod processor;

// Export public types
pub use crate::core::{AudioBuffer, BitDepth, Channels};
pub use crate::error::{AudioError, AudioResult};
pub use crate::processor::{AudioPipeline, PipelineConfig, PipelineReport, SplitOrder};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
