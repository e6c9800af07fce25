//! Core audio types and structures

/// Audio buffer and metadata types
pub mod audio;

pub use audio::{AudioBuffer, BitDepth, Channels};
