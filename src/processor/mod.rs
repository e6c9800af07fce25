//! Silence segmentation and pipeline orchestration

pub mod pipeline;
pub mod silence;

pub use pipeline::{AudioPipeline, PipelineConfig, PipelineReport, SplitOrder};
pub use silence::SilenceSplitter;
