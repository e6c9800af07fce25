use crate::core::Channels;
use crate::denoise;
use crate::encoder;
use crate::error::AudioResult;
use crate::filter::{Filter, HighPass, Normalize};
use crate::processor::SilenceSplitter;
use log::{info, warn};
use std::path::PathBuf;

/// High-pass cutoff applied to every exported segment, in Hz
pub const HIGHPASS_CUTOFF_HZ: f32 = 30.0;

/// Peak level segments are normalized to before export
pub const NORMALIZE_PEAK: f32 = 0.99;

/// Ordering of the denoise stage relative to silence splitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitOrder {
    /// Denoise the whole recording first, then split the cleaned audio.
    /// The exported clips reflect the noise reduction.
    #[default]
    DenoiseFirst,
    /// Split the original recording, then run noise reduction over the
    /// whole buffer as a side computation whose output is discarded.
    /// Compatibility mode: the exported clips are untouched by denoising.
    SplitFirst,
}

/// Immutable configuration resolved once at startup.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Minimum silence duration that acts as a cut point, in milliseconds
    pub min_silence_ms: u64,
    /// Energy level (dBFS) below which audio counts as silent
    pub silence_threshold_db: f32,
    /// Whether to run the noise-reduction stage
    pub noise_reduction: bool,
    /// Sample rate the denoiser converts to, in Hz
    pub target_sample_rate: u32,
    /// Channel layout the denoiser converts to
    pub target_channels: Channels,
    /// Output format identifier (currently only "wav")
    pub output_format: String,
    /// Ordering of denoise relative to splitting
    pub split_order: SplitOrder,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            min_silence_ms: 5000,
            silence_threshold_db: -40.0,
            noise_reduction: true,
            target_sample_rate: 44100,
            target_channels: Channels::Mono,
            output_format: "wav".to_string(),
            split_order: SplitOrder::default(),
        }
    }
}

/// Outcome of a completed pipeline run.
#[derive(Debug)]
pub struct PipelineReport {
    /// Number of clip files written to the output directory
    pub segments_written: usize,
}

/// Four-stage batch pipeline: load, denoise (optional), split on
/// silence, then normalize / high-pass / export each segment.
///
/// A run is a single forward pass with no retries; the first error
/// stops it and already-written clips are left in place.
pub struct AudioPipeline {
    input: PathBuf,
    output_dir: PathBuf,
    config: PipelineConfig,
}

impl AudioPipeline {
    /// Create a pipeline for one input file and output directory
    pub fn new(input: PathBuf, output_dir: PathBuf, config: PipelineConfig) -> Self {
        AudioPipeline {
            input,
            output_dir,
            config,
        }
    }

    /// Run the pipeline to completion.
    pub fn run(&self) -> AudioResult<PipelineReport> {
        // Reject an unknown output format before any work happens
        encoder::validate_format(&self.config.output_format)?;

        let splitter = SilenceSplitter::new(
            self.config.min_silence_ms,
            self.config.silence_threshold_db,
        )?;

        let buffer = crate::decoder::load_file(&self.input)?;
        info!(
            "loaded {:?}: {:.2} s, {} Hz, {}",
            self.input,
            buffer.duration().as_secs_f64(),
            buffer.sample_rate(),
            buffer.channels().name()
        );

        let segments = match self.config.split_order {
            SplitOrder::DenoiseFirst => {
                let working = if self.config.noise_reduction {
                    info!(
                        "reducing noise ({} Hz, {})",
                        self.config.target_sample_rate,
                        self.config.target_channels.name()
                    );
                    denoise::reduce_noise(
                        &buffer,
                        self.config.target_sample_rate,
                        self.config.target_channels,
                    )?
                } else {
                    buffer
                };
                splitter.split(&working)?
            }
            SplitOrder::SplitFirst => {
                let segments = splitter.split(&buffer)?;
                if self.config.noise_reduction {
                    // Compatibility mode: the denoised buffer is computed
                    // but never feeds the exported segments.
                    warn!("legacy ordering: noise reduction does not affect exported clips");
                    let _ = denoise::reduce_noise(
                        &buffer,
                        self.config.target_sample_rate,
                        self.config.target_channels,
                    )?;
                }
                segments
            }
        };

        info!("found {} segment(s)", segments.len());

        let mut written = 0;
        for (i, segment) in segments.iter().enumerate() {
            let mut normalize = Normalize::peak(NORMALIZE_PEAK)?;
            let normalized = normalize.process(segment)?;

            let mut highpass = HighPass::new(
                normalized.sample_rate(),
                HIGHPASS_CUTOFF_HZ,
                normalized.channels().count(),
            )?;
            let enhanced = highpass.process(&normalized)?;

            let path = encoder::export_segment(
                &enhanced,
                &self.output_dir,
                i,
                &self.config.output_format,
            )?;
            info!("exported {:?}", path);
            written += 1;
        }

        Ok(PipelineReport {
            segments_written: written,
        })
    }
}
