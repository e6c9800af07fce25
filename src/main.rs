//! clipsplit command line interface
//!
//! Gathers configuration through sequential prompts, then runs the
//! load / denoise / split / export pipeline once.

use clap::Parser;
use clipsplit::processor::{AudioPipeline, PipelineConfig, SplitOrder};
use clipsplit::{AudioError, Channels};
use log::info;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

#[derive(Parser)]
#[command(name = "clipsplit")]
#[command(about = "Split a recording into cleaned, normalized clips", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Input audio file (prompted for when omitted)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory (prompted for when omitted)
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Split the original audio before denoising. Restores the historical
    /// ordering in which noise reduction never reaches the exported clips.
    #[arg(long)]
    legacy_order: bool,
}

/// Outcome of one prompt read.
enum Prompt {
    /// A line of input (trimmed)
    Value(String),
    /// User confirmed cancellation at the prompt boundary
    Cancelled,
}

/// Read one configuration value from stdin.
///
/// End of input asks once for confirmation; a second end of input or an
/// empty line confirms cancellation, anything else resumes. This is the
/// only cancellation point in the program - once processing starts there
/// is no interruption path.
fn prompt(reader: &mut impl BufRead, label: &str) -> io::Result<Prompt> {
    loop {
        print!("{}", label);
        io::stdout().flush()?;

        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            println!();
            println!("Cancellation requested. Press Ctrl-D again (or Enter) to confirm.");

            let mut confirm = String::new();
            if reader.read_line(&mut confirm)? == 0 || confirm.trim().is_empty() {
                return Ok(Prompt::Cancelled);
            }
            continue;
        }

        return Ok(Prompt::Value(line.trim().to_string()));
    }
}

fn parse_int<T: FromStr>(value: &str, what: &str) -> Result<T, AudioError> {
    value.parse::<T>().map_err(|_| {
        AudioError::ConfigError(format!(
            "expected an integer for {}, got {:?}",
            what, value
        ))
    })
}

/// Resolved run parameters: input file, output directory, pipeline config.
type RunParams = (PathBuf, PathBuf, PipelineConfig);

/// Gather configuration from CLI flags and sequential prompts.
///
/// Returns `Ok(None)` on user-confirmed cancellation.
fn gather_config(cli: &Cli, reader: &mut impl BufRead) -> Result<Option<RunParams>, AudioError> {
    macro_rules! ask {
        ($label:expr) => {
            match prompt(reader, $label)? {
                Prompt::Value(v) => v,
                Prompt::Cancelled => return Ok(None),
            }
        };
    }

    let input = match &cli.input {
        Some(path) => path.clone(),
        None => PathBuf::from(ask!("Enter the path to the input audio file: ")),
    };

    let output_dir = match &cli.output_dir {
        Some(path) => path.clone(),
        None => PathBuf::from(ask!("Enter the output directory path: ")),
    };

    let mut config = PipelineConfig::default();

    let use_defaults = ask!("Use default settings? (y/n): ");
    if use_defaults.eq_ignore_ascii_case("n") {
        let duration = ask!("Enter the minimum silence duration in milliseconds (e.g., 5000): ");
        config.min_silence_ms = parse_int(&duration, "minimum silence duration")?;
        if config.min_silence_ms == 0 {
            return Err(AudioError::ConfigError(
                "minimum silence duration must be greater than zero".to_string(),
            ));
        }

        let threshold = ask!("Enter the silence threshold in dB (e.g., -40): ");
        config.silence_threshold_db = parse_int::<i32>(&threshold, "silence threshold")? as f32;

        let reduce = ask!("Enable noise reduction? (y/n): ");
        config.noise_reduction = reduce.eq_ignore_ascii_case("y");
        if config.noise_reduction {
            let rate = ask!("Enter the desired sample rate in Hz (e.g., 44100): ");
            config.target_sample_rate = parse_int(&rate, "sample rate")?;

            let channels = ask!("Enter the number of channels (e.g., 1 for mono): ");
            let count: u32 = parse_int(&channels, "channel count")?;
            config.target_channels = Channels::from_count(count)
                .map_err(|e| AudioError::ConfigError(e.to_string()))?;
        }

        config.output_format = ask!("Enter the output file format (e.g., wav): ");
    }

    if cli.legacy_order {
        config.split_order = SplitOrder::SplitFirst;
    }

    Ok(Some((input, output_dir, config)))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Setup logging
    if cli.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    info!("clipsplit {}", clipsplit::VERSION);

    let stdin = io::stdin();
    let mut reader = stdin.lock();

    let (input, output_dir, config) = match gather_config(&cli, &mut reader) {
        Ok(Some(params)) => params,
        Ok(None) => {
            println!("Audio processing cancelled.");
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("Invalid input. {}", e);
            return ExitCode::from(2);
        }
    };

    if let Err(e) = std::fs::create_dir_all(&output_dir) {
        eprintln!("Failed to create output directory {:?}: {}", output_dir, e);
        return ExitCode::FAILURE;
    }

    let pipeline = AudioPipeline::new(input, output_dir, config);
    match pipeline.run() {
        Ok(report) => {
            println!(
                "Audio processing completed successfully ({} clip{} written).",
                report.segments_written,
                if report.segments_written == 1 { "" } else { "s" }
            );
            ExitCode::SUCCESS
        }
        Err(AudioError::FileNotReadable { path }) => {
            eprintln!(
                "Input audio file not readable: {}. Please provide a valid file path.",
                path.display()
            );
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("An error occurred during audio processing: {}", e);
            ExitCode::FAILURE
        }
    }
}
