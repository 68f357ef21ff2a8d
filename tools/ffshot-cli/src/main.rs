//! ffshot CLI — grab still frames from video with the bundled ffmpeg.
//!
//! Usage:
//!   ffshot snap <INPUT> <OUTPUT>           Capture a single frame
//!   ffshot interval <INPUT> <OUTPUT_DIR>   Capture a frame every N seconds
//!   ffshot exec <INPUT> <OUTPUT>           Run ffmpeg with custom options
//!   ffshot check                           Show which ffmpeg build would be used

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use ffshot_common::config::AppConfig;
use ffshot_ffmpeg_engine::{FfmpegRunner, ImageFormat};

mod commands;

#[derive(Parser)]
#[command(
    name = "ffshot",
    about = "Grab still frames from video with the bundled ffmpeg",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory containing the ffmpeg bundle (defaults to the executable's directory)
    #[arg(long, global = true)]
    base_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Capture a single frame
    Snap {
        /// Input video
        input: PathBuf,

        /// Output image
        output: PathBuf,

        /// Time offset into the input (seconds)
        #[arg(long, value_parser = commands::parse_secs)]
        at: Option<Duration>,
    },

    /// Capture one frame every N seconds
    Interval {
        /// Input video
        input: PathBuf,

        /// Directory receiving the numbered images
        output_dir: PathBuf,

        /// File name prefix for the numbered images
        #[arg(long, default_value = "frame")]
        prefix: String,

        /// Seconds between frames
        #[arg(long, default_value = "1")]
        every: u32,

        /// Only sample this much of the input (seconds)
        #[arg(long, value_parser = commands::parse_secs)]
        duration: Option<Duration>,

        /// Image format: jpg|png|bmp
        #[arg(long, default_value = "jpg")]
        format: ImageFormat,
    },

    /// Run ffmpeg with custom options
    Exec {
        /// Input file
        input: PathBuf,

        /// Output file
        output: PathBuf,

        /// Option placed before the input, as FLAG=VALUE (repeatable)
        #[arg(long = "before-input", value_parser = commands::parse_option)]
        before_input: Vec<(String, String)>,

        /// Option placed before the output, as FLAG=VALUE (repeatable)
        #[arg(long = "before-output", value_parser = commands::parse_option)]
        before_output: Vec<(String, String)>,

        /// Print the launcher invocation instead of running it
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the detected host and the ffmpeg build it maps to
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load();
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    ffshot_common::logging::init_logging(&config.logging);

    if let Some(base_dir) = cli.base_dir {
        config.ffmpeg.base_dir = Some(base_dir);
    }
    let runner = FfmpegRunner::from_config(&config.ffmpeg)?;

    match cli.command {
        Commands::Snap { input, output, at } => {
            commands::snap::run(&runner, input, output, at).await
        }
        Commands::Interval {
            input,
            output_dir,
            prefix,
            every,
            duration,
            format,
        } => {
            commands::interval::run(&runner, input, output_dir, prefix, every, duration, format)
                .await
        }
        Commands::Exec {
            input,
            output,
            before_input,
            before_output,
            dry_run,
        } => {
            commands::exec::run(&runner, input, output, before_input, before_output, dry_run).await
        }
        Commands::Check => commands::check::run(&runner),
    }
}
