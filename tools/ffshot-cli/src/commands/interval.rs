//! Capture a frame every N seconds.

use std::path::PathBuf;
use std::time::Duration;

use ffshot_ffmpeg_engine::screenshot::interval_output_pattern;
use ffshot_ffmpeg_engine::{format_duration, FfmpegRunner, ImageFormat};

use super::require_success;

pub async fn run(
    runner: &FfmpegRunner,
    input: PathBuf,
    output_dir: PathBuf,
    prefix: String,
    every: u32,
    duration: Option<Duration>,
    format: ImageFormat,
) -> anyhow::Result<()> {
    println!("Sampling frames from: {}", input.display());
    println!("  Every: {every}s");
    if let Some(duration) = duration {
        println!("  For: {}", format_duration(duration));
    }
    println!(
        "  Output: {}",
        interval_output_pattern(&output_dir, &prefix, format).display()
    );

    std::fs::create_dir_all(&output_dir)?;

    let ok = runner
        .screenshot_interval(&input, &output_dir, &prefix, every, duration, format)
        .await?;
    require_success(ok)?;

    println!("  Done.");
    Ok(())
}
