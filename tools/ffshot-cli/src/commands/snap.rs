//! Capture a single frame.

use std::path::PathBuf;
use std::time::Duration;

use ffshot_ffmpeg_engine::{format_duration, FfmpegRunner};

use super::require_success;

pub async fn run(
    runner: &FfmpegRunner,
    input: PathBuf,
    output: PathBuf,
    at: Option<Duration>,
) -> anyhow::Result<()> {
    println!("Capturing frame from: {}", input.display());
    if let Some(offset) = at {
        println!("  Offset: {}", format_duration(offset));
    }

    let ok = runner.screenshot(&input, &output, at).await?;
    require_success(ok)?;

    println!("  Saved: {}", output.display());
    Ok(())
}
