//! Run ffmpeg with caller-supplied options.

use std::path::PathBuf;

use ffshot_ffmpeg_engine::{FfmpegRunner, OptionMap};

use super::require_success;

pub async fn run(
    runner: &FfmpegRunner,
    input: PathBuf,
    output: PathBuf,
    before_input: Vec<(String, String)>,
    before_output: Vec<(String, String)>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let before_input = OptionMap::from_pairs(before_input)?;
    let before_output = OptionMap::from_pairs(before_output)?;

    if dry_run {
        let request = runner.prepare(&input, &output, Some(&before_input), Some(&before_output))?;
        println!("{} {}", request.launcher_path.display(), request.args);
        return Ok(());
    }

    let ok = runner
        .execute_ffmpeg(&input, &output, Some(&before_input), Some(&before_output))
        .await?;
    require_success(ok)
}
