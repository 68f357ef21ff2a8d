//! Report which ffmpeg build this host resolves to.

use ffshot_common::error::FfshotError;
use ffshot_ffmpeg_engine::FfmpegRunner;
use ffshot_platform_core::{PlatformProbe, SystemProbe};

pub fn run(runner: &FfmpegRunner) -> anyhow::Result<()> {
    println!("ffshot System Check");
    println!("{}", "=".repeat(50));

    let host = SystemProbe.host();
    println!("[OK] Host: {} ({:?}, 64-bit: {})", host.description, host.os, host.is_64bit);
    println!("     Base directory: {}", runner.base_dir().display());

    let distribution = match runner.distribution() {
        Ok(distribution) => distribution,
        Err(err @ FfshotError::UnsupportedPlatform { .. }) => {
            println!("[FAIL] {err}");
            return Err(err.into());
        }
        Err(err) => return Err(err.into()),
    };

    println!("[OK] ffmpeg build: {}", distribution.app_dir.display());
    println!("     Launcher: {}", distribution.launcher_path().display());

    match distribution.ensure_present() {
        Ok(()) => {
            println!();
            println!("Bundled ffmpeg is in place. ffshot is ready.");
            Ok(())
        }
        Err(err) => {
            println!("[FAIL] {err}");
            println!();
            println!("Copy the ffmpeg bundle next to the executable or pass --base-dir.");
            Err(err.into())
        }
    }
}
