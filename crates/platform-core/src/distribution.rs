//! Mapping from host platform to the bundled ffmpeg build.
//!
//! The bundle is laid out as `<base>/<distribution>/<target>/<launcher>`,
//! e.g. `<base>/ffmpeg_v4.1.1/win64/ffmpeg.bat`.

use std::path::{Path, PathBuf};

use ffshot_common::error::{FfshotError, FfshotResult};
use serde::{Deserialize, Serialize};

use crate::host::{HostPlatform, OsFamily, PlatformProbe};

/// Kind of launcher script shipped next to the ffmpeg binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LauncherKind {
    /// Windows batch script.
    Batch,
    /// POSIX shell script.
    Shell,
}

impl LauncherKind {
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Batch => "ffmpeg.bat",
            Self::Shell => "ffmpeg.sh",
        }
    }
}

/// A bundled build directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatformTarget {
    Win32,
    Win64,
    MacOs64,
}

impl PlatformTarget {
    /// Directory name under the distribution root.
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Win32 => "win32",
            Self::Win64 => "win64",
            Self::MacOs64 => "macos64",
        }
    }

    pub fn launcher(self) -> LauncherKind {
        match self {
            Self::Win32 | Self::Win64 => LauncherKind::Batch,
            Self::MacOs64 => LauncherKind::Shell,
        }
    }

    /// Pick the bundled build for a host.
    ///
    /// Linux is not bundled yet: supporting it takes one more arm here and a
    /// `linux64` directory with a shell launcher in the bundle.
    pub fn for_host(host: &HostPlatform) -> FfshotResult<Self> {
        match (host.os, host.is_64bit) {
            (OsFamily::Windows, true) => Ok(Self::Win64),
            (OsFamily::Windows, false) => Ok(Self::Win32),
            (OsFamily::MacOS, true) => Ok(Self::MacOs64),
            (OsFamily::MacOS, false) => Err(FfshotError::unsupported_platform(
                "only 64-bit macOS is supported",
            )),
            (OsFamily::Linux, _) => Err(FfshotError::unsupported_platform(
                "linux is not supported yet; add a linux build to the bundle and a branch to PlatformTarget::for_host",
            )),
            (OsFamily::Unknown, _) => Err(FfshotError::unsupported_platform(format!(
                "unknown OS platform {}",
                host.description
            ))),
        }
    }
}

/// Resolved location of the ffmpeg build and its launcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FfmpegDistribution {
    /// Directory containing the ffmpeg binary and launcher.
    pub app_dir: PathBuf,
    /// Launcher script kind.
    pub launcher: LauncherKind,
}

impl FfmpegDistribution {
    /// Locate `target` under `<base_dir>/<distribution>`. No I/O.
    pub fn locate(target: PlatformTarget, base_dir: &Path, distribution: &str) -> Self {
        Self {
            app_dir: base_dir.join(distribution).join(target.dir_name()),
            launcher: target.launcher(),
        }
    }

    pub fn launcher_path(&self) -> PathBuf {
        self.app_dir.join(self.launcher.file_name())
    }

    /// Fail with `MissingDistribution` unless the directory and launcher exist.
    pub fn ensure_present(&self) -> FfshotResult<()> {
        if !self.app_dir.is_dir() {
            return Err(FfshotError::MissingDistribution {
                path: self.app_dir.clone(),
            });
        }
        let launcher = self.launcher_path();
        if !launcher.is_file() {
            return Err(FfshotError::MissingDistribution { path: launcher });
        }
        Ok(())
    }
}

/// Resolve the distribution for the host reported by `probe`.
pub fn resolve(
    probe: &dyn PlatformProbe,
    base_dir: &Path,
    distribution: &str,
) -> FfshotResult<FfmpegDistribution> {
    let host = probe.host();
    let target = PlatformTarget::for_host(&host)?;
    tracing::debug!(
        host = %host.description,
        target = target.dir_name(),
        "Resolved ffmpeg platform target"
    );
    Ok(FfmpegDistribution::locate(target, base_dir, distribution))
}
