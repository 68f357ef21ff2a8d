//! Option sets for still-frame capture.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use ffshot_common::error::{FfshotError, FfshotResult};
use serde::{Deserialize, Serialize};

use crate::options::OptionMap;

/// Image format for interval captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Jpg,
    Png,
    Bmp,
}

impl ImageFormat {
    /// Lowercase file extension.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpg => "jpg",
            Self::Png => "png",
            Self::Bmp => "bmp",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ImageFormat {
    type Err = FfshotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jpg" => Ok(Self::Jpg),
            "png" => Ok(Self::Png),
            "bmp" => Ok(Self::Bmp),
            _ => Err(FfshotError::invalid_argument(format!(
                "unknown image format {s:?}; use jpg, png or bmp"
            ))),
        }
    }
}

/// Render a duration in ffmpeg's duration syntax: `5s`, `1500ms`, `250us`.
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.subsec_nanos();
    if nanos == 0 {
        format!("{}s", duration.as_secs())
    } else if nanos % 1_000_000 == 0 {
        format!("{}ms", duration.as_millis())
    } else {
        format!("{}us", duration.as_micros())
    }
}

/// Before-output options grabbing one frame, optionally at `time_offset`.
pub fn single_frame_options(time_offset: Option<Duration>) -> FfshotResult<OptionMap> {
    let mut options = OptionMap::new().with("-vframes", "1")?;
    if let Some(offset) = time_offset {
        options.insert("-ss", format_duration(offset))?;
    }
    Ok(options)
}

/// Before-output options sampling one frame every `interval_secs` seconds,
/// optionally stopping after `duration`.
pub fn interval_options(interval_secs: u32, duration: Option<Duration>) -> FfshotResult<OptionMap> {
    if interval_secs == 0 {
        return Err(FfshotError::invalid_argument(
            "interval must be greater than 0",
        ));
    }
    let mut options = OptionMap::new().with("-vf", format!("fps=1/{interval_secs}"))?;
    if let Some(duration) = duration {
        options.insert("-t", format_duration(duration))?;
    }
    Ok(options)
}

/// Numbered output pattern `<output_dir>/<prefix>%d.<ext>` for ffmpeg's
/// image sequence muxer.
pub fn interval_output_pattern(output_dir: &Path, prefix: &str, format: ImageFormat) -> PathBuf {
    output_dir.join(format!("{prefix}%d.{}", format.extension()))
}
