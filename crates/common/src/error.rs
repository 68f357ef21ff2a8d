//! Error types shared across ffshot crates.

use std::path::PathBuf;

/// Top-level error type for ffshot operations.
#[derive(Debug, thiserror::Error)]
pub enum FfshotError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Unsupported platform: {message}")]
    UnsupportedPlatform { message: String },

    #[error("ffmpeg distribution not found at {path}")]
    MissingDistribution { path: PathBuf },

    #[error("Failed to launch {launcher}: {source}")]
    LaunchFailure {
        launcher: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("ffmpeg exited with {}: {stderr}", describe_exit(.exit_code))]
    ExecutionFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using FfshotError.
pub type FfshotResult<T> = Result<T, FfshotError>;

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no exit status (terminated by signal)".to_string(),
    }
}

impl FfshotError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: msg.into(),
        }
    }

    pub fn unsupported_platform(msg: impl Into<String>) -> Self {
        Self::UnsupportedPlatform {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn launch_failure(launcher: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::LaunchFailure {
            launcher: launcher.into(),
            source,
        }
    }
}
