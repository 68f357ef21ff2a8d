//! ffshot ffmpeg engine
//!
//! Drives the bundled ffmpeg build through its platform launcher script.
//!
//! # Pipeline
//!
//! ```text
//! screenshot / screenshot_interval
//!        │  (OptionMap for the output side)
//!        ▼
//! execute_ffmpeg ── validate paths
//!        │
//!        ├── resolve bundled build (PlatformProbe)
//!        │
//!        ├── build launcher args  -a <dir> [-b "..."] -c <in> [-d "..."] -e <out>
//!        │
//!        ▼
//! ProcessExecutor ── spawn launcher, await exit
//!        │
//!        ▼
//!   Ok(true) / Ok(false) / Err(LaunchFailure)
//! ```

pub mod command;
pub mod executor;
pub mod options;
pub mod runner;
pub mod screenshot;

pub use command::{ExecutionRequest, LauncherArgs};
pub use executor::{
    apply_exit_policy, ExecutionOutcome, ExitPolicy, LauncherExecutor, ProcessExecutor,
};
pub use options::OptionMap;
pub use runner::FfmpegRunner;
pub use screenshot::{format_duration, ImageFormat};
