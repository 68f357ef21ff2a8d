//! Launcher command line assembly.
//!
//! The bundled launcher scripts accept a fixed flag vocabulary:
//!
//! ```text
//! -a <ffmpeg app dir> [-b "<input options>"] -c <input> [-d "<output options>"] -e <output>
//! ```
//!
//! Option blocks are wrapped in double quotes; paths are passed through
//! untouched.

use std::fmt;
use std::path::{Path, PathBuf};

use ffshot_common::error::{FfshotError, FfshotResult};
use ffshot_platform_core::{FfmpegDistribution, LauncherKind};

use crate::options::OptionMap;

pub const APP_DIR_FLAG: &str = "-a";
pub const INPUT_OPTIONS_FLAG: &str = "-b";
pub const INPUT_FLAG: &str = "-c";
pub const OUTPUT_OPTIONS_FLAG: &str = "-d";
pub const OUTPUT_FLAG: &str = "-e";

/// Arguments handed to a launcher script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherArgs {
    app_dir: String,
    input_options: Option<String>,
    input: String,
    output_options: Option<String>,
    output: String,
}

impl LauncherArgs {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    /// Rendered before-input options, if any were given.
    pub fn input_options(&self) -> Option<&str> {
        self.input_options.as_deref()
    }

    /// Rendered before-output options, if any were given.
    pub fn output_options(&self) -> Option<&str> {
        self.output_options.as_deref()
    }

    /// The arguments as discrete tokens, each option block being one token
    /// without its quotes.
    pub fn tokens(&self) -> Vec<String> {
        let mut tokens = vec![APP_DIR_FLAG.to_string(), self.app_dir.clone()];
        if let Some(block) = &self.input_options {
            tokens.push(INPUT_OPTIONS_FLAG.to_string());
            tokens.push(block.clone());
        }
        tokens.push(INPUT_FLAG.to_string());
        tokens.push(self.input.clone());
        if let Some(block) = &self.output_options {
            tokens.push(OUTPUT_OPTIONS_FLAG.to_string());
            tokens.push(block.clone());
        }
        tokens.push(OUTPUT_FLAG.to_string());
        tokens.push(self.output.clone());
        tokens
    }

    /// The arguments as a single command line string.
    pub fn command_line(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LauncherArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{APP_DIR_FLAG} {}", self.app_dir)?;
        if let Some(block) = &self.input_options {
            write!(f, " {INPUT_OPTIONS_FLAG} \"{block}\"")?;
        }
        write!(f, " {INPUT_FLAG} {}", self.input)?;
        if let Some(block) = &self.output_options {
            write!(f, " {OUTPUT_OPTIONS_FLAG} \"{block}\"")?;
        }
        write!(f, " {OUTPUT_FLAG} {}", self.output)
    }
}

/// Everything needed to run one launcher invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRequest {
    pub launcher: LauncherKind,
    pub launcher_path: PathBuf,
    /// The ffmpeg app directory; the launcher runs from here.
    pub working_dir: PathBuf,
    pub args: LauncherArgs,
}

/// Reject empty or whitespace-only input/output paths.
pub fn validate_paths(input: &str, output: &str) -> FfshotResult<()> {
    if input.trim().is_empty() || output.trim().is_empty() {
        return Err(FfshotError::invalid_argument(
            "input or output cannot be empty",
        ));
    }
    Ok(())
}

/// Borrow `path` as UTF-8, rejecting paths the launcher line cannot carry.
pub fn path_str<'a>(path: &'a Path, what: &str) -> FfshotResult<&'a str> {
    path.to_str().ok_or_else(|| {
        FfshotError::invalid_argument(format!(
            "{what} path is not valid Unicode: {}",
            path.display()
        ))
    })
}

/// Assemble the launcher invocation for `distribution`.
pub fn build(
    distribution: &FfmpegDistribution,
    input: &str,
    output: &str,
    before_input: Option<&OptionMap>,
    before_output: Option<&OptionMap>,
) -> FfshotResult<ExecutionRequest> {
    validate_paths(input, output)?;
    let app_dir = path_str(&distribution.app_dir, "ffmpeg distribution")?;

    let args = LauncherArgs {
        app_dir: app_dir.to_string(),
        input_options: render_block(before_input),
        input: input.to_string(),
        output_options: render_block(before_output),
        output: output.to_string(),
    };

    Ok(ExecutionRequest {
        launcher: distribution.launcher,
        launcher_path: distribution.launcher_path(),
        working_dir: distribution.app_dir.clone(),
        args,
    })
}

fn render_block(options: Option<&OptionMap>) -> Option<String> {
    options.filter(|o| !o.is_empty()).map(OptionMap::render)
}
