//! High-level entry points: run ffmpeg, take screenshots.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ffshot_common::config::{FfmpegConfig, DEFAULT_DISTRIBUTION};
use ffshot_common::error::FfshotResult;
use ffshot_platform_core::{resolve, FfmpegDistribution, PlatformProbe, SystemProbe};

use crate::command::{build, path_str, validate_paths, ExecutionRequest};
use crate::executor::{apply_exit_policy, ExitPolicy, LauncherExecutor, ProcessExecutor};
use crate::options::OptionMap;
use crate::screenshot::{
    interval_options, interval_output_pattern, single_frame_options, ImageFormat,
};

/// Runs the bundled ffmpeg through its launcher script.
///
/// Every call resolves the distribution afresh, builds a new request and
/// starts one process; nothing is shared between calls, so a runner can
/// serve concurrent calls.
pub struct FfmpegRunner {
    base_dir: PathBuf,
    distribution: String,
    probe: Box<dyn PlatformProbe>,
    executor: Box<dyn ProcessExecutor>,
}

impl FfmpegRunner {
    /// Runner for the bundle under `base_dir`, probing the real host and
    /// spawning real processes.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            distribution: DEFAULT_DISTRIBUTION.to_string(),
            probe: Box::new(SystemProbe),
            executor: Box::new(LauncherExecutor),
        }
    }

    pub fn from_config(config: &FfmpegConfig) -> FfshotResult<Self> {
        Ok(Self::new(config.resolve_base_dir()?).with_distribution(config.distribution.clone()))
    }

    pub fn with_distribution(mut self, distribution: impl Into<String>) -> Self {
        self.distribution = distribution.into();
        self
    }

    pub fn with_probe(mut self, probe: impl PlatformProbe + 'static) -> Self {
        self.probe = Box::new(probe);
        self
    }

    pub fn with_executor(mut self, executor: impl ProcessExecutor + 'static) -> Self {
        self.executor = Box::new(executor);
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Resolve the distribution for this host without touching the disk.
    pub fn distribution(&self) -> FfshotResult<FfmpegDistribution> {
        resolve(&*self.probe, &self.base_dir, &self.distribution)
    }

    /// Validate arguments, resolve and check the distribution, and build the
    /// request. Nothing is spawned.
    pub fn prepare(
        &self,
        input: &Path,
        output: &Path,
        before_input: Option<&OptionMap>,
        before_output: Option<&OptionMap>,
    ) -> FfshotResult<ExecutionRequest> {
        let input = path_str(input, "input")?;
        let output = path_str(output, "output")?;
        validate_paths(input, output)?;

        let distribution = self.distribution()?;
        distribution.ensure_present()?;
        build(&distribution, input, output, before_input, before_output)
    }

    /// Run ffmpeg, mapping a non-zero exit according to `policy`.
    pub async fn run(
        &self,
        input: &Path,
        output: &Path,
        before_input: Option<&OptionMap>,
        before_output: Option<&OptionMap>,
        policy: ExitPolicy,
    ) -> FfshotResult<bool> {
        let request = self.prepare(input, output, before_input, before_output)?;
        tracing::debug!(
            executor = self.executor.name(),
            command = %request.args,
            "Executing ffmpeg"
        );
        let outcome = self.executor.execute(&request).await?;
        apply_exit_policy(outcome, policy)
    }

    /// Run ffmpeg with optional options before the input and before the
    /// output. Returns `Ok(false)` when ffmpeg exits non-zero.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` for blank or non-Unicode paths.
    /// - `UnsupportedPlatform` when no bundled build fits the host.
    /// - `MissingDistribution` when the bundle is absent.
    /// - `LaunchFailure` when the launcher cannot be started.
    pub async fn execute_ffmpeg(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        before_input: Option<&OptionMap>,
        before_output: Option<&OptionMap>,
    ) -> FfshotResult<bool> {
        self.run(
            input.as_ref(),
            output.as_ref(),
            before_input,
            before_output,
            ExitPolicy::Suppress,
        )
        .await
    }

    /// Capture a single frame, optionally `time_offset` into the input.
    pub async fn screenshot(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
        time_offset: Option<Duration>,
    ) -> FfshotResult<bool> {
        let before_output = single_frame_options(time_offset)?;
        self.execute_ffmpeg(input, output, None, Some(&before_output))
            .await
    }

    /// Capture one frame every `interval_secs` seconds into
    /// `<output_dir>/<prefix>%d.<ext>`, optionally only for the first
    /// `duration` of the input.
    pub async fn screenshot_interval(
        &self,
        input: impl AsRef<Path>,
        output_dir: impl AsRef<Path>,
        prefix: &str,
        interval_secs: u32,
        duration: Option<Duration>,
        format: ImageFormat,
    ) -> FfshotResult<bool> {
        let before_output = interval_options(interval_secs, duration)?;
        let output = interval_output_pattern(output_dir.as_ref(), prefix, format);
        self.execute_ffmpeg(input, output, None, Some(&before_output))
            .await
    }
}
