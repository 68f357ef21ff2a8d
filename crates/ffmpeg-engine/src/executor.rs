//! Launcher process execution.

use std::collections::VecDeque;
use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use ffshot_common::error::{FfshotError, FfshotResult};
use ffshot_platform_core::LauncherKind;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

use crate::command::{ExecutionRequest, LauncherArgs};

/// How a launcher run ended.
///
/// Failing to start the launcher at all is not an outcome; executors
/// report it as [`FfshotError::LaunchFailure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// Exited with status 0.
    Success,
    /// Ran and exited non-zero, or was killed by a signal (`exit_code: None`).
    Failed {
        exit_code: Option<i32>,
        stderr: String,
    },
}

/// What to do with a non-zero exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExitPolicy {
    /// Report it as `Ok(false)`.
    #[default]
    Suppress,
    /// Report it as [`FfshotError::ExecutionFailed`].
    Raise,
}

/// Convert an outcome into the boolean result callers see.
pub fn apply_exit_policy(outcome: ExecutionOutcome, policy: ExitPolicy) -> FfshotResult<bool> {
    match (outcome, policy) {
        (ExecutionOutcome::Success, _) => Ok(true),
        (ExecutionOutcome::Failed { .. }, ExitPolicy::Suppress) => Ok(false),
        (ExecutionOutcome::Failed { exit_code, stderr }, ExitPolicy::Raise) => {
            Err(FfshotError::ExecutionFailed { exit_code, stderr })
        }
    }
}

/// Runs one launcher invocation to completion.
///
/// Implementations start exactly one process per call and never retry.
#[async_trait]
pub trait ProcessExecutor: Send + Sync {
    async fn execute(&self, request: &ExecutionRequest) -> FfshotResult<ExecutionOutcome>;

    /// Executor name, for logs.
    fn name(&self) -> &str;
}

/// Executor that spawns the launcher script through the platform shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct LauncherExecutor;

#[async_trait]
impl ProcessExecutor for LauncherExecutor {
    async fn execute(&self, request: &ExecutionRequest) -> FfshotResult<ExecutionOutcome> {
        // sh/cmd start even when the script is missing.
        if let Err(e) = tokio::fs::metadata(&request.launcher_path).await {
            return Err(FfshotError::launch_failure(&request.launcher_path, e));
        }

        tracing::debug!(
            launcher = %request.launcher_path.display(),
            args = %request.args,
            "Running ffmpeg launcher"
        );

        let mut cmd = launcher_command(request);
        cmd.current_dir(&request.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        let mut child = cmd
            .spawn()
            .map_err(|e| FfshotError::launch_failure(&request.launcher_path, e))?;

        tracing::info!(
            pid = child.id(),
            launcher = %request.launcher_path.display(),
            "ffmpeg launcher started"
        );

        // Drained concurrently so ffmpeg never blocks on a full pipe.
        let stderr_task = child
            .stderr
            .take()
            .map(|stderr| tokio::spawn(stderr_tail(stderr, STDERR_TAIL_LINES)));

        let status = child.wait().await?;

        let stderr = match stderr_task {
            Some(task) => task
                .await
                .unwrap_or_else(|e| format!("<failed to join stderr reader: {e}>")),
            None => String::new(),
        };

        if status.success() {
            tracing::info!(output = request.args.output(), "ffmpeg finished");
            return Ok(ExecutionOutcome::Success);
        }

        tracing::warn!(
            status = %status,
            stderr = %stderr,
            "ffmpeg launcher exited with failure"
        );
        Ok(ExecutionOutcome::Failed {
            exit_code: status.code(),
            stderr,
        })
    }

    fn name(&self) -> &str {
        "launcher"
    }
}

/// Lines of ffmpeg stderr kept for failure reports; earlier lines are
/// dropped as they are read.
pub const STDERR_TAIL_LINES: usize = 40;

/// Read `reader` to the end, keeping only its last `max_lines` lines.
async fn stderr_tail<R>(reader: R, max_lines: usize) -> String
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).split(b'\n');
    let mut tail = VecDeque::with_capacity(max_lines);
    loop {
        match lines.next_segment().await {
            Ok(Some(line)) => {
                if tail.len() == max_lines {
                    tail.pop_front();
                }
                tail.push_back(String::from_utf8_lossy(&line).into_owned());
            }
            Ok(None) => break,
            Err(e) => {
                tail.push_back(format!("<failed to read ffmpeg stderr: {e}>"));
                break;
            }
        }
    }
    let joined = Vec::from(tail).join("\n");
    joined.trim().to_string()
}

fn launcher_command(request: &ExecutionRequest) -> Command {
    match request.launcher {
        LauncherKind::Batch => {
            let mut cmd = Command::new("cmd");
            append_batch_args(&mut cmd, &request.launcher_path, &request.args);
            cmd
        }
        LauncherKind::Shell => {
            let mut cmd = Command::new("sh");
            cmd.arg(&request.launcher_path).args(request.args.tokens());
            cmd
        }
    }
}

/// Full `cmd.exe` argument string for a batch launcher.
///
/// `/S` makes cmd strip exactly the outermost pair of quotes, so the quoted
/// launcher path and the quoted option blocks inside survive intact.
#[cfg_attr(not(windows), allow(dead_code))]
fn batch_command_line(launcher: &Path, args: &LauncherArgs) -> String {
    format!(
        "/S /C \"\"{}\" {}\"",
        launcher.display(),
        args.command_line()
    )
}

#[cfg(windows)]
fn append_batch_args(cmd: &mut Command, launcher: &Path, args: &LauncherArgs) {
    cmd.raw_arg(batch_command_line(launcher, args));
}

#[cfg(not(windows))]
fn append_batch_args(cmd: &mut Command, launcher: &Path, args: &LauncherArgs) {
    cmd.arg("/C").arg(launcher).args(args.tokens());
}
