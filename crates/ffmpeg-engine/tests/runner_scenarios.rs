use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use ffshot_common::error::{FfshotError, FfshotResult};
use ffshot_ffmpeg_engine::{
    ExecutionOutcome, ExecutionRequest, ExitPolicy, FfmpegRunner, ImageFormat, OptionMap,
    ProcessExecutor,
};
use ffshot_platform_core::{HostPlatform, OsFamily, PlatformProbe};
use tempfile::TempDir;

#[derive(Clone, Copy)]
enum Reply {
    Exit(i32),
    NotFound,
}

/// Records every request and answers with a fixed reply.
#[derive(Clone)]
struct StubExecutor {
    reply: Reply,
    requests: Arc<Mutex<Vec<ExecutionRequest>>>,
}

impl StubExecutor {
    fn new(reply: Reply) -> Self {
        Self {
            reply,
            requests: Arc::default(),
        }
    }

    fn requests(&self) -> Vec<ExecutionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProcessExecutor for StubExecutor {
    async fn execute(&self, request: &ExecutionRequest) -> FfshotResult<ExecutionOutcome> {
        self.requests.lock().unwrap().push(request.clone());
        match self.reply {
            Reply::Exit(0) => Ok(ExecutionOutcome::Success),
            Reply::Exit(code) => Ok(ExecutionOutcome::Failed {
                exit_code: Some(code),
                stderr: "Invalid data found when processing input".to_string(),
            }),
            Reply::NotFound => Err(FfshotError::launch_failure(
                &request.launcher_path,
                std::io::Error::from(std::io::ErrorKind::NotFound),
            )),
        }
    }

    fn name(&self) -> &str {
        "stub"
    }
}

/// 64-bit macOS host that counts how often it is asked.
#[derive(Clone, Default)]
struct CountingProbe {
    calls: Arc<AtomicUsize>,
}

impl PlatformProbe for CountingProbe {
    fn host(&self) -> HostPlatform {
        self.calls.fetch_add(1, Ordering::SeqCst);
        HostPlatform::new(OsFamily::MacOS, true)
    }
}

/// A base directory containing `ffmpeg_v4.1.1/macos64/ffmpeg.sh`.
fn bundle() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let app_dir = dir.path().join("ffmpeg_v4.1.1").join("macos64");
    std::fs::create_dir_all(&app_dir).unwrap();
    std::fs::write(app_dir.join("ffmpeg.sh"), "#!/bin/sh\nexit 0\n").unwrap();
    dir
}

fn runner(base: &Path, executor: &StubExecutor, probe: &CountingProbe) -> FfmpegRunner {
    FfmpegRunner::new(base)
        .with_probe(probe.clone())
        .with_executor(executor.clone())
}

#[tokio::test]
async fn screenshot_grabs_one_frame_at_offset() {
    let base = bundle();
    let executor = StubExecutor::new(Reply::Exit(0));
    let probe = CountingProbe::default();

    let ok = runner(base.path(), &executor, &probe)
        .screenshot("in.mp4", "out.jpg", Some(Duration::from_secs(5)))
        .await
        .unwrap();

    assert!(ok);
    let requests = executor.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.args.input(), "in.mp4");
    assert_eq!(request.args.output(), "out.jpg");
    assert_eq!(request.args.input_options(), None);
    assert_eq!(request.args.output_options(), Some("-vframes 1 -ss 5s"));
    assert_eq!(
        request.launcher_path,
        base.path().join("ffmpeg_v4.1.1").join("macos64").join("ffmpeg.sh")
    );
    assert_eq!(probe.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn interval_screenshot_builds_numbered_pattern() {
    let base = bundle();
    let executor = StubExecutor::new(Reply::Exit(0));
    let probe = CountingProbe::default();

    let ok = runner(base.path(), &executor, &probe)
        .screenshot_interval(
            "in.mp4",
            "/out",
            "frame",
            10,
            Some(Duration::from_secs(60)),
            ImageFormat::Png,
        )
        .await
        .unwrap();

    assert!(ok);
    let request = &executor.requests()[0];
    let expected: PathBuf = Path::new("/out").join("frame%d.png");
    assert_eq!(request.args.output(), expected.to_string_lossy());
    assert_eq!(request.args.output_options(), Some("-vf fps=1/10 -t 60s"));
}

#[tokio::test]
async fn zero_interval_never_reaches_the_executor() {
    let base = bundle();
    let executor = StubExecutor::new(Reply::Exit(0));
    let probe = CountingProbe::default();

    let err = runner(base.path(), &executor, &probe)
        .screenshot_interval("in.mp4", "/out", "frame", 0, None, ImageFormat::Jpg)
        .await
        .unwrap_err();

    assert!(matches!(err, FfshotError::InvalidArgument { .. }));
    assert!(executor.requests().is_empty());
    assert_eq!(probe.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn blank_input_fails_before_platform_resolution() {
    let base = bundle();
    let executor = StubExecutor::new(Reply::Exit(0));
    let probe = CountingProbe::default();

    let err = runner(base.path(), &executor, &probe)
        .execute_ffmpeg("", "out.jpg", None, None)
        .await
        .unwrap_err();

    assert!(matches!(err, FfshotError::InvalidArgument { .. }));
    assert_eq!(probe.calls.load(Ordering::SeqCst), 0);
    assert!(executor.requests().is_empty());
}

#[cfg(unix)]
#[tokio::test]
async fn non_unicode_paths_are_rejected_not_mangled() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let base = bundle();
    let executor = StubExecutor::new(Reply::Exit(0));
    let probe = CountingProbe::default();
    let clip = Path::new(OsStr::from_bytes(b"clip\xff.mp4"));

    let runner = runner(base.path(), &executor, &probe);
    let err = runner
        .execute_ffmpeg(clip, "out.jpg", None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, FfshotError::InvalidArgument { .. }));

    let err = runner.screenshot("in.mp4", clip, None).await.unwrap_err();
    assert!(matches!(err, FfshotError::InvalidArgument { .. }));

    assert!(executor.requests().is_empty());
    assert_eq!(probe.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn non_zero_exit_is_reported_as_false() {
    let base = bundle();
    let executor = StubExecutor::new(Reply::Exit(1));
    let probe = CountingProbe::default();

    let ok = runner(base.path(), &executor, &probe)
        .execute_ffmpeg("in.mp4", "out.mp4", None, None)
        .await
        .unwrap();

    assert!(!ok);
    assert_eq!(executor.requests().len(), 1);
}

#[tokio::test]
async fn raise_policy_turns_non_zero_exit_into_error() {
    let base = bundle();
    let executor = StubExecutor::new(Reply::Exit(1));
    let probe = CountingProbe::default();

    let err = runner(base.path(), &executor, &probe)
        .run(
            Path::new("in.mp4"),
            Path::new("out.mp4"),
            None,
            None,
            ExitPolicy::Raise,
        )
        .await
        .unwrap_err();

    match err {
        FfshotError::ExecutionFailed { exit_code, .. } => assert_eq!(exit_code, Some(1)),
        other => panic!("expected ExecutionFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn launch_failure_is_an_error_not_false() {
    let base = bundle();
    let executor = StubExecutor::new(Reply::NotFound);
    let probe = CountingProbe::default();

    let err = runner(base.path(), &executor, &probe)
        .execute_ffmpeg("in.mp4", "out.mp4", None, None)
        .await
        .unwrap_err();

    assert!(matches!(err, FfshotError::LaunchFailure { .. }));
}

#[tokio::test]
async fn options_on_both_sides_reach_the_launcher_in_order() {
    let base = bundle();
    let executor = StubExecutor::new(Reply::Exit(0));
    let probe = CountingProbe::default();
    let before_input = OptionMap::from_pairs([("-ss", "00:01:00"), ("-hwaccel", "auto")]).unwrap();
    let before_output = OptionMap::from_pairs([("-c:v", "libx264"), ("-an", "")]).unwrap();

    runner(base.path(), &executor, &probe)
        .execute_ffmpeg("in.mp4", "out.mp4", Some(&before_input), Some(&before_output))
        .await
        .unwrap();

    let request = &executor.requests()[0];
    let line = request.args.command_line();
    assert!(line.contains("-b \"-ss 00:01:00 -hwaccel auto\" -c in.mp4"));
    assert!(line.ends_with("-d \"-c:v libx264 -an\" -e out.mp4"));
}

#[tokio::test]
async fn unsupported_host_is_fatal() {
    let base = bundle();
    let executor = StubExecutor::new(Reply::Exit(0));

    let err = FfmpegRunner::new(base.path())
        .with_probe(HostPlatform::new(OsFamily::Linux, true))
        .with_executor(executor.clone())
        .screenshot("in.mp4", "out.jpg", None)
        .await
        .unwrap_err();

    assert!(matches!(err, FfshotError::UnsupportedPlatform { .. }));
    assert!(executor.requests().is_empty());
}

#[tokio::test]
async fn missing_bundle_is_a_configuration_error() {
    let empty = tempfile::tempdir().unwrap();
    let executor = StubExecutor::new(Reply::Exit(0));
    let probe = CountingProbe::default();

    let err = runner(empty.path(), &executor, &probe)
        .screenshot("in.mp4", "out.jpg", None)
        .await
        .unwrap_err();

    assert!(matches!(err, FfshotError::MissingDistribution { .. }));
    assert!(executor.requests().is_empty());
}

#[tokio::test]
async fn concurrent_calls_run_independently() {
    let base = bundle();
    let executor = StubExecutor::new(Reply::Exit(0));
    let probe = CountingProbe::default();
    let runner = runner(base.path(), &executor, &probe);

    let (first, second) = tokio::join!(
        runner.screenshot("a.mp4", "a.jpg", None),
        runner.screenshot("b.mp4", "b.jpg", Some(Duration::from_millis(1500))),
    );

    assert!(first.unwrap());
    assert!(second.unwrap());
    let mut outputs: Vec<_> = executor
        .requests()
        .iter()
        .map(|r| (r.args.output().to_string(), r.args.output_options().map(str::to_string)))
        .collect();
    outputs.sort();
    assert_eq!(
        outputs,
        [
            ("a.jpg".to_string(), Some("-vframes 1".to_string())),
            ("b.jpg".to_string(), Some("-vframes 1 -ss 1500ms".to_string())),
        ]
    );
}
