//! FFmpeg outbound adapter: lossless stream-copy cutting through the
//! `ffmpeg` binary.

use crate::domain::error::ClipError;
use crate::ports::cutter::MediaCutter;
use async_trait::async_trait;
use std::io;
use std::path::Path;
use std::process::Output;
use tokio::process::Command;

/// Runs the actual ffmpeg processes. Split out as a trait so the adapter
/// logic can be tested against canned process output.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FfmpegRunner: Send + Sync {
    async fn run_version(&self) -> io::Result<Output>;

    async fn run_copy_cut(
        &self,
        input: &Path,
        start_secs: i64,
        duration_secs: i64,
        output: &Path,
    ) -> io::Result<Output>;
}

pub struct RealFfmpegRunner;

#[async_trait]
impl FfmpegRunner for RealFfmpegRunner {
    async fn run_version(&self) -> io::Result<Output> {
        Command::new("ffmpeg").arg("-version").output().await
    }

    async fn run_copy_cut(
        &self,
        input: &Path,
        start_secs: i64,
        duration_secs: i64,
        output: &Path,
    ) -> io::Result<Output> {
        Command::new("ffmpeg")
            .arg("-i")
            .arg(input)
            .arg("-ss")
            .arg(start_secs.to_string())
            .arg("-t")
            .arg(duration_secs.to_string())
            .arg("-c")
            .arg("copy")
            .arg("-y")
            .arg(output)
            .output()
            .await
    }
}

/// [`MediaCutter`] implementation backed by the ffmpeg CLI.
pub struct FfmpegCutter<E = RealFfmpegRunner> {
    runner: E,
}

impl FfmpegCutter<RealFfmpegRunner> {
    pub fn new() -> Self {
        Self {
            runner: RealFfmpegRunner,
        }
    }
}

impl Default for FfmpegCutter<RealFfmpegRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: FfmpegRunner> FfmpegCutter<E> {
    pub fn with_runner(runner: E) -> Self {
        Self { runner }
    }

    /// Verify the ffmpeg binary is runnable. Called once at startup so a
    /// missing install fails the process at boot rather than the first job.
    pub async fn check(&self) -> Result<(), ClipError> {
        match self.runner.run_version().await {
            Ok(out) if out.status.success() => Ok(()),
            Ok(_) => Err(ClipError::Cutter(
                "FFmpeg is not installed or not accessible".to_string(),
            )),
            Err(_) => Err(ClipError::Cutter(
                "FFmpeg is not installed or not in system PATH".to_string(),
            )),
        }
    }
}

#[async_trait]
impl<E: FfmpegRunner> MediaCutter for FfmpegCutter<E> {
    async fn cut(
        &self,
        input: &Path,
        start_secs: i64,
        duration_secs: i64,
        output: &Path,
    ) -> Result<(), ClipError> {
        let out = self
            .runner
            .run_copy_cut(input, start_secs, duration_secs, output)
            .await?;

        if !out.status.success() {
            return Err(ClipError::Cutter(
                String::from_utf8_lossy(&out.stderr).into_owned(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::process::ExitStatusExt;
    use std::path::PathBuf;
    use std::process::ExitStatus;

    fn canned_output(stdout: &str, stderr: &str, success: bool) -> io::Result<Output> {
        Ok(Output {
            status: if success {
                ExitStatus::from_raw(0)
            } else {
                ExitStatus::from_raw(1 << 8)
            },
            stdout: stdout.as_bytes().to_vec(),
            stderr: stderr.as_bytes().to_vec(),
        })
    }

    #[tokio::test]
    async fn cut_succeeds_on_zero_exit() {
        let mut runner = MockFfmpegRunner::new();
        runner
            .expect_run_copy_cut()
            .withf(|_, start, duration, _| *start == 10 && *duration == 30)
            .returning(|_, _, _, _| canned_output("", "", true));

        let cutter = FfmpegCutter::with_runner(runner);
        let result = cutter
            .cut(
                &PathBuf::from("in.mp4"),
                10,
                30,
                &PathBuf::from("out.mp4"),
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn cut_surfaces_stderr_on_failure() {
        let mut runner = MockFfmpegRunner::new();
        runner
            .expect_run_copy_cut()
            .returning(|_, _, _, _| canned_output("", "moov atom not found", false));

        let cutter = FfmpegCutter::with_runner(runner);
        let err = cutter
            .cut(&PathBuf::from("in.mp4"), 0, 5, &PathBuf::from("out.mp4"))
            .await
            .unwrap_err();

        match err {
            ClipError::Cutter(diag) => assert!(diag.contains("moov atom not found")),
            other => panic!("expected Cutter error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn spawn_failure_is_wrapped_as_extraction() {
        let mut runner = MockFfmpegRunner::new();
        runner.expect_run_copy_cut().returning(|_, _, _, _| {
            Err(io::Error::new(io::ErrorKind::NotFound, "no ffmpeg"))
        });

        let cutter = FfmpegCutter::with_runner(runner);
        let err = cutter
            .cut(&PathBuf::from("in.mp4"), 0, 5, &PathBuf::from("out.mp4"))
            .await
            .unwrap_err();

        assert!(matches!(err, ClipError::Extraction(_)));
    }

    #[tokio::test]
    async fn check_fails_when_binary_missing() {
        let mut runner = MockFfmpegRunner::new();
        runner.expect_run_version().returning(|| {
            Err(io::Error::new(io::ErrorKind::NotFound, "not found"))
        });

        let cutter = FfmpegCutter::with_runner(runner);
        assert!(matches!(
            cutter.check().await,
            Err(ClipError::Cutter(_))
        ));
    }

    #[tokio::test]
    async fn check_passes_on_zero_exit() {
        let mut runner = MockFfmpegRunner::new();
        runner
            .expect_run_version()
            .returning(|| canned_output("ffmpeg version 6.1", "", true));

        let cutter = FfmpegCutter::with_runner(runner);
        assert!(cutter.check().await.is_ok());
    }
}
