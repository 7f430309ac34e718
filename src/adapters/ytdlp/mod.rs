//! yt-dlp outbound adapter implementing the media provider port.
//!
//! Metadata comes from `yt-dlp -J` (single-video JSON dump); the full fetch
//! writes straight to the destination path via `-o`.

use crate::domain::error::ClipError;
use crate::domain::jobs::VideoMetadata;
use crate::ports::provider::MediaProvider;
use async_trait::async_trait;
use serde::Deserialize;
use std::io;
use std::path::Path;
use std::process::Output;
use tokio::process::Command;

/// Runs the actual yt-dlp processes, mockable for tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait YtDlpRunner: Send + Sync {
    async fn run_dump_json(&self, url: &str) -> io::Result<Output>;

    async fn run_download(&self, url: &str, dest: &Path) -> io::Result<Output>;
}

pub struct RealYtDlpRunner;

#[async_trait]
impl YtDlpRunner for RealYtDlpRunner {
    async fn run_dump_json(&self, url: &str) -> io::Result<Output> {
        Command::new("yt-dlp")
            .arg("-J")
            .arg("--no-warnings")
            .arg(url)
            .output()
            .await
    }

    async fn run_download(&self, url: &str, dest: &Path) -> io::Result<Output> {
        Command::new("yt-dlp")
            .arg("-f")
            .arg("best")
            .arg("--no-warnings")
            .arg("-o")
            .arg(dest)
            .arg(url)
            .output()
            .await
    }
}

/// Metadata fields as yt-dlp reports them. Any of these can be absent for
/// live streams, removed videos and the like.
#[derive(Debug, Deserialize)]
struct RawInfo {
    title: Option<String>,
    ext: Option<String>,
    duration: Option<f64>,
}

/// [`MediaProvider`] implementation backed by the yt-dlp CLI.
pub struct YtDlpProvider<E = RealYtDlpRunner> {
    runner: E,
}

impl YtDlpProvider<RealYtDlpRunner> {
    pub fn new() -> Self {
        Self {
            runner: RealYtDlpRunner,
        }
    }
}

impl Default for YtDlpProvider<RealYtDlpRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: YtDlpRunner> YtDlpProvider<E> {
    pub fn with_runner(runner: E) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl<E: YtDlpRunner> MediaProvider for YtDlpProvider<E> {
    async fn fetch_metadata(&self, url: &str) -> Result<VideoMetadata, ClipError> {
        let out = self.runner.run_dump_json(url).await?;
        if !out.status.success() {
            return Err(ClipError::VideoUnavailable(format!(
                "Failed to access video: {}",
                String::from_utf8_lossy(&out.stderr).trim()
            )));
        }

        let info: RawInfo = serde_json::from_slice(&out.stdout).map_err(|_| {
            ClipError::VideoUnavailable("Could not retrieve video information".to_string())
        })?;

        match (info.title, info.ext, info.duration) {
            (Some(title), Some(ext), Some(duration))
                if !title.is_empty() && !ext.is_empty() =>
            {
                Ok(VideoMetadata {
                    title,
                    ext,
                    duration,
                })
            }
            _ => Err(ClipError::VideoUnavailable(
                "Missing video metadata".to_string(),
            )),
        }
    }

    async fn fetch_full(&self, url: &str, dest: &Path) -> Result<(), ClipError> {
        let out = self.runner.run_download(url, dest).await?;
        if !out.status.success() {
            return Err(ClipError::VideoUnavailable(format!(
                "Failed to access video: {}",
                String::from_utf8_lossy(&out.stderr).trim()
            )));
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
    async fn maps_json_dump_to_metadata() {
        let mut runner = MockYtDlpRunner::new();
        runner.expect_run_dump_json().returning(|_| {
            canned_output(
                r#"{"title": "Demo Video", "ext": "mp4", "duration": 300.5, "uploader": "x"}"#,
                "",
                true,
            )
        });

        let provider = YtDlpProvider::with_runner(runner);
        let meta = provider.fetch_metadata("https://example.com/v").await.unwrap();

        assert_eq!(meta.title, "Demo Video");
        assert_eq!(meta.ext, "mp4");
        assert_eq!(meta.duration, 300.5);
    }

    #[tokio::test]
    async fn missing_duration_is_unavailable() {
        let mut runner = MockYtDlpRunner::new();
        runner.expect_run_dump_json().returning(|_| {
            canned_output(r#"{"title": "Live Stream", "ext": "mp4"}"#, "", true)
        });

        let provider = YtDlpProvider::with_runner(runner);
        let err = provider
            .fetch_metadata("https://example.com/v")
            .await
            .unwrap_err();

        assert!(matches!(err, ClipError::VideoUnavailable(_)));
    }

    #[tokio::test]
    async fn nonzero_exit_carries_stderr() {
        let mut runner = MockYtDlpRunner::new();
        runner.expect_run_dump_json().returning(|_| {
            canned_output("", "ERROR: Video unavailable", false)
        });

        let provider = YtDlpProvider::with_runner(runner);
        let err = provider
            .fetch_metadata("https://example.com/v")
            .await
            .unwrap_err();

        match err {
            ClipError::VideoUnavailable(msg) => {
                assert!(msg.contains("ERROR: Video unavailable"))
            }
            other => panic!("expected VideoUnavailable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn garbage_json_is_unavailable() {
        let mut runner = MockYtDlpRunner::new();
        runner
            .expect_run_dump_json()
            .returning(|_| canned_output("not json at all", "", true));

        let provider = YtDlpProvider::with_runner(runner);
        assert!(matches!(
            provider.fetch_metadata("https://example.com/v").await,
            Err(ClipError::VideoUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn failed_download_is_unavailable() {
        let mut runner = MockYtDlpRunner::new();
        runner.expect_run_download().returning(|_, _: &Path| {
            canned_output("", "ERROR: This video is private", false)
        });

        let provider = YtDlpProvider::with_runner(runner);
        let err = provider
            .fetch_full("https://example.com/v", &PathBuf::from("dest.mp4"))
            .await
            .unwrap_err();

        match err {
            ClipError::VideoUnavailable(msg) => assert!(msg.contains("private")),
            other => panic!("expected VideoUnavailable, got {:?}", other),
        }
    }
}
