use crate::domain::error::ClipError;
use crate::domain::jobs::VideoMetadata;
use async_trait::async_trait;
use std::path::Path;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaProvider: Send + Sync {
    /// Resolve a source URL to its metadata without downloading anything.
    /// Any failure to resolve means the video is unavailable.
    async fn fetch_metadata(&self, url: &str) -> Result<VideoMetadata, ClipError>;

    /// Download the full media for `url`, writing exactly one file at `dest`.
    async fn fetch_full(&self, url: &str, dest: &Path) -> Result<(), ClipError>;
}
