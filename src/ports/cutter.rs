use crate::domain::error::ClipError;
use async_trait::async_trait;
use std::path::Path;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaCutter: Send + Sync {
    /// Cut `duration_secs` of media out of `input` starting at `start_secs`,
    /// writing the result to `output`. Stream copy only (no re-encode), an
    /// existing output file is overwritten.
    async fn cut(
        &self,
        input: &Path,
        start_secs: i64,
        duration_secs: i64,
        output: &Path,
    ) -> Result<(), ClipError>;
}
