use crate::domain::error::ClipError;
use crate::domain::jobs::{safe_stem, ClipRequest, SegmentRange};
use crate::domain::timestamp::{parse_timestamp, validate_range};
use crate::ports::cutter::MediaCutter;
use crate::ports::provider::MediaProvider;
use std::path::PathBuf;

/// Orchestrates one segment extraction: metadata lookup, range validation,
/// full-media fetch, stream-copy cut. One invocation per job, nothing shared
/// between invocations.
pub struct SegmentExtractor<P, C> {
    provider: P,
    cutter: C,
    output_dir: PathBuf,
}

impl<P, C> SegmentExtractor<P, C>
where
    P: MediaProvider,
    C: MediaCutter,
{
    pub fn new(provider: P, cutter: C, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            provider,
            cutter,
            output_dir: output_dir.into(),
        }
    }

    /// Extract the requested segment and return the path of the trimmed
    /// file. The full-media download never survives this call: it is removed
    /// on every exit path once it exists.
    pub async fn extract(&self, request: &ClipRequest) -> Result<PathBuf, ClipError> {
        let mut full_media_path: Option<PathBuf> = None;
        let result = self.run(request, &mut full_media_path).await;

        // Best-effort cleanup. A failed removal is logged and must never
        // replace the primary outcome.
        if let Some(path) = full_media_path {
            if path.exists() {
                if let Err(e) = tokio::fs::remove_file(&path).await {
                    tracing::warn!("Error cleaning up temporary file {:?}: {}", path, e);
                }
            }
        }

        result
    }

    async fn run(
        &self,
        request: &ClipRequest,
        full_media_path: &mut Option<PathBuf>,
    ) -> Result<PathBuf, ClipError> {
        // Parse before touching the network.
        let start = parse_timestamp(&request.start_time)?;
        let end = parse_timestamp(&request.end_time)?;

        tracing::info!("Extracting information from: {}", request.url);
        let meta = self.provider.fetch_metadata(&request.url).await?;
        if meta.title.is_empty() || meta.ext.is_empty() || meta.duration <= 0.0 {
            return Err(ClipError::VideoUnavailable(
                "Missing video metadata".to_string(),
            ));
        }

        validate_range(start, end, meta.duration)?;
        let range = SegmentRange { start, end };

        let stem = safe_stem(&meta.title);
        let full_path = self.output_dir.join(format!("{}.{}", stem, meta.ext));
        *full_media_path = Some(full_path.clone());

        tracing::info!("Downloading video...");
        self.provider.fetch_full(&request.url, &full_path).await?;

        let output_name = match &request.filename {
            Some(name) => name.clone(),
            None => {
                let stamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
                format!("{}_{}_segment.{}", stem, stamp, meta.ext)
            }
        };
        let output_path = self.output_dir.join(&output_name);

        tracing::info!("Creating segment with FFmpeg...");
        self.cutter
            .cut(&full_path, range.start, range.duration(), &output_path)
            .await?;

        tracing::info!("Segment created successfully");
        Ok(output_path)
    }
}
