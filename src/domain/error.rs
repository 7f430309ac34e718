//! Error taxonomy for the clip pipeline.

use std::io;
use thiserror::Error;

/// Closed set of failure kinds recognised by the segment extractor.
///
/// The dispatch task is the single boundary where these are matched and
/// turned into a terminal `failed` job record; nothing else catches them.
#[derive(Debug, Error)]
pub enum ClipError {
    /// Timestamp text could not be parsed. Raised before any network or
    /// filesystem side effect.
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    /// Parsed timestamps do not form a legal range for the real duration.
    #[error("Invalid timestamp range: {0}")]
    TimestampRange(String),

    /// The provider could not resolve or fetch the source video.
    #[error("Video unavailable: {0}")]
    VideoUnavailable(String),

    /// The cutter exited non-zero; carries its captured diagnostic output.
    #[error("FFmpeg error: {0}")]
    Cutter(String),

    /// Catch-all for anything outside the set above, message preserved.
    #[error("Error extracting video segment: {0}")]
    Extraction(String),
}

impl From<io::Error> for ClipError {
    fn from(err: io::Error) -> Self {
        ClipError::Extraction(err.to_string())
    }
}
