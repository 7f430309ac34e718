use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A clip extraction request as submitted by a client. Immutable once
/// submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipRequest {
    /// Source video URL
    pub url: String,
    /// Start time (HH:MM:SS, MM:SS, or SS)
    pub start_time: String,
    /// End time (HH:MM:SS, MM:SS, or SS)
    pub end_time: String,
    /// Optional output filename
    pub filename: Option<String>,
}

/// Metadata reported by the media provider for a source URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoMetadata {
    /// Video title
    pub title: String,
    /// Container extension ("mp4", "webm", ...)
    pub ext: String,
    /// Duration in seconds
    pub duration: f64,
}

/// A parsed and validated segment range, in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentRange {
    pub start: i64,
    pub end: i64,
}

impl SegmentRange {
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }
}

/// Lifecycle of a clip job. `Completed` and `Failed` are terminal: a record
/// that has reached one of them is never written again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

/// Persisted record for one clip job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Unique job ID
    pub job_id: String,
    /// Current lifecycle state
    pub status: JobStatus,
    /// Human-readable failure message, set when the job fails
    pub message: Option<String>,
    /// Retrieval locator, set when the job completes
    pub download_url: Option<String>,
    /// Submission time
    pub created_at: DateTime<Utc>,
    /// Time the job reached a terminal state
    pub completed_at: Option<DateTime<Utc>>,
}

impl Job {
    /// Create a fresh record in the queued state with a generated id.
    pub fn queued() -> Self {
        Self {
            job_id: Uuid::new_v4().to_string(),
            status: JobStatus::Queued,
            message: None,
            download_url: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn mark_processing(&mut self) {
        self.status = JobStatus::Processing;
    }

    pub fn mark_completed(&mut self, download_url: String) {
        self.status = JobStatus::Completed;
        self.download_url = Some(download_url);
        self.completed_at = Some(Utc::now());
    }

    pub fn mark_failed(&mut self, message: String) {
        self.status = JobStatus::Failed;
        self.message = Some(message);
        self.completed_at = Some(Utc::now());
    }
}

/// Reduce a video title to a filesystem-safe file stem. Titles come straight
/// from the remote provider and can contain anything.
pub fn safe_stem(title: &str) -> String {
    let re = Regex::new(r"[^A-Za-z0-9 ._-]+").unwrap();
    let cleaned = re.replace_all(title, "");
    let trimmed = cleaned.trim();

    if trimmed.is_empty() {
        String::from("video")
    } else {
        trimmed.replace(' ', "_")
    }
}
