//! HTTP inbound adapter.
//!
//! JSON API for submitting clip jobs, polling their status, and downloading
//! finished segments.

use crate::application::dispatch::JobDispatcher;
use crate::domain::jobs::{ClipRequest, Job};
use crate::ports::cutter::MediaCutter;
use crate::ports::provider::MediaProvider;
use crate::ports::repository::JobRepository;
use axum::body::Body;
use axum::extract::{Path as UrlPath, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tokio_util::io::ReaderStream;

pub struct AppState<P, C, R> {
    pub dispatcher: Arc<JobDispatcher<P, C, R>>,
    pub download_dir: PathBuf,
}

// Manual impl: a derived Clone would demand Clone of P, C and R.
impl<P, C, R> Clone for AppState<P, C, R> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: self.dispatcher.clone(),
            download_dir: self.download_dir.clone(),
        }
    }
}

pub fn router<P, C, R>(state: AppState<P, C, R>) -> Router
where
    P: MediaProvider + 'static,
    C: MediaCutter + 'static,
    R: JobRepository + 'static,
{
    Router::new()
        .route("/api/clips", post(create_clip::<P, C, R>))
        .route("/api/clips/:job_id", get(get_clip_status::<P, C, R>))
        .route("/download/:filename", get(download_file::<P, C, R>))
        .with_state(state)
}

/// Request body for submitting a clip job. `url` stays optional here so an
/// absent field gets the same 400 as an empty one instead of a rejection
/// from the Json extractor.
#[derive(Debug, Deserialize)]
struct CreateClipBody {
    #[serde(default)]
    url: Option<String>,
    start_time: String,
    end_time: String,
    #[serde(default)]
    filename: Option<String>,
}

/// POST /api/clips - submit a clip job, returns the queued record.
async fn create_clip<P, C, R>(
    State(state): State<AppState<P, C, R>>,
    Json(body): Json<CreateClipBody>,
) -> Result<(StatusCode, Json<Job>), (StatusCode, String)>
where
    P: MediaProvider + 'static,
    C: MediaCutter + 'static,
    R: JobRepository + 'static,
{
    let url = match body.url {
        Some(url) if !url.is_empty() => url,
        _ => return Err((StatusCode::BAD_REQUEST, "url is required".to_owned())),
    };

    let request = ClipRequest {
        url,
        start_time: body.start_time,
        end_time: body.end_time,
        filename: body.filename,
    };

    let job = state
        .dispatcher
        .submit(request)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/clips/:job_id - read the persisted job record.
async fn get_clip_status<P, C, R>(
    State(state): State<AppState<P, C, R>>,
    UrlPath(job_id): UrlPath<String>,
) -> Result<Json<Job>, (StatusCode, String)>
where
    P: MediaProvider + 'static,
    C: MediaCutter + 'static,
    R: JobRepository + 'static,
{
    match state.dispatcher.job_status(&job_id).await {
        Ok(Some(job)) => Ok(Json(job)),
        Ok(None) => Err((StatusCode::NOT_FOUND, "Job not found".to_owned())),
        Err(e) => Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string())),
    }
}

/// GET /download/:filename - stream a finished segment back to the client.
async fn download_file<P, C, R>(
    State(state): State<AppState<P, C, R>>,
    UrlPath(filename): UrlPath<String>,
) -> Result<impl IntoResponse, (StatusCode, String)>
where
    P: MediaProvider + 'static,
    C: MediaCutter + 'static,
    R: JobRepository + 'static,
{
    let requested = PathBuf::from(&filename);
    if !path_is_valid(&requested) {
        return Err((StatusCode::BAD_REQUEST, "Invalid path".to_owned()));
    }

    let path = state.download_dir.join(&requested);
    if !path.exists() {
        return Err((StatusCode::NOT_FOUND, "File not found".to_owned()));
    }

    let file = tokio::fs::File::open(&path)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let content_type = mime_guess::from_path(&path)
        .first_or_octet_stream()
        .to_string();

    let headers = [
        (header::CONTENT_TYPE, content_type),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ),
    ];

    Ok((headers, Body::from_stream(ReaderStream::new(file))))
}

// Reject anything that could climb out of the download directory.
fn path_is_valid(path: &Path) -> bool {
    path.components().all(|c| matches!(c, Component::Normal(_)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::fs_jobs::FsJobStore;
    use crate::application::extractor::SegmentExtractor;
    use crate::ports::cutter::MockMediaCutter;
    use crate::ports::provider::MockMediaProvider;
    use tempfile::tempdir;

    fn test_state(
        jobs_dir: &Path,
        download_dir: &Path,
    ) -> AppState<MockMediaProvider, MockMediaCutter, FsJobStore> {
        let extractor = SegmentExtractor::new(
            MockMediaProvider::new(),
            MockMediaCutter::new(),
            download_dir,
        );
        AppState {
            dispatcher: Arc::new(JobDispatcher::new(extractor, FsJobStore::new(jobs_dir), 1)),
            download_dir: download_dir.to_path_buf(),
        }
    }

    fn body(url: Option<&str>) -> CreateClipBody {
        CreateClipBody {
            url: url.map(String::from),
            start_time: "0:10".to_string(),
            end_time: "0:40".to_string(),
            filename: None,
        }
    }

    #[tokio::test]
    async fn missing_url_is_bad_request() {
        let jobs_dir = tempdir().unwrap();
        let download_dir = tempdir().unwrap();
        let state = test_state(jobs_dir.path(), download_dir.path());

        let err = create_clip(State(state), Json(body(None)))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn empty_url_is_bad_request() {
        let jobs_dir = tempdir().unwrap();
        let download_dir = tempdir().unwrap();
        let state = test_state(jobs_dir.path(), download_dir.path());

        let err = create_clip(State(state), Json(body(Some(""))))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn absent_url_field_deserializes_instead_of_rejecting() {
        let parsed: CreateClipBody =
            serde_json::from_str(r#"{"start_time": "0:10", "end_time": "0:40"}"#).unwrap();
        assert!(parsed.url.is_none());
    }

    #[test]
    fn plain_filename_is_valid() {
        assert!(path_is_valid(Path::new("clip_abc.mp4")));
    }

    #[test]
    fn parent_components_are_rejected() {
        assert!(!path_is_valid(Path::new("../secrets.mp4")));
        assert!(!path_is_valid(Path::new("a/../../b.mp4")));
    }

    #[test]
    fn absolute_paths_are_rejected() {
        assert!(!path_is_valid(Path::new("/etc/passwd")));
    }
}
