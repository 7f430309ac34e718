use crate::application::extractor::SegmentExtractor;
use crate::domain::error::ClipError;
use crate::domain::jobs::{ClipRequest, Job};
use crate::ports::cutter::MediaCutter;
use crate::ports::provider::MediaProvider;
use crate::ports::repository::JobRepository;
use std::error::Error;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Default cap on extractions running at once. A full-media fetch can be
/// large and slow, so this stays conservative.
pub const MAX_CONCURRENT_CLIPS: usize = 4;

/// Hands each accepted clip request to its own tokio task and tracks its
/// lifecycle in the job repository: queued -> processing -> completed/failed.
///
/// Submission never blocks on extraction; completion is observed only
/// through the persisted record.
pub struct JobDispatcher<P, C, R> {
    extractor: Arc<SegmentExtractor<P, C>>,
    repo: Arc<R>,
    semaphore: Arc<Semaphore>,
}

impl<P, C, R> JobDispatcher<P, C, R>
where
    P: MediaProvider + 'static,
    C: MediaCutter + 'static,
    R: JobRepository + 'static,
{
    pub fn new(extractor: SegmentExtractor<P, C>, repo: R, max_concurrent: usize) -> Self {
        Self {
            extractor: Arc::new(extractor),
            repo: Arc::new(repo),
            semaphore: Arc::new(Semaphore::new(max_concurrent)),
        }
    }

    /// Persist a fresh queued record and spawn the extraction task, returning
    /// the queued record immediately.
    pub async fn submit(
        &self,
        mut request: ClipRequest,
    ) -> Result<Job, Box<dyn Error + Send + Sync>> {
        let job = Job::queued();

        // Default output name is derived from the job id, which also keeps
        // concurrent jobs from colliding in the output directory.
        if request.filename.is_none() {
            request.filename = Some(format!("clip_{}.mp4", job.job_id));
        }

        self.repo.put_job(&job).await?;

        let extractor = self.extractor.clone();
        let repo = self.repo.clone();
        let semaphore = self.semaphore.clone();
        let mut record = job.clone();

        tokio::spawn(async move {
            // acquire() only fails when the semaphore is closed, which
            // happens on shutdown.
            let _permit = match semaphore.acquire().await {
                Ok(permit) => permit,
                Err(_) => return,
            };
            run_job(extractor, repo.as_ref(), &mut record, request).await;
        });

        Ok(job)
    }

    /// Read the persisted record for a job id. Never blocks on extraction
    /// progress.
    pub async fn job_status(
        &self,
        job_id: &str,
    ) -> Result<Option<Job>, Box<dyn Error + Send + Sync>> {
        self.repo.get_job(job_id).await
    }
}

async fn run_job<P, C, R>(
    extractor: Arc<SegmentExtractor<P, C>>,
    repo: &R,
    record: &mut Job,
    request: ClipRequest,
) where
    P: MediaProvider + 'static,
    C: MediaCutter + 'static,
    R: JobRepository,
{
    record.mark_processing();
    persist(repo, record).await;

    // The extraction runs on its own task so that even a panic in a
    // collaborator still leaves this job with a persisted terminal record.
    let outcome = tokio::spawn(async move { extractor.extract(&request).await }).await;

    match outcome {
        Ok(Ok(output_path)) => {
            let file_name = output_path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_string();
            record.mark_completed(format!("/download/{}", file_name));
        }
        Ok(Err(e)) => {
            tracing::error!("Job {} failed: {}", record.job_id, e);
            record.mark_failed(failure_message(&e));
        }
        Err(join_err) => {
            tracing::error!("Job {} aborted: {}", record.job_id, join_err);
            record.mark_failed(format!("Unexpected error: {}", join_err));
        }
    }

    persist(repo, record).await;
}

/// Human-readable message for a terminal failed record. Exhaustive so a new
/// error variant cannot slip past this boundary unnoticed.
fn failure_message(err: &ClipError) -> String {
    match err {
        ClipError::InvalidTimestamp(_)
        | ClipError::TimestampRange(_)
        | ClipError::VideoUnavailable(_)
        | ClipError::Cutter(_) => err.to_string(),
        ClipError::Extraction(msg) => format!("Unexpected error: {}", msg),
    }
}

async fn persist<R: JobRepository>(repo: &R, job: &Job) {
    // There is no caller to surface this to; the job task is the end of the
    // line. Log and keep the in-memory record moving.
    if let Err(e) = repo.put_job(job).await {
        tracing::error!("Failed to persist job {}: {}", job.job_id, e);
    }
}
