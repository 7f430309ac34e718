//! Filesystem job repository: one JSON record per job id.

use crate::domain::jobs::Job;
use crate::ports::repository::JobRepository;
use async_trait::async_trait;
use std::error::Error;
use std::path::PathBuf;

#[derive(Clone)]
pub struct FsJobStore {
    jobs_dir: PathBuf,
}

impl FsJobStore {
    pub fn new(jobs_dir: impl Into<PathBuf>) -> Self {
        Self {
            jobs_dir: jobs_dir.into(),
        }
    }

    fn record_path(&self, job_id: &str) -> PathBuf {
        self.jobs_dir.join(format!("{}.json", job_id))
    }
}

#[async_trait]
impl JobRepository for FsJobStore {
    async fn put_job(&self, job: &Job) -> Result<(), Box<dyn Error + Send + Sync>> {
        let json = serde_json::to_vec(job)?;
        let path = self.record_path(&job.job_id);

        // Write to a sibling temp file and rename so a concurrent reader
        // never observes a half-written record.
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }

    async fn get_job(&self, job_id: &str) -> Result<Option<Job>, Box<dyn Error + Send + Sync>> {
        match tokio::fs::read(self.record_path(job_id)).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }
}
