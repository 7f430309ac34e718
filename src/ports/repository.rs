use crate::domain::jobs::Job;
use async_trait::async_trait;
use std::error::Error;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Persist the latest state of a job record, keyed by its id.
    /// A later `get_job` from any task must observe this state.
    async fn put_job(&self, job: &Job) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Fetch a job record by id.
    async fn get_job(&self, job_id: &str) -> Result<Option<Job>, Box<dyn Error + Send + Sync>>;
}
