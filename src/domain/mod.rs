//! Pure business logic: timestamps, the job state machine, and the error
//! taxonomy. Nothing in here touches the network or the filesystem.

pub mod error;
pub mod jobs;
pub mod timestamp;
