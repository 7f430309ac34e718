//! Application services driving the ports: the segment extraction
//! orchestration and the per-job dispatch/tracking task.

pub mod dispatch;
pub mod extractor;
