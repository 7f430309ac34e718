//! Concrete implementations of the ports plus the inbound HTTP adapter.

pub mod ffmpeg;
pub mod fs_jobs;
pub mod http;
pub mod ytdlp;
