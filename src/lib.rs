//! Clipd - Video Segment Extraction Service
//!
//! Hexagonal Architecture:
//! - domain/: Pure business logic (timestamps, job state machine, errors)
//! - ports/: Trait definitions (media provider, cutter, job repository)
//! - adapters/: Concrete implementations (yt-dlp, ffmpeg, filesystem job
//!   store, HTTP API)
//! - application/: Extraction orchestration and job dispatch
//! - config: Environment configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports for convenience
pub use application::dispatch::JobDispatcher;
pub use application::extractor::SegmentExtractor;
pub use config::Config;
pub use domain::error::ClipError;
