//! Process-wide configuration, loaded once at startup and passed explicitly
//! to the adapters.

use crate::application::dispatch::MAX_CONCURRENT_CLIPS;
use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    /// HTTP server bind address
    pub addr: String,
    /// HTTP server port
    pub port: String,
    /// Directory where full downloads and finished segments are written
    pub download_dir: String,
    /// Directory where job records are persisted
    pub jobs_dir: String,
    /// Maximum number of extractions running at once
    pub max_concurrent_clips: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();

        Self {
            addr: env::var("ADDR").unwrap_or_else(|_| String::from("127.0.0.1")),
            port: env::var("PORT").unwrap_or_else(|_| String::from("3000")),
            download_dir: env::var("DOWNLOAD_DIR").unwrap_or_else(|_| String::from("downloads")),
            jobs_dir: env::var("JOBS_DIR").unwrap_or_else(|_| String::from("jobs")),
            max_concurrent_clips: env::var("MAX_CONCURRENT_CLIPS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(MAX_CONCURRENT_CLIPS),
        }
    }
}
