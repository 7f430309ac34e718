//! Clipd server binary.
//!
//! Wires up:
//! - Outbound adapters (yt-dlp provider, ffmpeg cutter, filesystem job store)
//! - Application services (segment extractor, job dispatcher)
//! - Inbound HTTP adapter (submit / poll / download)

use clipd::adapters::ffmpeg::FfmpegCutter;
use clipd::adapters::fs_jobs::FsJobStore;
use clipd::adapters::http::{router, AppState};
use clipd::adapters::ytdlp::YtDlpProvider;
use clipd::application::dispatch::JobDispatcher;
use clipd::application::extractor::SegmentExtractor;
use clipd::config::Config;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

#[tokio::main]
async fn main() {
    let config = Config::from_env();

    tracing_subscriber::fmt::init();

    // 1. Directories
    for dir in [&config.download_dir, &config.jobs_dir] {
        if let Err(e) = tokio::fs::create_dir_all(dir).await {
            eprintln!("Failed to create directory {}: {:?}", dir, e);
            std::process::exit(1);
        }
    }

    // 2. Outbound adapters
    let cutter = FfmpegCutter::new();
    if let Err(e) = cutter.check().await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
    let provider = YtDlpProvider::new();
    let job_store = FsJobStore::new(&config.jobs_dir);

    // 3. Application services
    let extractor = SegmentExtractor::new(provider, cutter, &config.download_dir);
    let dispatcher = Arc::new(JobDispatcher::new(
        extractor,
        job_store,
        config.max_concurrent_clips,
    ));

    // 4. HTTP layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let state = AppState {
        dispatcher,
        download_dir: PathBuf::from(&config.download_dir),
    };
    let app = router(state).layer(cors);

    // 5. Start server
    let listener = tokio::net::TcpListener::bind(format!("{}:{}", config.addr, config.port))
        .await
        .expect("Failed to bind TCP listener");
    println!("Listening at {}:{}", config.addr, config.port);
    axum::serve(listener, app)
        .await
        .expect("Server failed to start");
}
