//! triage-api - report intake server

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use triage_api::{router, AppState, ReportPipeline, ServerConfig};
use triage_github::GitHubClient;
use triage_storage::{AttachmentUploader, OpendalStore, S3Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with configurable output
    //
    // Environment variables:
    //   LOG_FORMAT  - "json" or "text" (default: "text")
    //   LOG_FILE    - path to log file (optional, enables file logging)
    //   LOG_ANSI    - "true"/"false" override ANSI colors (auto-detected by default)
    //   RUST_LOG    - standard env filter (default: "triage_api=debug,tower_http=debug")
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "triage_api=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    // Optionally create a file appender with daily rotation
    let _file_guard = if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("triage-api.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(log_ansi.unwrap_or(false)); // no ANSI in files by default
            registry.with(layer).init();
        }
        Some(guard)
    } else {
        if log_format == "json" {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer();
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            }
            registry.with(layer).init();
        }
        None
    };

    info!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stdout)"),
        "Logging initialized"
    );

    // All configuration is loaded before binding so a missing variable aborts
    // startup before any request is accepted.
    let server_config = ServerConfig::from_env()?;
    let s3_config = S3Config::from_env()?;
    info!(?s3_config, "Storage configured");

    let store = OpendalStore::s3(&s3_config)?;
    let uploader = AttachmentUploader::new(
        Arc::new(store),
        s3_config.key_prefix.clone(),
        Duration::from_secs(s3_config.upload_timeout_secs),
    );
    let tracker = GitHubClient::from_env()?;
    info!(config = ?tracker.config(), "Issue tracker configured");

    let pipeline = ReportPipeline::new(
        uploader,
        Arc::new(tracker),
        server_config.upload_concurrency,
        server_config.request_timeout(),
    );
    info!(
        target_repo = %pipeline.tracker_target(),
        upload_concurrency = server_config.upload_concurrency,
        request_timeout_secs = server_config.request_timeout_secs,
        max_body_size_bytes = server_config.max_body_size_bytes,
        cors_origins = server_config.allowed_origins.len(),
        "Report pipeline ready"
    );

    let app = router(AppState::new(pipeline), &server_config);

    // Start server
    let addr: SocketAddr = server_config.bind_address().parse()?;
    info!("Starting server on {} (report path {})", addr, server_config.report_path);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
