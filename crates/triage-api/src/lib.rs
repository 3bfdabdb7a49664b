//! # triage-api
//!
//! HTTP intake for tool and bug reports. A `multipart/form-data` POST is
//! decoded, its screenshots are stored, and a formatted issue is filed.
//!
//! The router is exposed as a library so integration tests can serve it with
//! substitute backends.

pub mod config;
pub mod error;
pub mod handlers;
pub mod multipart;
pub mod pipeline;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use triage_core::defaults::CORS_MAX_AGE_SECS;
use uuid::Uuid;

pub use config::ServerConfig;
pub use error::ApiError;
pub use pipeline::{PipelineStage, ReportPipeline};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ReportPipeline>,
}

impl AppState {
    pub fn new(pipeline: ReportPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

/// Build the application router.
pub fn router(state: AppState, config: &ServerConfig) -> Router {
    let report = post(handlers::report::submit_report)
        .options(handlers::report::preflight)
        .fallback(handlers::report::method_not_allowed)
        // Multipart reads past this limit fail decoding.
        .layer(DefaultBodyLimit::max(config.max_body_size_bytes));

    let mut app = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(&config.report_path, report)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TraceLayer::new_for_http()),
        );

    if !config.allowed_origins.is_empty() {
        app = app.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(config.allowed_origins.clone()))
                .allow_methods([Method::POST, Method::OPTIONS])
                .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
                .max_age(Duration::from_secs(CORS_MAX_AGE_SECS)),
        );
    }

    app.layer(RequestBodyLimitLayer::new(config.max_body_size_bytes))
        .with_state(state)
}
