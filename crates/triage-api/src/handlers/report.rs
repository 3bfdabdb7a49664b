//! Report submission endpoint.

use axum::{
    extract::{
        multipart::{Multipart, MultipartRejection},
        State,
    },
    http::StatusCode,
    Extension, Json,
};
use tower_http::request_id::RequestId;
use serde::Serialize;

use crate::{error::ApiError, AppState};

/// Body of a successful submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub success: bool,
    pub issue_url: String,
}

/// Submit a report.
///
/// Accepts `multipart/form-data`. Text fields describe the report; every part
/// with a filename is treated as a screenshot, whatever its field name.
///
/// # Returns
/// - 200 OK with `{"success": true, "issueUrl": ...}`
/// - 500 Internal Server Error with `{"success": false, "error": ...}` on any
///   decode, upload or publish failure
pub async fn submit_report(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ReportResponse>, ApiError> {
    let request_id = request_id
        .and_then(|Extension(id)| id.header_value().to_str().ok().map(str::to_string));
    let issue = state.pipeline.run(request_id.as_deref(), multipart).await?;
    Ok(Json(ReportResponse {
        success: true,
        issue_url: issue.url,
    }))
}

/// Bare `OPTIONS` request. Preflights from allowed origins are answered by
/// the CORS layer before reaching this handler.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
