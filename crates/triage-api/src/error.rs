//! HTTP error mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Errors surfaced by the report endpoint.
#[derive(Debug)]
pub enum ApiError {
    /// Any failure inside the report pipeline.
    Pipeline(triage_core::Error),
    MethodNotAllowed,
}

impl From<triage_core::Error> for ApiError {
    fn from(err: triage_core::Error) -> Self {
        ApiError::Pipeline(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            // Only the message text reaches the submitter.
            ApiError::Pipeline(err) => {
                let body = Json(serde_json::json!({
                    "success": false,
                    "error": err.to_string(),
                }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
            ApiError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn test_pipeline_error_is_500_json() {
        let response =
            ApiError::from(triage_core::Error::Upload("AccessDenied".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "Upload error: AccessDenied");
    }

    #[tokio::test]
    async fn test_method_not_allowed_is_plain_text() {
        let response = ApiError::MethodNotAllowed.into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"Method not allowed");
    }
}
