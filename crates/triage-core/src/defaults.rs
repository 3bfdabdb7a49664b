//! Centralized default constants for the triage system.
//!
//! **This module is the single source of truth** for shared default values
//! and environment variable names. Crates reference these constants instead
//! of defining their own literals.

// =============================================================================
// REPORT
// =============================================================================

/// Label always applied to issues created from the external form.
pub const SENTINEL_LABEL: &str = "external-report";

/// Issue title suffix used when the submitter leaves the summary empty.
pub const NO_SUMMARY: &str = "No summary";

/// Text rendered in place of a required form value that was not submitted.
pub const MISSING_VALUE: &str = "(not provided)";

/// Tool selection value that defers to the free-text `tool_custom` field.
pub const TOOL_OTHER: &str = "Other";

/// Trailer line closing every issue body.
pub const BODY_TRAILER: &str = "_Submitted via external form_";

// =============================================================================
// UPLOADS
// =============================================================================

/// Longest sanitized filename kept, extension included.
pub const MAX_FILENAME_LEN: usize = 255;

/// Filename used when the client declares none, or sanitization leaves nothing.
pub const FALLBACK_FILENAME: &str = "upload.bin";

/// Content type for uploads whose type cannot be resolved.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Object key prefix for uploaded screenshots.
pub const STORAGE_KEY_PREFIX: &str = "uploads";

/// Timeout for a single object upload in seconds.
pub const UPLOAD_TIMEOUT_SECS: u64 = 30;

/// Number of uploads in flight per request (1 = sequential).
pub const UPLOAD_CONCURRENCY: usize = 1;

// =============================================================================
// ISSUE TRACKER
// =============================================================================

/// Default GitHub REST API base URL.
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// GitHub REST API version sent with every request.
pub const GITHUB_API_VERSION: &str = "2022-11-28";

/// Timeout for the create-issue request in seconds.
pub const GITHUB_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP bind host.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 3000;

/// Default route accepting report submissions.
pub const REPORT_PATH: &str = "/api/report";

/// Maximum request body size in bytes (25 MB of screenshots per report).
pub const MAX_BODY_SIZE_BYTES: usize = 25 * 1024 * 1024;

/// Deadline for one report request, body streaming included, in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 120;

/// Default CORS max-age in seconds (1 hour).
pub const CORS_MAX_AGE_SECS: u64 = 3600;

// =============================================================================
// ENVIRONMENT VARIABLES
// =============================================================================

pub const ENV_S3_BUCKET_NAME: &str = "S3_BUCKET_NAME";
pub const ENV_AWS_REGION: &str = "AWS_REGION";
pub const ENV_AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const ENV_AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
/// Custom endpoint for S3-compatible providers (R2, MinIO, Spaces).
pub const ENV_S3_ENDPOINT: &str = "S3_ENDPOINT";
/// Base URL under which stored objects are publicly readable.
pub const ENV_S3_PUBLIC_BASE_URL: &str = "S3_PUBLIC_BASE_URL";
pub const ENV_S3_KEY_PREFIX: &str = "S3_KEY_PREFIX";
pub const ENV_UPLOAD_TIMEOUT_SECS: &str = "UPLOAD_TIMEOUT_SECS";
pub const ENV_UPLOAD_CONCURRENCY: &str = "UPLOAD_CONCURRENCY";

pub const ENV_GITHUB_OWNER: &str = "GITHUB_OWNER";
pub const ENV_GITHUB_REPO: &str = "GITHUB_REPO";
pub const ENV_GITHUB_TOKEN: &str = "GITHUB_TOKEN";
pub const ENV_GITHUB_API_URL: &str = "GITHUB_API_URL";
pub const ENV_GITHUB_TIMEOUT_SECS: &str = "GITHUB_TIMEOUT_SECS";

pub const ENV_HOST: &str = "HOST";
pub const ENV_PORT: &str = "PORT";
pub const ENV_MAX_BODY_SIZE_BYTES: &str = "MAX_BODY_SIZE_BYTES";
pub const ENV_ALLOWED_ORIGINS: &str = "ALLOWED_ORIGINS";
pub const ENV_REPORT_PATH: &str = "REPORT_PATH";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_filename_is_sanitizer_safe() {
        assert!(FALLBACK_FILENAME
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '_' | '-')));
    }

    #[test]
    fn test_report_path_is_absolute() {
        assert!(REPORT_PATH.starts_with('/'));
    }

    #[test]
    fn test_request_timeout_outlasts_backend_timeouts() {
        assert!(REQUEST_TIMEOUT_SECS > UPLOAD_TIMEOUT_SECS + GITHUB_TIMEOUT_SECS);
    }

    #[test]
    fn test_sequential_uploads_by_default() {
        assert_eq!(UPLOAD_CONCURRENCY, 1);
    }
}
