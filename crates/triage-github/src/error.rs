//! GitHub-specific error classification.

use triage_core::Error;

/// Failure classes of the create-issue endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueErrorCode {
    /// Missing, expired or under-privileged token.
    AuthenticationError,
    /// Repository does not exist or is invisible to the token.
    RepositoryNotFound,
    /// Issues are disabled for the repository.
    IssuesDisabled,
    /// Payload rejected (e.g. an invalid label).
    ValidationFailed,
    /// Primary or secondary rate limit hit.
    RateLimited,
    /// Server error.
    ServerError,
    /// Any other non-success status.
    Unknown,
}

impl IssueErrorCode {
    /// Determine error code from the HTTP status.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => Self::AuthenticationError,
            404 => Self::RepositoryNotFound,
            410 => Self::IssuesDisabled,
            422 => Self::ValidationFailed,
            429 => Self::RateLimited,
            500..=599 => Self::ServerError,
            _ => Self::Unknown,
        }
    }
}

/// Convert a rejected create-issue call into a publish error.
pub fn to_publish_error(code: IssueErrorCode, status: u16, message: &str) -> Error {
    let reason = match code {
        IssueErrorCode::AuthenticationError => "authentication failed",
        IssueErrorCode::RepositoryNotFound => "repository not found",
        IssueErrorCode::IssuesDisabled => "issues are disabled",
        IssueErrorCode::ValidationFailed => "validation failed",
        IssueErrorCode::RateLimited => "rate limited",
        IssueErrorCode::ServerError => "server error",
        IssueErrorCode::Unknown => "unexpected status",
    };
    if message.is_empty() {
        Error::Publish(format!("GitHub {} ({})", reason, status))
    } else {
        Error::Publish(format!("GitHub {} ({}): {}", reason, status, message))
    }
}
