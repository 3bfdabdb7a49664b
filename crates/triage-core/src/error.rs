//! Error types for triage.

use thiserror::Error;

/// Result type alias using triage's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the report pipeline.
///
/// Each variant is one failure kind; the payload carries the message of the
/// underlying external error as context.
#[derive(Error, Debug)]
pub enum Error {
    /// The request body could not be decoded as multipart form data
    #[error("Decode error: {0}")]
    Decode(String),

    /// The storage backend rejected or failed an upload
    #[error("Upload error: {0}")]
    Upload(String),

    /// The issue tracker rejected the issue or returned an unusable response
    #[error("Publish error: {0}")]
    Publish(String),

    /// Required external configuration is missing or invalid
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Stable label for the error kind, used as a structured logging field.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Decode(_) => "decode",
            Error::Upload(_) => "upload",
            Error::Publish(_) => "publish",
            Error::Config(_) => "config",
        }
    }
}
