//! Core traits for triage's external collaborators.
//!
//! The pipeline only sees these traits, so storage and tracker backends are
//! injected at construction and can be replaced with test doubles.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{IssueRequest, IssueResult};

// =============================================================================
// OBJECT STORAGE
// =============================================================================

/// Object storage that hands back a public URL for every stored object.
///
/// Implementations never set per-object access overrides; public readability
/// is the bucket policy's concern.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `data` under `key` with the given content type and return the
    /// object's publicly retrievable URL.
    async fn put_object(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<String>;

    /// Human-readable backend name for logs.
    fn backend_name(&self) -> &str;
}

// =============================================================================
// ISSUE TRACKER
// =============================================================================

/// Issue tracker able to create one issue per call.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Create an issue. Attempted exactly once; no retry.
    async fn create_issue(&self, request: &IssueRequest) -> Result<IssueResult>;

    /// Human-readable tracker location (e.g. `owner/repo`) for logs.
    fn target(&self) -> String;
}
