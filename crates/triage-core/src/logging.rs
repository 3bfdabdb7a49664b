//! Structured logging schema and field name constants for triage.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation tools can query by the same field names across the
//! decoder, uploader, publisher and HTTP layer.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Pipeline failure returned to the submitter |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events (startup), uploads and created issues |
//! | DEBUG | Decision points, resolved content types, config choices |
//! | TRACE | Per-part decoder events |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID propagated from the `x-request-id` header.
/// Format: UUIDv7 (time-ordered).
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event.
/// Values: "api", "storage", "github"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "multipart", "pipeline", "uploader", "opendal", "issues"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "decode", "upload", "create_issue"
pub const OPERATION: &str = "op";

/// Pipeline stage in which an event happened.
/// Values: "received", "decoding", "uploading", "assembling", "publishing", "done"
pub const STAGE: &str = "stage";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Multipart field name of a part.
pub const FIELD: &str = "field";

/// Sanitized filename of an attachment.
pub const FILENAME: &str = "filename";

/// MIME type declared by the client or resolved for storage.
pub const MIME_TYPE: &str = "mime_type";

/// Object key an attachment is stored under.
pub const STORAGE_KEY: &str = "storage_key";

/// URL of a created issue.
pub const ISSUE_URL: &str = "issue_url";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Byte length of an attachment payload.
pub const SIZE_BYTES: &str = "size_bytes";

/// Number of decoded text fields.
pub const FIELD_COUNT: &str = "field_count";

/// Number of decoded file attachments.
pub const ATTACHMENT_COUNT: &str = "attachment_count";

/// Zero-based position of an attachment in arrival order.
pub const ATTACHMENT_INDEX: &str = "attachment_index";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

/// Error kind label (see `Error::kind`).
pub const ERROR_KIND: &str = "error_kind";
