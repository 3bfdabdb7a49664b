//! Attachment uploader: storage key generation, content-type resolution and
//! a single bounded upload attempt per attachment.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use triage_core::{
    logging, resolve_content_type, Attachment, Error, ObjectStore, Result, UploadedAsset,
};
use uuid::Uuid;

/// Uploads decoded attachments to an [`ObjectStore`].
#[derive(Clone)]
pub struct AttachmentUploader {
    store: Arc<dyn ObjectStore>,
    key_prefix: String,
    timeout: Duration,
}

impl AttachmentUploader {
    pub fn new(store: Arc<dyn ObjectStore>, key_prefix: impl Into<String>, timeout: Duration) -> Self {
        Self {
            store,
            key_prefix: key_prefix.into(),
            timeout,
        }
    }

    /// Upload one attachment and return its public URL.
    ///
    /// No retry. A timeout or backend rejection is an upload error; objects
    /// stored by earlier calls are left in place.
    pub async fn upload(&self, attachment: Attachment) -> Result<UploadedAsset> {
        let key = storage_key(&self.key_prefix, &attachment.filename);
        let content_type =
            resolve_content_type(attachment.declared_mime_type.as_deref(), &attachment.filename);

        info!(
            { logging::SUBSYSTEM } = "storage",
            { logging::COMPONENT } = "uploader",
            { logging::OPERATION } = "upload",
            { logging::STORAGE_KEY } = %key,
            { logging::MIME_TYPE } = %content_type,
            { logging::SIZE_BYTES } = attachment.data.len(),
            backend = self.store.backend_name(),
            "Uploading attachment"
        );

        let url = tokio::time::timeout(
            self.timeout,
            self.store.put_object(&key, attachment.data, &content_type),
        )
        .await
        .map_err(|_| {
            Error::Upload(format!(
                "upload of {} timed out after {}s",
                attachment.filename,
                self.timeout.as_secs()
            ))
        })??;

        Ok(UploadedAsset {
            filename: attachment.filename,
            url,
        })
    }
}

/// Build a collision-free object key: `<prefix>/<uuidv7>-<filename>`.
///
/// The UUIDv7 leads with a millisecond timestamp and carries random bits, so
/// identically named files uploaded in the same tick still get distinct keys.
pub fn storage_key(prefix: &str, sanitized_filename: &str) -> String {
    let prefix = prefix.trim_matches('/');
    let id = Uuid::now_v7();
    if prefix.is_empty() {
        format!("{}-{}", id, sanitized_filename)
    } else {
        format!("{}/{}-{}", prefix, id, sanitized_filename)
    }
}
