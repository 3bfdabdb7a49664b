//! Data types flowing through the report pipeline.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::file_safety::sanitize_filename;

/// Form field names consumed by the report assembler.
///
/// Any other submitted field is kept in [`FormFields`] but ignored.
pub mod fields {
    pub const NAME: &str = "name";
    pub const EMPLOYMENT: &str = "employment";
    pub const PC_NUMBER: &str = "pc_number";
    pub const DEPARTMENT: &str = "department";
    pub const TOOL: &str = "tool";
    pub const TOOL_CUSTOM: &str = "tool_custom";
    pub const SUBTOOL: &str = "subtool";
    pub const TYPE: &str = "type";
    pub const SUMMARY: &str = "summary";
    pub const DETAILS: &str = "details";
    pub const EXTRA: &str = "extra";
    pub const CONTACT: &str = "contact";
}

/// Text fields of a submitted form.
///
/// Inserting a name that already exists replaces the earlier value, so the
/// last occurrence of a duplicated field wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    values: HashMap<String, String>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a field value, returning the value it replaced, if any.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.insert(name.into(), value.into())
    }

    /// Raw value as submitted, including empty strings.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Value if submitted and non-empty.
    pub fn non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = FormFields::new();
        for (name, value) in iter {
            form.insert(name, value);
        }
        form
    }
}

/// A decoded file part.
///
/// The sanitized `filename` is computed on construction and is the only
/// filename used downstream (storage key and markdown alt-text).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Multipart field name the file arrived under.
    pub field: String,
    /// Filename as declared by the client. Untrusted, kept for logging only.
    pub raw_filename: Option<String>,
    /// Sanitized filename, always matching `^[a-z0-9._-]+$`.
    pub filename: String,
    /// File contents.
    pub data: Vec<u8>,
    /// MIME type declared in the part headers.
    pub declared_mime_type: Option<String>,
}

impl Attachment {
    pub fn new(
        field: impl Into<String>,
        raw_filename: Option<String>,
        data: Vec<u8>,
        declared_mime_type: Option<String>,
    ) -> Self {
        let filename = sanitize_filename(raw_filename.as_deref());
        Self {
            field: field.into(),
            raw_filename,
            filename,
            data,
            declared_mime_type,
        }
    }
}

/// Result of decoding a multipart submission.
#[derive(Debug, Clone, Default)]
pub struct DecodedForm {
    pub fields: FormFields,
    /// Attachments in arrival order.
    pub attachments: Vec<Attachment>,
}

/// An attachment after it has been stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedAsset {
    pub filename: String,
    /// Publicly fetchable URL of the stored object.
    pub url: String,
}

/// Issue to be created in the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRequest {
    pub title: String,
    /// Markdown body.
    pub body: String,
    /// Deduplicated, never empty, always contains the sentinel label.
    pub labels: Vec<String>,
}

/// A created issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueResult {
    pub url: String,
}
