//! Report assembly: turns submitted form fields and stored screenshots into
//! the issue title, markdown body and label set.
//!
//! Assembly is pure and total. Missing optional fields drop their template
//! line; missing required fields render as [`MISSING_VALUE`].

use crate::defaults::{BODY_TRAILER, MISSING_VALUE, NO_SUMMARY, SENTINEL_LABEL, TOOL_OTHER};
use crate::models::{fields, FormFields, IssueRequest, UploadedAsset};

/// Build the issue for a submission.
///
/// `assets` must be in attachment arrival order; images are rendered in that
/// order.
pub fn assemble(form: &FormFields, assets: &[UploadedAsset]) -> IssueRequest {
    IssueRequest {
        title: build_title(form),
        body: build_body(form, assets),
        labels: build_labels(form),
    }
}

/// Resolve the tool name, applying the "Other + custom text" override.
///
/// Returns the raw `tool` value (possibly empty) unless `tool` is exactly
/// `Other` and `tool_custom` is non-empty.
pub fn effective_tool(form: &FormFields) -> Option<&str> {
    let tool = form.get(fields::TOOL);
    if tool == Some(TOOL_OTHER) {
        if let Some(custom) = form.non_empty(fields::TOOL_CUSTOM) {
            return Some(custom);
        }
    }
    tool
}

/// `[<type>] <summary>`, with a fixed fallback for an empty summary.
pub fn build_title(form: &FormFields) -> String {
    format!(
        "[{}] {}",
        form.non_empty(fields::TYPE).unwrap_or(MISSING_VALUE),
        form.non_empty(fields::SUMMARY).unwrap_or(NO_SUMMARY)
    )
}

/// Render the markdown body.
pub fn build_body(form: &FormFields, assets: &[UploadedAsset]) -> String {
    let value = |name: &str| form.non_empty(name).unwrap_or(MISSING_VALUE);

    let subtool_line = form
        .non_empty(fields::SUBTOOL)
        .map(|s| format!("**Sub-tool:** {}", s))
        .unwrap_or_default();
    let contact_line = form
        .non_empty(fields::CONTACT)
        .map(|c| format!("**Contact:** {}\n", c))
        .unwrap_or_default();
    let extra_block = form
        .non_empty(fields::EXTRA)
        .map(|e| format!("\n**Steps/Motivation:**\n{}", e))
        .unwrap_or_default();

    let mut images_block = String::new();
    if !assets.is_empty() {
        images_block.push_str("\n**Images:**\n");
        for asset in assets {
            images_block.push_str(&format!("![{}]({})\n", asset.filename, asset.url));
        }
    }

    let lines = [
        format!("**Name:** {}", value(fields::NAME)),
        format!("**In-house/Outsource:** {}", value(fields::EMPLOYMENT)),
        format!("**PC Number:** {}", value(fields::PC_NUMBER)),
        format!("**Department:** {}", value(fields::DEPARTMENT)),
        format!(
            "**Tool:** {}",
            effective_tool(form)
                .filter(|t| !t.trim().is_empty())
                .unwrap_or(MISSING_VALUE)
        ),
        subtool_line,
        contact_line,
        format!("**Details:**\n{}", value(fields::DETAILS)),
        extra_block,
        images_block,
        BODY_TRAILER.to_string(),
    ];

    lines.join("\n").trim().to_string()
}

/// Derive labels from type, effective tool and department, plus the sentinel.
///
/// Labels are lower-cased (the tracker matches label names
/// case-insensitively), blank candidates are dropped and duplicates keep
/// their first position.
pub fn build_labels(form: &FormFields) -> Vec<String> {
    let candidates = [
        form.get(fields::TYPE),
        effective_tool(form),
        form.get(fields::DEPARTMENT),
        Some(SENTINEL_LABEL),
    ];

    let mut labels: Vec<String> = Vec::with_capacity(candidates.len());
    for candidate in candidates.into_iter().flatten() {
        let label = candidate.trim().to_lowercase();
        if label.is_empty() || labels.contains(&label) {
            continue;
        }
        labels.push(label);
    }
    labels
}
