//! Filename sanitization and content-type resolution for uploaded screenshots.
//!
//! The sanitized filename is derived exactly once, when a file part is
//! decoded, and is then reused for both the storage key and the markdown
//! alt-text. Nothing downstream goes back to the raw client filename.

use crate::defaults::{FALLBACK_CONTENT_TYPE, FALLBACK_FILENAME, MAX_FILENAME_LEN};

/// Sanitize an untrusted client filename into a safe, deterministic token.
///
/// - strips everything up to the last `/` or `\`
/// - collapses whitespace runs into a single `_`
/// - drops every character outside `[A-Za-z0-9._-]`
/// - collapses consecutive dots into one
/// - lower-cases the result
/// - truncates to [`MAX_FILENAME_LEN`] bytes, keeping the extension
///
/// Absent input, empty input, and input that sanitizes to nothing all yield
/// [`FALLBACK_FILENAME`]. The output always matches `^[a-z0-9._-]+$`.
pub fn sanitize_filename(raw: Option<&str>) -> String {
    let raw = match raw {
        Some(r) if !r.is_empty() => r,
        _ => return FALLBACK_FILENAME.to_string(),
    };

    // Remove path components
    let name = raw.rsplit(['/', '\\']).next().unwrap_or(raw);

    let mut sanitized = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                sanitized.push('_');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;

        match c {
            '.' => {
                if !sanitized.ends_with('.') {
                    sanitized.push('.');
                }
            }
            '_' | '-' => sanitized.push(c),
            c if c.is_ascii_alphanumeric() => sanitized.push(c.to_ascii_lowercase()),
            _ => {}
        }
    }

    if sanitized.is_empty() {
        return FALLBACK_FILENAME.to_string();
    }

    // Output is ASCII, so byte offsets are char boundaries.
    if sanitized.len() > MAX_FILENAME_LEN {
        if let Some(dot_pos) = sanitized.rfind('.') {
            let ext = &sanitized[dot_pos..];
            if ext.len() < MAX_FILENAME_LEN {
                let name = &sanitized[..MAX_FILENAME_LEN - ext.len()];
                return format!("{}{}", name, ext);
            }
        }
        sanitized.truncate(MAX_FILENAME_LEN);
    }
    sanitized
}

/// Resolve the content type stored with an uploaded asset.
///
/// A client-declared type is trusted only when it is an `image/*` type;
/// anything else is ignored and the type is inferred from the sanitized
/// filename's extension, falling back to `application/octet-stream`.
pub fn resolve_content_type(declared: Option<&str>, sanitized_filename: &str) -> String {
    if let Some(declared) = declared {
        if declared.starts_with("image/") {
            return declared.to_string();
        }
    }

    image_type_from_extension(sanitized_filename)
        .unwrap_or(FALLBACK_CONTENT_TYPE)
        .to_string()
}

/// Map the image extensions screenshots arrive with to MIME types.
fn image_type_from_extension(filename: &str) -> Option<&'static str> {
    let (_, ext) = filename.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_safe_token(s: &str) -> bool {
        !s.is_empty()
            && s.chars().all(|c| {
                c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '_' | '-')
            })
            && !s.contains("..")
    }

    #[test]
    fn test_sanitize_absent_or_empty_uses_fallback() {
        assert_eq!(sanitize_filename(None), "upload.bin");
        assert_eq!(sanitize_filename(Some("")), "upload.bin");
    }

    #[test]
    fn test_sanitize_removes_path() {
        assert_eq!(sanitize_filename(Some("/etc/passwd")), "passwd");
        assert_eq!(
            sanitize_filename(Some("C:\\Users\\jane\\Desktop\\shot.png")),
            "shot.png"
        );
        assert_eq!(sanitize_filename(Some("a/b\\c/d.png")), "d.png");
    }

    #[test]
    fn test_sanitize_trailing_separator_uses_fallback() {
        assert_eq!(sanitize_filename(Some("screenshots/")), "upload.bin");
    }

    #[test]
    fn test_sanitize_spaces_to_underscore() {
        assert_eq!(sanitize_filename(Some("My Photo.PNG")), "my_photo.png");
        assert_eq!(sanitize_filename(Some("a \t\n b.jpg")), "a_b.jpg");
    }

    #[test]
    fn test_sanitize_drops_unsafe_chars() {
        assert_eq!(sanitize_filename(Some("shot(1)!.png")), "shot1.png");
        assert_eq!(sanitize_filename(Some("café<script>.gif")), "cafscript.gif");
        assert_eq!(sanitize_filename(Some("![x](y).png")), "xy.png");
    }

    #[test]
    fn test_sanitize_collapses_dots() {
        assert_eq!(sanitize_filename(Some("..hidden...png")), ".hidden.png");
        assert_eq!(sanitize_filename(Some("a.é.b")), "a.b");
        assert_eq!(sanitize_filename(Some("../../secret")), "secret");
    }

    #[test]
    fn test_sanitize_nothing_left_uses_fallback() {
        assert_eq!(sanitize_filename(Some("???")), "upload.bin");
        assert_eq!(sanitize_filename(Some("日本語")), "upload.bin");
    }

    #[test]
    fn test_sanitize_caps_length_keeping_extension() {
        let raw = format!("{}.PNG", "a".repeat(4000));
        let name = sanitize_filename(Some(&raw));
        assert_eq!(name.len(), MAX_FILENAME_LEN);
        assert!(name.ends_with("a.png"));
        assert_eq!(resolve_content_type(None, &name), "image/png");
    }

    #[test]
    fn test_sanitize_caps_length_without_extension() {
        let name = sanitize_filename(Some(&"b".repeat(300)));
        assert_eq!(name, "b".repeat(MAX_FILENAME_LEN));

        let dotted = sanitize_filename(Some(&format!(".{}", "c".repeat(300))));
        assert_eq!(dotted.len(), MAX_FILENAME_LEN);
    }

    #[test]
    fn test_sanitize_is_deterministic() {
        let raw = Some("Bug Report (final).JPEG");
        assert_eq!(sanitize_filename(raw), sanitize_filename(raw));
        assert_eq!(sanitize_filename(raw), "bug_report_final.jpeg");
    }

    #[test]
    fn test_sanitize_output_never_contains_separators() {
        for raw in [
            "dir/file.png",
            "dir\\file.png",
            "/",
            "\\\\server\\share\\x.png",
            "a/ b /c .png",
            "..\\..\\windows\\system32",
        ] {
            let out = sanitize_filename(Some(raw));
            assert!(!out.contains('/') && !out.contains('\\'), "{raw:?} -> {out:?}");
        }
    }

    #[test]
    fn test_sanitize_output_is_always_safe_token() {
        for raw in [
            "",
            " ",
            ".",
            "....",
            "My Photo.PNG",
            "..\u{0}..png",
            "emoji 😀 shot.png",
            "tab\tname.JPG",
            "UPPER-case_Mix.WebP",
            "%2e%2e%2fetc",
            "a . . b",
        ] {
            let out = sanitize_filename(Some(raw));
            assert!(is_safe_token(&out), "{raw:?} -> {out:?}");
        }
    }

    #[test]
    fn test_resolve_infers_png_without_declared() {
        assert_eq!(resolve_content_type(None, "photo.png"), "image/png");
    }

    #[test]
    fn test_resolve_ignores_non_image_declared() {
        assert_eq!(resolve_content_type(Some("text/plain"), "photo.png"), "image/png");
        assert_eq!(
            resolve_content_type(Some("text/html"), "page.html"),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_resolve_trusts_declared_image_type() {
        assert_eq!(resolve_content_type(Some("image/bmp"), "photo.xyz"), "image/bmp");
        assert_eq!(resolve_content_type(Some("image/png"), "photo.jpg"), "image/png");
    }

    #[test]
    fn test_resolve_extension_table() {
        assert_eq!(resolve_content_type(None, "a.jpg"), "image/jpeg");
        assert_eq!(resolve_content_type(None, "a.jpeg"), "image/jpeg");
        assert_eq!(resolve_content_type(None, "a.gif"), "image/gif");
        assert_eq!(resolve_content_type(None, "a.webp"), "image/webp");
    }

    #[test]
    fn test_resolve_unknown_extension_is_octet_stream() {
        assert_eq!(resolve_content_type(None, "upload.bin"), "application/octet-stream");
        assert_eq!(resolve_content_type(None, "png"), "application/octet-stream");
        assert_eq!(resolve_content_type(Some(""), "notes"), "application/octet-stream");
    }
}
