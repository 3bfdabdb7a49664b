//! Multipart decoder.
//!
//! Drains a `multipart/form-data` body into a [`DecodedForm`]: text parts
//! become form fields (last value wins), parts carrying a `filename`
//! parameter become attachments in arrival order. Files are buffered fully in
//! memory; the body size is bounded by the HTTP layer.

use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use tracing::{debug, info, trace};
use triage_core::{logging, Attachment, DecodedForm, Error, Result};

/// Decode every part of the request.
pub async fn decode(mut multipart: Multipart) -> Result<DecodedForm> {
    let mut form = DecodedForm::default();

    while let Some(field) = multipart.next_field().await.map_err(stream_error)? {
        let name = field.name().unwrap_or_default().to_string();

        match field.file_name().map(str::to_string) {
            Some(raw_filename) => {
                let declared = field.content_type().map(str::to_string);
                let data = field.bytes().await.map_err(stream_error)?.to_vec();

                // Browsers send an empty, unnamed part for a file input left blank.
                if raw_filename.is_empty() && data.is_empty() {
                    debug!(field = %name, "Skipping empty file part");
                    continue;
                }

                let attachment = Attachment::new(name, Some(raw_filename), data, declared);
                info!(
                    { logging::FIELD } = %attachment.field,
                    { logging::FILENAME } = %attachment.filename,
                    { logging::MIME_TYPE } = attachment.declared_mime_type.as_deref().unwrap_or(""),
                    { logging::SIZE_BYTES } = attachment.data.len(),
                    "Received file"
                );
                debug!(
                    { logging::FIELD } = %attachment.field,
                    raw_filename = ?attachment.raw_filename,
                    "Client filename"
                );
                form.attachments.push(attachment);
            }
            None => {
                let value = field.text().await.map_err(stream_error)?;
                if form.fields.insert(name.clone(), value).is_some() {
                    trace!(field = %name, "Duplicate field, keeping last value");
                }
            }
        }
    }

    info!(
        { logging::FIELD_COUNT } = form.fields.len(),
        { logging::ATTACHMENT_COUNT } = form.attachments.len(),
        "Form decoded"
    );
    Ok(form)
}

/// Extractor rejection, e.g. a missing boundary in `Content-Type`.
pub fn rejection_error(rejection: MultipartRejection) -> Error {
    Error::Decode(rejection.body_text())
}

fn stream_error(e: MultipartError) -> Error {
    Error::Decode(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::Request;

    const BOUNDARY: &str = "X-TRIAGE-BOUNDARY";

    fn text_part(name: &str, value: &str) -> String {
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        )
    }

    fn file_part(name: &str, filename: &str, content_type: &str, data: &str) -> String {
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\nContent-Type: {content_type}\r\n\r\n{data}\r\n"
        )
    }

    async fn multipart_of(parts: &[String]) -> Multipart {
        let body = format!("{}--{BOUNDARY}--\r\n", parts.concat());
        let request = Request::builder()
            .method("POST")
            .uri("/api/report")
            .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
            .body(Body::from(body))
            .unwrap();
        Multipart::from_request(request, &()).await.unwrap()
    }

    #[tokio::test]
    async fn test_decode_fields_and_files() {
        let multipart = multipart_of(&[
            text_part("name", "Jane"),
            file_part("images", "My Photo.PNG", "image/png", "png-bytes"),
            text_part("type", "Bug"),
        ])
        .await;

        let form = decode(multipart).await.unwrap();
        assert_eq!(form.fields.get("name"), Some("Jane"));
        assert_eq!(form.fields.get("type"), Some("Bug"));
        assert_eq!(form.attachments.len(), 1);

        let attachment = &form.attachments[0];
        assert_eq!(attachment.field, "images");
        assert_eq!(attachment.raw_filename.as_deref(), Some("My Photo.PNG"));
        assert_eq!(attachment.filename, "my_photo.png");
        assert_eq!(attachment.data, b"png-bytes".to_vec());
        assert_eq!(attachment.declared_mime_type.as_deref(), Some("image/png"));
    }

    #[tokio::test]
    async fn test_decode_last_duplicate_field_wins() {
        let multipart = multipart_of(&[text_part("summary", "first"), text_part("summary", "second")]).await;
        let form = decode(multipart).await.unwrap();
        assert_eq!(form.fields.get("summary"), Some("second"));
        assert_eq!(form.fields.len(), 1);
    }

    #[tokio::test]
    async fn test_decode_preserves_attachment_order_across_field_names() {
        let multipart = multipart_of(&[
            file_part("images", "b.png", "image/png", "B"),
            file_part("screenshot", "a.png", "image/png", "A"),
            file_part("images", "c.png", "image/png", "C"),
        ])
        .await;

        let form = decode(multipart).await.unwrap();
        let names: Vec<_> = form.attachments.iter().map(|a| a.filename.as_str()).collect();
        assert_eq!(names, ["b.png", "a.png", "c.png"]);
        assert_eq!(form.attachments[1].field, "screenshot");
    }

    #[tokio::test]
    async fn test_decode_sanitizes_traversal_filename() {
        let multipart =
            multipart_of(&[file_part("images", "../../etc/pa ss..wd", "text/plain", "x")]).await;
        let form = decode(multipart).await.unwrap();
        assert_eq!(form.attachments[0].filename, "pa_ss.wd");
    }

    #[tokio::test]
    async fn test_decode_skips_blank_file_input() {
        let multipart = multipart_of(&[
            file_part("images", "", "application/octet-stream", ""),
            text_part("name", "Jane"),
        ])
        .await;
        let form = decode(multipart).await.unwrap();
        assert!(form.attachments.is_empty());
        assert_eq!(form.fields.get("name"), Some("Jane"));
    }

    #[tokio::test]
    async fn test_decode_truncated_body_is_decode_error() {
        let body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"name\"\r\n\r\nJa"
        );
        let request = Request::builder()
            .method("POST")
            .header("content-type", format!("multipart/form-data; boundary={BOUNDARY}"))
            .body(Body::from(body))
            .unwrap();
        let multipart = Multipart::from_request(request, &()).await.unwrap();

        let err = decode(multipart).await.unwrap_err();
        assert_eq!(err.kind(), "decode");
    }

    #[tokio::test]
    async fn test_missing_boundary_rejection_is_decode_error() {
        let request = Request::builder()
            .method("POST")
            .header("content-type", "multipart/form-data")
            .body(Body::empty())
            .unwrap();
        let Err(rejection) = Multipart::from_request(request, &()).await else {
            panic!("multipart without boundary must be rejected");
        };

        let err = rejection_error(rejection);
        assert_eq!(err.kind(), "decode");
    }
}
