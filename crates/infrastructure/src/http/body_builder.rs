//! HTTP request body builder.
//!
//! Turns the domain [`RequestBody`] into a reqwest body. JSON is sent as is;
//! multipart parts get their MIME type from the part, or from the file name
//! when the part does not name one.

use apicheck_domain::{FilePart, RequestBody};
use reqwest::RequestBuilder;
use reqwest::multipart::{Form, Part};

/// Error type for body building operations.
#[derive(Debug, thiserror::Error)]
pub enum BodyBuildError {
    /// A part names a MIME type reqwest rejects.
    #[error("invalid MIME type '{mime}' for part '{field}'")]
    InvalidMime {
        /// Form field of the part.
        field: String,
        /// Rejected MIME type.
        mime: String,
    },
}

/// Attaches `body` to `builder`, setting the content type.
///
/// # Errors
///
/// Returns [`BodyBuildError::InvalidMime`] if a multipart part carries a
/// malformed content type.
pub fn apply_body(builder: RequestBuilder, body: &RequestBody) -> Result<RequestBuilder, BodyBuildError> {
    match body {
        RequestBody::None => Ok(builder),
        RequestBody::Json(value) => Ok(builder.json(value)),
        RequestBody::Multipart(parts) => Ok(builder.multipart(build_form(parts)?)),
    }
}

/// Builds a multipart form from file parts.
///
/// # Errors
///
/// Returns [`BodyBuildError::InvalidMime`] for a malformed content type.
pub fn build_form(parts: &[FilePart]) -> Result<Form, BodyBuildError> {
    parts.iter().try_fold(Form::new(), |form, part| {
        Ok(form.part(part.field.clone(), build_part(part)?))
    })
}

fn build_part(part: &FilePart) -> Result<Part, BodyBuildError> {
    let mime = part_mime(part);
    Part::bytes(part.bytes.clone())
        .file_name(part.file_name.clone())
        .mime_str(&mime)
        .map_err(|_| BodyBuildError::InvalidMime {
            field: part.field.clone(),
            mime,
        })
}

/// MIME type sent for a part.
#[must_use]
pub fn part_mime(part: &FilePart) -> String {
    part.content_type.clone().unwrap_or_else(|| {
        mime_guess::from_path(&part.file_name)
            .first_or(mime::APPLICATION_OCTET_STREAM)
            .to_string()
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_part_mime_guessing() {
        assert_eq!(part_mime(&FilePart::new("file", "myFile", vec![1])), "application/octet-stream");
        assert_eq!(part_mime(&FilePart::new("file", "threadqa.jpeg", vec![1])), "image/jpeg");
        assert_eq!(
            part_mime(&FilePart::new("file", "myFile", vec![1]).with_content_type("image/png")),
            "image/png"
        );
    }

    #[test]
    fn test_invalid_mime_is_rejected() {
        let part = FilePart::new("file", "myFile", vec![1]).with_content_type("not a mime");
        let err = build_form(&[part]).unwrap_err();
        assert!(matches!(err, BodyBuildError::InvalidMime { ref field, .. } if field == "file"));
    }

    #[test]
    fn test_json_and_empty_bodies() {
        let client = reqwest::Client::new();
        let json = apply_body(
            client.post("http://localhost/api/login"),
            &RequestBody::Json(serde_json::json!({"username": "admin"})),
        )
        .unwrap()
        .build()
        .unwrap();
        assert_eq!(
            json.headers().get("content-type").unwrap().to_str().unwrap(),
            "application/json"
        );
        assert_eq!(json.body().and_then(|b| b.as_bytes()).unwrap(), br#"{"username":"admin"}"#);

        let empty = apply_body(client.get("http://localhost/api/users"), &RequestBody::None)
            .unwrap()
            .build()
            .unwrap();
        assert!(empty.body().is_none());
    }
}
