//! HTTP request body types

use serde::{Deserialize, Serialize};

/// A file attached to a multipart request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePart {
    /// Form field name (e.g., "file").
    pub field: String,
    /// File name reported to the server.
    pub file_name: String,
    /// Raw file content.
    pub bytes: Vec<u8>,
    /// MIME type of the part; guessed by the transport when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl FilePart {
    /// Creates a part without an explicit content type.
    #[must_use]
    pub fn new(field: impl Into<String>, file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            field: field.into(),
            file_name: file_name.into(),
            bytes,
            content_type: None,
        }
    }

    /// Sets the MIME type of the part.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// HTTP request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum RequestBody {
    /// No body.
    #[default]
    None,
    /// JSON document sent as `application/json`.
    Json(serde_json::Value),
    /// Multipart form made of file parts.
    Multipart(Vec<FilePart>),
}

impl RequestBody {
    /// Returns whether there is nothing to send.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Json(_) => false,
            Self::Multipart(parts) => parts.is_empty(),
        }
    }

    /// Returns the content type the transport sets for this body, if any.
    ///
    /// Multipart boundaries are chosen by the transport, so only the
    /// media type is reported here.
    #[must_use]
    pub const fn content_type(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::Json(_) => Some("application/json"),
            Self::Multipart(_) => Some("multipart/form-data"),
        }
    }

    /// Approximate payload size in bytes, for logging.
    #[must_use]
    pub fn size_hint(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Json(value) => value.to_string().len(),
            Self::Multipart(parts) => parts.iter().map(|p| p.bytes.len()).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_json_body() {
        let body = RequestBody::Json(serde_json::json!({"login": "demo"}));
        assert_eq!(body.content_type(), Some("application/json"));
        assert!(!body.is_empty());
        assert_eq!(body.size_hint(), r#"{"login":"demo"}"#.len());
    }

    #[test]
    fn test_empty_bodies() {
        assert!(RequestBody::None.is_empty());
        assert!(RequestBody::Multipart(Vec::new()).is_empty());
        assert_eq!(RequestBody::None.content_type(), None);
    }

    #[test]
    fn test_multipart_size() {
        let body = RequestBody::Multipart(vec![
            FilePart::new("file", "myFile", vec![0; 16]).with_content_type("image/jpeg"),
        ]);
        assert_eq!(body.size_hint(), 16);
        assert_eq!(body.content_type(), Some("multipart/form-data"));
    }
}
