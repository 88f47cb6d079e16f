//! Request specification type

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use super::{FilePart, Header, HttpMethod, QueryParam, RequestBody};
use crate::error::{DomainError, DomainResult};

/// Complete specification for one HTTP call.
///
/// `path` is either an absolute URL or a path resolved against the base URL
/// of the service the request is sent to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestSpec {
    /// Identifier used to correlate request and response log lines.
    pub id: Uuid,
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute URL or path relative to the service base URL.
    pub path: String,
    /// Query parameters, appended in insertion order.
    #[serde(default)]
    pub query: Vec<QueryParam>,
    /// Extra request headers.
    #[serde(default)]
    pub headers: Vec<Header>,
    /// Bearer token sent as `Authorization: Bearer <token>`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer: Option<String>,
    /// Request body.
    #[serde(default)]
    pub body: RequestBody,
}

impl RequestSpec {
    /// Creates a request with no body, headers or query.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            bearer: None,
            body: RequestBody::None,
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Creates a POST request.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Creates a PUT request.
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    /// Creates a DELETE request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push(QueryParam::new(key, value.to_string()));
        self
    }

    /// Adds a header.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name is not a valid token.
    pub fn with_header(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> DomainResult<Self> {
        self.headers.push(Header::new(name, value)?);
        Ok(self)
    }

    /// Authenticates the request with a bearer token.
    #[must_use]
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    /// Serializes `value` as the JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidBody`] if `value` cannot be represented as JSON.
    pub fn with_json<T: Serialize + ?Sized>(mut self, value: &T) -> DomainResult<Self> {
        let json = serde_json::to_value(value).map_err(|e| DomainError::InvalidBody(e.to_string()))?;
        self.body = RequestBody::Json(json);
        Ok(self)
    }

    /// Adds a file part, turning the body into a multipart form.
    #[must_use]
    pub fn with_multipart(mut self, part: FilePart) -> Self {
        match &mut self.body {
            RequestBody::Multipart(parts) => parts.push(part),
            _ => self.body = RequestBody::Multipart(vec![part]),
        }
        self
    }

    /// Resolves the final URL of this request.
    ///
    /// An absolute `path` is used as is. Otherwise the path is appended to the
    /// base URL, with or without a leading slash. Query parameters are
    /// appended in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidUrl`] if the path is relative and no base
    /// is given, or if the resulting URL is malformed.
    pub fn resolve_url(&self, base: Option<&Url>) -> DomainResult<Url> {
        let mut url = match Url::parse(&self.path) {
            Ok(url) if url.has_host() => url,
            _ => {
                let base = base.ok_or_else(|| {
                    DomainError::InvalidUrl(format!("relative path '{}' without base URL", self.path))
                })?;
                let mut base = base.clone();
                if !base.path().ends_with('/') {
                    let path = format!("{}/", base.path());
                    base.set_path(&path);
                }
                base.join(self.path.trim_start_matches('/'))
                    .map_err(|e| DomainError::InvalidUrl(format!("{e}: {}", self.path)))?
            }
        };

        if !self.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for param in &self.query {
                pairs.append_pair(&param.key, &param.value);
            }
        }
        Ok(url)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn base(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_leading_slash_is_optional() {
        let base = base("http://85.192.34.140:8080");
        let with_slash = RequestSpec::post("/api/login").resolve_url(Some(&base)).unwrap();
        let without = RequestSpec::post("api/login").resolve_url(Some(&base)).unwrap();
        assert_eq!(with_slash.as_str(), "http://85.192.34.140:8080/api/login");
        assert_eq!(with_slash, without);
    }

    #[test]
    fn test_base_path_is_kept() {
        let base = base("http://127.0.0.1:9000/store");
        let url = RequestSpec::get("/users/5").resolve_url(Some(&base)).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/store/users/5");
    }

    #[test]
    fn test_absolute_path_ignores_base() {
        let base = base("http://localhost:1");
        let url = RequestSpec::get("https://fakestoreapi.com/users")
            .with_query("limit", 3)
            .resolve_url(Some(&base))
            .unwrap();
        assert_eq!(url.as_str(), "https://fakestoreapi.com/users?limit=3");
    }

    #[test]
    fn test_query_order_is_preserved() {
        let base = base("https://fakestoreapi.com");
        let url = RequestSpec::get("/users")
            .with_query("sort", "desc")
            .with_query("limit", 10)
            .resolve_url(Some(&base))
            .unwrap();
        assert_eq!(url.query(), Some("sort=desc&limit=10"));
    }

    #[test]
    fn test_relative_without_base_fails() {
        let err = RequestSpec::get("/users").resolve_url(None).unwrap_err();
        assert!(matches!(err, DomainError::InvalidUrl(_)));
    }

    #[test]
    fn test_json_and_bearer() {
        let request = RequestSpec::put("/api/user")
            .with_bearer("abc")
            .with_json(&serde_json::json!({"password": "new"}))
            .unwrap();
        assert_eq!(request.bearer.as_deref(), Some("abc"));
        assert_eq!(
            request.body,
            RequestBody::Json(serde_json::json!({"password": "new"}))
        );
    }

    #[test]
    fn test_multipart_parts_accumulate() {
        let request = RequestSpec::post("/api/files/upload")
            .with_multipart(FilePart::new("file", "a", vec![1]))
            .with_multipart(FilePart::new("file", "b", vec![2]));
        match request.body {
            RequestBody::Multipart(parts) => assert_eq!(parts.len(), 2),
            other => panic!("expected multipart body, got {other:?}"),
        }
    }
}
