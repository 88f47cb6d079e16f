//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! One client is bound to one service: relative request paths resolve
//! against its base URL and every exchange is logged per its filters.

use std::collections::HashMap;
use std::error::Error as _;
use std::time::{Duration, Instant};

use apicheck_application::ports::{HttpClient, HttpClientError};
use apicheck_application::{ExchangeLogging, ServiceConfig};
use apicheck_domain::{HttpMethod, RequestSpec, ResponseSpec};
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, Url};

use crate::http::apply_body;

const USER_AGENT: &str = concat!("apicheck/", env!("CARGO_PKG_VERSION"));
const LOG_PREVIEW_CHARS: usize = 1000;

/// HTTP client implementation using reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: Client,
    base_url: Option<Url>,
    timeout_ms: u64,
    logging: ExchangeLogging,
}

impl ReqwestHttpClient {
    /// Creates a client bound to a service.
    ///
    /// Redirects are followed up to 10 hops and TLS certificates are
    /// verified.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new(config: &ServiceConfig) -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self::with_client(client, config))
    }

    /// Creates a client from a custom reqwest client.
    #[must_use]
    pub fn with_client(client: Client, config: &ServiceConfig) -> Self {
        Self {
            client,
            base_url: Some(config.base_url.clone()),
            timeout_ms: config.timeout_ms,
            logging: config.logging,
        }
    }

    /// Base URL relative paths resolve against.
    #[must_use]
    pub const fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
        }
    }

    /// Maps reqwest errors to port `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms };
        }

        let message = error_chain(error);
        if error.is_connect() {
            let host = error
                .url()
                .and_then(Url::host_str)
                .unwrap_or("unknown")
                .to_string();
            let lower = message.to_lowercase();
            if lower.contains("dns") || lower.contains("resolve") {
                return HttpClientError::DnsError { host, message };
            }
            if lower.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host,
                    port: error
                        .url()
                        .and_then(Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            return HttpClientError::ConnectionFailed(message);
        }

        if error.is_builder() {
            return HttpClientError::InvalidBody(message);
        }

        HttpClientError::Other(message)
    }

    async fn send(&self, request: &RequestSpec, url: Url) -> Result<ResponseSpec, HttpClientError> {
        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url)
            .timeout(Duration::from_millis(self.timeout_ms));

        for header in &request.headers {
            builder = builder.header(&header.name, &header.value);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        builder = apply_body(builder, &request.body).map_err(|e| HttpClientError::InvalidBody(e.to_string()))?;

        let start = Instant::now();
        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, self.timeout_ms))?;

        let status = response.status().as_u16();
        let headers = collect_headers(response.headers());
        let body = response
            .bytes()
            .await
            .map_err(|e| Self::map_error(&e, self.timeout_ms))?
            .to_vec();

        Ok(ResponseSpec::new(status, headers, body, start.elapsed()))
    }

    fn log_request(&self, request: &RequestSpec, url: &Url) {
        if self.logging.requests {
            tracing::info!(
                request_id = %request.id,
                method = %request.method,
                url = %url,
                body_size = request.body.size_hint(),
                "sending request"
            );
        }
    }

    fn log_response(&self, request: &RequestSpec, response: &ResponseSpec) {
        if self.logging.responses {
            tracing::info!(
                request_id = %request.id,
                status = response.status,
                duration_ms = response.duration.as_millis(),
                size = response.size(),
                "received response"
            );
            tracing::debug!(
                request_id = %request.id,
                body = %response.preview(LOG_PREVIEW_CHARS),
                "response body"
            );
        }
    }
}

impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: &RequestSpec) -> Result<ResponseSpec, HttpClientError> {
        let url = request
            .resolve_url(self.base_url.as_ref())
            .map_err(|e| HttpClientError::InvalidUrl(e.to_string()))?;

        self.log_request(request, &url);
        match self.send(request, url).await {
            Ok(response) => {
                self.log_response(request, &response);
                Ok(response)
            }
            Err(error) => {
                tracing::warn!(request_id = %request.id, %error, "request failed");
                Err(error)
            }
        }
    }
}

/// Flattens response headers; repeated values are joined with `", "`.
fn collect_headers(headers: &HeaderMap) -> HashMap<String, String> {
    let mut collected: HashMap<String, String> = HashMap::new();
    for (name, value) in headers {
        let value = value.to_str().unwrap_or("<binary>");
        collected
            .entry(name.to_string())
            .and_modify(|joined| {
                joined.push_str(", ");
                joined.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }
    collected
}

/// Joins an error with all of its sources; reqwest keeps the useful part
/// (refused, DNS failure) in the source chain.
fn error_chain(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use apicheck_domain::FilePart;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ReqwestHttpClient {
        let config = ServiceConfig::parse(&server.uri()).unwrap();
        ReqwestHttpClient::new(&config).unwrap()
    }

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(ReqwestHttpClient::to_reqwest_method(HttpMethod::Get), Method::GET);
        assert_eq!(ReqwestHttpClient::to_reqwest_method(HttpMethod::Post), Method::POST);
        assert_eq!(ReqwestHttpClient::to_reqwest_method(HttpMethod::Put), Method::PUT);
        assert_eq!(ReqwestHttpClient::to_reqwest_method(HttpMethod::Delete), Method::DELETE);
    }

    #[test]
    fn test_repeated_headers_are_joined() {
        let mut headers = HeaderMap::new();
        headers.append("set-cookie", "a=1".parse().unwrap());
        headers.append("set-cookie", "b=2".parse().unwrap());
        headers.insert("content-type", "application/json".parse().unwrap());

        let collected = collect_headers(&headers);
        assert_eq!(collected.get("set-cookie").map(String::as_str), Some("a=1, b=2"));
        assert_eq!(
            collected.get("content-type").map(String::as_str),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn test_json_request_with_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/user"))
            .and(header("authorization", "Bearer abc"))
            .and(body_json(json!({"password": "new"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "info": {"status": "success", "message": "User password successfully changed"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let request = RequestSpec::put("/api/user")
            .with_bearer("abc")
            .with_json(&json!({"password": "new"}))
            .unwrap();
        let response = client_for(&server).execute(&request).await.unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.content_type(), Some("application/json"));
        assert!(response.body_text().contains("successfully changed"));
    }

    #[tokio::test]
    async fn test_error_statuses_are_responses() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/user"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let response = client_for(&server)
            .execute(&RequestSpec::get("api/user"))
            .await
            .unwrap();
        assert_eq!(response.status, 401);
        assert!(response.body.is_empty());
    }

    #[tokio::test]
    async fn test_query_params_are_sent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .and(query_param("limit", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([1, 2, 3, 4, 5])))
            .expect(1)
            .mount(&server)
            .await;

        let response = client_for(&server)
            .execute(&RequestSpec::get("/users").with_query("limit", 5))
            .await
            .unwrap();
        assert_eq!(response.body_json().unwrap(), json!([1, 2, 3, 4, 5]));
    }

    #[tokio::test]
    async fn test_multipart_upload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/files/upload"))
            .and(body_string_contains("name=\"file\"; filename=\"myFile\""))
            .and(body_string_contains("payload-bytes"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let request = RequestSpec::post("/api/files/upload").with_multipart(FilePart::new(
            "file",
            "myFile",
            b"payload-bytes".to_vec(),
        ));
        let response = client_for(&server).execute(&request).await.unwrap();
        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn test_binary_body_is_kept() {
        let server = MockServer::start().await;
        let bytes = vec![0xFF, 0xD8, 0x00, 0x7F, 0x80];
        Mock::given(method("GET"))
            .and(path("/api/files/download"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(bytes.clone(), "image/jpeg"))
            .mount(&server)
            .await;

        let response = client_for(&server)
            .execute(&RequestSpec::get("/api/files/download"))
            .await
            .unwrap();
        assert_eq!(response.body, bytes);
        assert_eq!(response.get_header("Content-Type"), Some("image/jpeg"));
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let config = ServiceConfig::parse(&server.uri()).unwrap().with_timeout_ms(50);
        let err = ReqwestHttpClient::new(&config)
            .unwrap()
            .execute(&RequestSpec::get("/slow"))
            .await
            .unwrap_err();
        assert_eq!(err, HttpClientError::Timeout { timeout_ms: 50 });
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let config = ServiceConfig::parse(&format!("http://127.0.0.1:{port}")).unwrap();
        let err = ReqwestHttpClient::new(&config)
            .unwrap()
            .execute(&RequestSpec::get("/api/users"))
            .await
            .unwrap_err();
        match err {
            HttpClientError::ConnectionRefused { host, port: p } => {
                assert_eq!(host, "127.0.0.1");
                assert_eq!(p, port);
            }
            HttpClientError::ConnectionFailed(_) => {}
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_absolute_path_ignores_base() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let config = ServiceConfig::parse("http://127.0.0.1:9").unwrap();
        let client = ReqwestHttpClient::new(&config).unwrap();
        let response = client
            .execute(&RequestSpec::get(format!("{}/users", server.uri())))
            .await
            .unwrap();
        assert_eq!(response.status, 200);
    }
}
