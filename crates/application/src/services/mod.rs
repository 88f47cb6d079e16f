//! Service facades.
//!
//! Each facade is generic over the [`HttpClient`] port and turns one named
//! operation of a remote API into exactly one request. The response comes
//! back wrapped in an [`AssertableResponse`]; the facade never judges it.

mod files;
mod store;
mod user;

pub use files::{FileService, UPLOAD_FIELD, UPLOAD_FILE_NAME};
pub use store::{SortOrder, StoreService};
pub use user::UserService;

use apicheck_domain::RequestSpec;

use crate::assertable::AssertableResponse;
use crate::error::ApplicationResult;
use crate::ports::HttpClient;

/// Sends one request through `client` and wraps the response.
///
/// # Errors
///
/// Returns [`crate::ApplicationError::Transport`] when no response arrives.
pub async fn send<C: HttpClient>(client: &C, request: &RequestSpec) -> ApplicationResult<AssertableResponse> {
    let response = client.execute(request).await?;
    Ok(AssertableResponse::new(response))
}


#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::testing::RecordingClient;
    use super::*;
    use crate::ApplicationError;
    use crate::ports::HttpClientError;
    use apicheck_domain::ResponseSpec;
    use apicheck_domain::conditions::has_status_code;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[tokio::test]
    async fn test_send_wraps_response() {
        let client = RecordingClient::answering(ResponseSpec::json(204, &json!({})));
        let response = send(&client, &RequestSpec::get("/ping")).await.unwrap();
        response.should(has_status_code(204)).unwrap();
        assert_eq!(client.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_send_surfaces_transport_errors() {
        let client = RecordingClient::failing(HttpClientError::Timeout { timeout_ms: 50 });
        let err = send(&client, &RequestSpec::get("/slow")).await.unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Transport(HttpClientError::Timeout { timeout_ms: 50 })
        ));
    }
}
