//! User-management service facade.

use apicheck_domain::models::{FullUser, JwtAuthData, PasswordUpdate};
use apicheck_domain::RequestSpec;

use super::send;
use crate::assertable::AssertableResponse;
use crate::error::ApplicationResult;
use crate::ports::HttpClient;

const SIGNUP: &str = "/api/signup";
const LOGIN: &str = "/api/login";
const USER: &str = "/api/user";
const USERS: &str = "/api/users";

/// Operations of the user-management service.
#[derive(Debug, Clone)]
pub struct UserService<C: HttpClient> {
    client: C,
}

impl<C: HttpClient> UserService<C> {
    /// Creates the facade over a client bound to the service base URL.
    #[must_use]
    pub const fn new(client: C) -> Self {
        Self { client }
    }

    /// Registers a user (`POST /api/signup`).
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be encoded or no response arrives.
    pub async fn register(&self, user: &FullUser) -> ApplicationResult<AssertableResponse> {
        let request = RequestSpec::post(SIGNUP).with_json(user)?;
        send(&self.client, &request).await
    }

    /// Logs a user in (`POST /api/login`); the body carries only the credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be encoded or no response arrives.
    pub async fn auth(&self, user: &FullUser) -> ApplicationResult<AssertableResponse> {
        let request = RequestSpec::post(LOGIN).with_json(&JwtAuthData::from(user))?;
        send(&self.client, &request).await
    }

    /// Fetches the user the token belongs to (`GET /api/user`).
    ///
    /// # Errors
    ///
    /// Returns an error if no response arrives.
    pub async fn get_user_info(&self, token: &str) -> ApplicationResult<AssertableResponse> {
        let request = RequestSpec::get(USER).with_bearer(token);
        send(&self.client, &request).await
    }

    /// Calls `GET /api/user` without credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if no response arrives.
    pub async fn get_user_info_anonymous(&self) -> ApplicationResult<AssertableResponse> {
        send(&self.client, &RequestSpec::get(USER)).await
    }

    /// Changes the password of the token's user (`PUT /api/user`).
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be encoded or no response arrives.
    pub async fn update_pass(&self, new_password: &str, token: &str) -> ApplicationResult<AssertableResponse> {
        let request = RequestSpec::put(USER)
            .with_bearer(token)
            .with_json(&PasswordUpdate::new(new_password))?;
        send(&self.client, &request).await
    }

    /// Deletes the token's user (`DELETE /api/user`).
    ///
    /// # Errors
    ///
    /// Returns an error if no response arrives.
    pub async fn delete_user(&self, token: &str) -> ApplicationResult<AssertableResponse> {
        let request = RequestSpec::delete(USER).with_bearer(token);
        send(&self.client, &request).await
    }

    /// Lists all logins (`GET /api/users`).
    ///
    /// # Errors
    ///
    /// Returns an error if no response arrives.
    pub async fn get_all_users(&self) -> ApplicationResult<AssertableResponse> {
        send(&self.client, &RequestSpec::get(USERS)).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::testing::RecordingClient;
    use apicheck_domain::{HttpMethod, RequestBody, ResponseSpec};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn service() -> UserService<RecordingClient> {
        UserService::new(RecordingClient::answering(ResponseSpec::json(200, &json!({}))))
    }

    fn user() -> FullUser {
        FullUser::builder().login("aisen123").pass("aisimem002").build()
    }

    #[tokio::test]
    async fn test_register_posts_user() {
        let service = service();
        service.register(&user()).await.unwrap();

        let request = service.client.last();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.path, "/api/signup");
        assert_eq!(
            request.body,
            RequestBody::Json(json!({"login": "aisen123", "pass": "aisimem002"}))
        );
    }

    #[tokio::test]
    async fn test_auth_sends_credentials_only() {
        let service = service();
        let mut user = user();
        user.id = Some(12);
        service.auth(&user).await.unwrap();

        let request = service.client.last();
        assert_eq!(request.path, "/api/login");
        assert_eq!(
            request.body,
            RequestBody::Json(json!({"username": "aisen123", "password": "aisimem002"}))
        );
    }

    #[tokio::test]
    async fn test_token_operations_use_bearer() {
        let service = service();
        service.get_user_info("t1").await.unwrap();
        service.update_pass("newpass", "t2").await.unwrap();
        service.delete_user("t3").await.unwrap();
        service.get_user_info_anonymous().await.unwrap();

        let requests = service.client.requests();
        let summary: Vec<_> = requests
            .iter()
            .map(|r| (r.method, r.path.as_str(), r.bearer.as_deref()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (HttpMethod::Get, "/api/user", Some("t1")),
                (HttpMethod::Put, "/api/user", Some("t2")),
                (HttpMethod::Delete, "/api/user", Some("t3")),
                (HttpMethod::Get, "/api/user", None),
            ]
        );
        assert_eq!(requests[1].body, RequestBody::Json(json!({"password": "newpass"})));
    }

    #[tokio::test]
    async fn test_get_all_users() {
        let service = service();
        service.get_all_users().await.unwrap();
        let request = service.client.last();
        assert_eq!((request.method, request.path.as_str()), (HttpMethod::Get, "/api/users"));
    }
}
