//! Fake store facade (`/users`, `/auth/login`).

use std::fmt;

use apicheck_domain::models::{AuthData, StoreUser};
use apicheck_domain::RequestSpec;

use super::send;
use crate::assertable::AssertableResponse;
use crate::error::ApplicationResult;
use crate::ports::HttpClient;

/// Sort order accepted by the `sort` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Ascending by id.
    #[default]
    Asc,
    /// Descending by id.
    Desc,
}

impl SortOrder {
    /// Query parameter value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User and login operations of the fake store.
#[derive(Debug, Clone)]
pub struct StoreService<C: HttpClient> {
    client: C,
}

impl<C: HttpClient> StoreService<C> {
    /// Creates the facade over a client bound to the store base URL.
    #[must_use]
    pub const fn new(client: C) -> Self {
        Self { client }
    }

    /// Lists all users.
    ///
    /// # Errors
    ///
    /// Returns an error if no response arrives.
    pub async fn get_users(&self) -> ApplicationResult<AssertableResponse> {
        send(&self.client, &RequestSpec::get("/users")).await
    }

    /// Lists at most `limit` users.
    ///
    /// # Errors
    ///
    /// Returns an error if no response arrives.
    pub async fn get_users_limited(&self, limit: usize) -> ApplicationResult<AssertableResponse> {
        send(&self.client, &RequestSpec::get("/users").with_query("limit", limit)).await
    }

    /// Lists users in the given order.
    ///
    /// # Errors
    ///
    /// Returns an error if no response arrives.
    pub async fn get_users_sorted(&self, order: SortOrder) -> ApplicationResult<AssertableResponse> {
        send(&self.client, &RequestSpec::get("/users").with_query("sort", order)).await
    }

    /// Fetches one user.
    ///
    /// # Errors
    ///
    /// Returns an error if no response arrives.
    pub async fn get_user(&self, id: u64) -> ApplicationResult<AssertableResponse> {
        send(&self.client, &RequestSpec::get(format!("/users/{id}"))).await
    }

    /// Creates a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be encoded or no response arrives.
    pub async fn add_user(&self, user: &StoreUser) -> ApplicationResult<AssertableResponse> {
        let request = RequestSpec::post("/users").with_json(user)?;
        send(&self.client, &request).await
    }

    /// Replaces a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be encoded or no response arrives.
    pub async fn update_user(&self, id: u64, user: &StoreUser) -> ApplicationResult<AssertableResponse> {
        let request = RequestSpec::put(format!("/users/{id}")).with_json(user)?;
        send(&self.client, &request).await
    }

    /// Deletes a user.
    ///
    /// # Errors
    ///
    /// Returns an error if no response arrives.
    pub async fn delete_user(&self, id: u64) -> ApplicationResult<AssertableResponse> {
        send(&self.client, &RequestSpec::delete(format!("/users/{id}"))).await
    }

    /// Logs in and returns the token response.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be encoded or no response arrives.
    pub async fn login(&self, credentials: &AuthData) -> ApplicationResult<AssertableResponse> {
        let request = RequestSpec::post("/auth/login").with_json(credentials)?;
        send(&self.client, &request).await
    }
}
