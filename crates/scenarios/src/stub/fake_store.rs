//! Stand-in for the public fake store, built on a wiremock server.
//!
//! Ten users with ids 1 to 10. `limit` and `sort` behave as on the public
//! service: a `limit` of 0 or above the user count returns everyone.

use apicheck_domain::models::{Address, AuthData, Geolocation, Name, StoreUser};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use crate::fixtures::store_credentials;

/// Number of users the stub serves.
pub const STORE_USER_COUNT: u64 = 10;

/// Id returned for every created user.
pub const CREATED_USER_ID: u64 = STORE_USER_COUNT + 1;

/// The users the stub serves, in ascending id order.
#[must_use]
pub fn seeded_users() -> Vec<StoreUser> {
    (1..=STORE_USER_COUNT).map(seeded_user).collect()
}

fn seeded_user(id: u64) -> StoreUser {
    let mut user = StoreUser::builder()
        .username(format!("user{id}"))
        .email(format!("user{id}@gmail.com"))
        .password(format!("pass{id}"))
        .phone(format!("1-570-236-{:04}", 7000 + id))
        .name(Name::new(format!("first{id}"), format!("last{id}")))
        .address(
            Address::builder()
                .city("kilcoole")
                .street("new road")
                .number(u32::try_from(id * 100).unwrap_or_default())
                .zipcode(format!("{:05}-{:04}", 12_000 + id, 3_000 + id))
                .geolocation(Geolocation::new("-37.3159", "81.1496"))
                .build(),
        )
        .build();
    user.id = Some(id);
    user.version = Some(0);
    user
}

fn query(request: &Request, key: &str) -> Option<String> {
    request
        .url
        .query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

fn path_id(request: &Request) -> Option<u64> {
    request.url.path_segments()?.next_back()?.parse().ok()
}

fn body(request: &Request) -> Value {
    serde_json::from_slice(&request.body).unwrap_or(Value::Null)
}

struct ListUsers;

impl Respond for ListUsers {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut users = seeded_users();
        if query(request, "sort").as_deref() == Some("desc") {
            users.reverse();
        }
        let limit = query(request, "limit")
            .and_then(|l| l.parse::<usize>().ok())
            .filter(|&l| l > 0);
        if let Some(limit) = limit {
            users.truncate(limit);
        }
        ResponseTemplate::new(200).set_body_json(users)
    }
}

struct GetUser;

impl Respond for GetUser {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let user = path_id(request)
            .filter(|id| (1..=STORE_USER_COUNT).contains(id))
            .map(seeded_user);
        ResponseTemplate::new(200).set_body_json(user)
    }
}

struct EchoUser {
    assign_id: Option<u64>,
}

impl Respond for EchoUser {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut user = body(request);
        let id = self.assign_id.or_else(|| path_id(request));
        if let (Value::Object(fields), Some(id)) = (&mut user, id) {
            fields.insert("id".to_string(), json!(id));
        }
        ResponseTemplate::new(200).set_body_json(user)
    }
}

struct Login;

impl Respond for Login {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        match serde_json::from_slice::<AuthData>(&request.body) {
            Ok(credentials) if credentials == store_credentials() => ResponseTemplate::new(200)
                .set_body_json(json!({"token": format!("stub.{}.token", credentials.username)})),
            _ => ResponseTemplate::new(401).set_body_string("username or password is incorrect"),
        }
    }
}

/// A running fake store; the mock server stops when it is dropped.
pub struct FakeStoreStub {
    server: MockServer,
}

impl FakeStoreStub {
    /// Starts the mock server and mounts every route.
    pub async fn start() -> Self {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ListUsers)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/users/\d+$"))
            .respond_with(GetUser)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/users"))
            .respond_with(EchoUser {
                assign_id: Some(CREATED_USER_ID),
            })
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path_regex(r"^/users/\d+$"))
            .respond_with(EchoUser { assign_id: None })
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path_regex(r"^/users/\d+$"))
            .respond_with(GetUser)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(Login)
            .mount(&server)
            .await;

        tracing::debug!(uri = %server.uri(), "fake store stub listening");
        Self { server }
    }

    /// Base URL of the stub.
    #[must_use]
    pub fn base_url(&self) -> String {
        self.server.uri()
    }
}
