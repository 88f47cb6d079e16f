//! In-process stand-in for the user-management service.
//!
//! Serves the same routes and messages as the remote service from an axum
//! router bound to an ephemeral local port. State lives behind a mutex and
//! is dropped with the handle.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::extract::multipart::MultipartError;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::{Mutex, oneshot};
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Content of `GET /api/files/download`.
pub const BASE_FILE: &[u8] = include_bytes!("base_file.bin");

/// Logins that cannot be changed or deleted.
pub const BASE_USERS: [(&str, &str); 3] = [("admin", "admin"), ("demo", "demo"), ("threadqa", "threadqa")];

#[derive(Debug, Clone)]
struct StoredUser {
    id: u64,
    login: String,
    pass: String,
    base: bool,
}

#[derive(Debug, Default)]
struct Registry {
    users: Vec<StoredUser>,
    tokens: HashMap<String, String>,
    next_id: u64,
    last_upload: Option<Vec<u8>>,
}

impl Registry {
    fn seeded() -> Self {
        let mut registry = Self::default();
        for (login, pass) in BASE_USERS {
            registry.insert(login, pass, true);
        }
        registry
    }

    fn insert(&mut self, login: &str, pass: &str, base: bool) {
        self.next_id += 1;
        self.users.push(StoredUser {
            id: self.next_id,
            login: login.to_string(),
            pass: pass.to_string(),
            base,
        });
    }

    fn find(&self, login: &str) -> Option<&StoredUser> {
        self.users.iter().find(|u| u.login == login)
    }

    fn by_token(&self, headers: &HeaderMap) -> Option<StoredUser> {
        let token = headers
            .get(header::AUTHORIZATION)?
            .to_str()
            .ok()?
            .strip_prefix("Bearer ")?;
        let login = self.tokens.get(token)?;
        self.find(login).cloned()
    }
}

type SharedRegistry = Arc<Mutex<Registry>>;

#[derive(Debug, Default, Deserialize)]
struct Credentials {
    #[serde(default)]
    login: Option<String>,
    #[serde(default)]
    pass: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

impl Credentials {
    fn parse(bytes: &[u8]) -> Self {
        serde_json::from_slice(bytes).unwrap_or_default()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn info(status: StatusCode, message: &str) -> Response {
    let outcome = if status.is_success() { "success" } else { "fail" };
    (
        status,
        Json(json!({"info": {"status": outcome, "message": message}})),
    )
        .into_response()
}

fn unauthorized() -> Response {
    info(StatusCode::UNAUTHORIZED, "Unauthorized")
}

async fn signup(State(registry): State<SharedRegistry>, body: Bytes) -> Response {
    let credentials = Credentials::parse(&body);
    let (Some(login), Some(pass)) = (non_empty(credentials.login), non_empty(credentials.pass)) else {
        return info(StatusCode::BAD_REQUEST, "Missing login or password");
    };

    let mut registry = registry.lock().await;
    if registry.find(&login).is_some() {
        return info(StatusCode::BAD_REQUEST, "Login already exist");
    }
    registry.insert(&login, &pass, false);
    tracing::debug!(%login, "stub user registered");
    info(StatusCode::CREATED, "User created")
}

async fn login(State(registry): State<SharedRegistry>, body: Bytes) -> Response {
    let credentials = Credentials::parse(&body);
    let mut registry = registry.lock().await;
    let matched = registry
        .find(credentials.username.as_deref().unwrap_or_default())
        .filter(|user| Some(user.pass.as_str()) == credentials.password.as_deref())
        .map(|user| user.login.clone());

    match matched {
        Some(login) => {
            let token = Uuid::new_v4().simple().to_string();
            registry.tokens.insert(token.clone(), login);
            (StatusCode::OK, Json(json!({"token": token}))).into_response()
        }
        None => unauthorized(),
    }
}

async fn get_user(State(registry): State<SharedRegistry>, headers: HeaderMap) -> Response {
    match registry.lock().await.by_token(&headers) {
        Some(user) => (
            StatusCode::OK,
            Json(json!({"id": user.id, "login": user.login, "pass": user.pass})),
        )
            .into_response(),
        None => unauthorized(),
    }
}

async fn update_password(State(registry): State<SharedRegistry>, headers: HeaderMap, body: Bytes) -> Response {
    let mut registry = registry.lock().await;
    let Some(user) = registry.by_token(&headers) else {
        return unauthorized();
    };
    if user.base {
        return info(StatusCode::BAD_REQUEST, "Cant update base users");
    }
    let Some(password) = non_empty(Credentials::parse(&body).password) else {
        return info(StatusCode::BAD_REQUEST, "Missing password");
    };
    if let Some(stored) = registry.users.iter_mut().find(|u| u.id == user.id) {
        stored.pass = password;
    }
    info(StatusCode::OK, "User password successfully changed")
}

async fn delete_user(State(registry): State<SharedRegistry>, headers: HeaderMap) -> Response {
    let mut registry = registry.lock().await;
    let Some(user) = registry.by_token(&headers) else {
        return unauthorized();
    };
    if user.base {
        return info(StatusCode::BAD_REQUEST, "Cant delete base users");
    }
    registry.users.retain(|u| u.id != user.id);
    registry.tokens.retain(|_, login| *login != user.login);
    info(StatusCode::OK, "User successfully deleted")
}

async fn list_users(State(registry): State<SharedRegistry>) -> Json<Vec<String>> {
    let registry = registry.lock().await;
    Json(registry.users.iter().map(|u| u.login.clone()).collect())
}

fn binary(bytes: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "image/jpeg")],
        bytes,
    )
        .into_response()
}

async fn download_base() -> Response {
    binary(BASE_FILE.to_vec())
}

async fn download_last(State(registry): State<SharedRegistry>) -> Response {
    match registry.lock().await.last_upload.clone() {
        Some(bytes) => binary(bytes),
        None => info(StatusCode::NOT_FOUND, "No uploaded files"),
    }
}

async fn upload(State(registry): State<SharedRegistry>, mut multipart: Multipart) -> Result<Response, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            let bytes = field.bytes().await?;
            tracing::debug!(size = bytes.len(), "stub file uploaded");
            registry.lock().await.last_upload = Some(bytes.to_vec());
            return Ok(info(StatusCode::OK, "file uploaded to server"));
        }
    }
    Ok(info(StatusCode::BAD_REQUEST, "Missing file"))
}

fn router(registry: SharedRegistry) -> Router {
    Router::new()
        .route("/api/signup", post(signup))
        .route("/api/login", post(login))
        .route("/api/user", get(get_user).put(update_password).delete(delete_user))
        .route("/api/users", get(list_users))
        .route("/api/files/download", get(download_base))
        .route("/api/files/downloadLastUploaded", get(download_last))
        .route("/api/files/upload", post(upload))
        .with_state(registry)
}

/// Handle of a running stub; the server stops when it is dropped.
#[derive(Debug)]
pub struct UserServiceStub {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl UserServiceStub {
    /// Binds an ephemeral port on localhost and starts serving.
    ///
    /// # Errors
    ///
    /// Returns the bind error if no port is available.
    pub async fn start() -> std::io::Result<Self> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let app = router(Arc::new(Mutex::new(Registry::seeded())));
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            if let Err(error) = server.await {
                tracing::error!(%error, "user service stub stopped");
            }
        });
        tracing::debug!(%addr, "user service stub listening");

        Ok(Self {
            addr,
            shutdown: Some(shutdown_tx),
            task,
        })
    }

    /// Base URL of the stub.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for UserServiceStub {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        self.task.abort();
    }
}
