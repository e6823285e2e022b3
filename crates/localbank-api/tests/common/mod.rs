//! Common test utilities and harness for localbank-api integration tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use localbank_api::{AppState, build_router};
use localbank_auth::{GuardConfig, MemoryAuthGateway, SESSION_COOKIE};
use localbank_storage::{
    DataAccess, Document, DocumentStore, Fields, LocalStore, MemoryDocumentStore,
    MemoryLocalStore, Query,
};
use tower::ServiceExt;

/// Registered admin account.
pub const ADMIN_EMAIL: &str = "admin@localbank.test";
/// Password for [`ADMIN_EMAIL`].
pub const ADMIN_PASSWORD: &str = "correct horse battery";

/// A document store whose every call fails, standing in for an offline
/// remote database.
pub struct OfflineStore;

#[async_trait]
impl DocumentStore for OfflineStore {
    async fn query(&self, _: &str, _: Query) -> localbank_storage::Result<Vec<Document>> {
        Err(localbank_storage::Error::backend("offline"))
    }

    async fn get(&self, _: &str, _: &str) -> localbank_storage::Result<Option<Document>> {
        Err(localbank_storage::Error::backend("offline"))
    }

    async fn create(&self, _: &str, _: Fields) -> localbank_storage::Result<String> {
        Err(localbank_storage::Error::backend("offline"))
    }

    async fn update_fields(&self, _: &str, _: &str, _: Fields) -> localbank_storage::Result<()> {
        Err(localbank_storage::Error::backend("offline"))
    }

    async fn delete(&self, _: &str, _: &str) -> localbank_storage::Result<()> {
        Err(localbank_storage::Error::backend("offline"))
    }

    async fn upsert_merge(&self, _: &str, _: &str, _: Fields) -> localbank_storage::Result<()> {
        Err(localbank_storage::Error::backend("offline"))
    }

    fn name(&self) -> &str {
        "offline"
    }
}

/// A collected response.
#[derive(Debug)]
pub struct TestResponse {
    /// Status code.
    pub status: StatusCode,
    /// `Location` header, if any.
    pub location: Option<String>,
    /// `Set-Cookie` header, if any.
    pub set_cookie: Option<String>,
    /// Body as UTF-8 text.
    pub body: String,
}

/// Test harness for integration tests.
///
/// Wires in-memory backends into an [`AppState`] and drives the router with
/// `oneshot`. Acts as one browser: the session cookie set at login is sent
/// with every later request. The `*_anonymous` helpers act as a second
/// client without it.
pub struct TestHarness {
    /// State shared by every request.
    pub state: AppState,
    /// The local key/value store behind the white-label cache and admin
    /// sessions.
    pub local: Arc<MemoryLocalStore>,
    cookie: Mutex<Option<String>>,
}

impl TestHarness {
    /// In-memory document store and a gateway with one admin account.
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryDocumentStore::new()))
    }

    /// Use `store` as the document database.
    pub fn with_store(store: Arc<dyn DocumentStore>) -> Self {
        let gateway = MemoryAuthGateway::new()
            .with_password(ADMIN_EMAIL, ADMIN_PASSWORD)
            .expect("valid account");
        let local = Arc::new(MemoryLocalStore::new());
        let state = AppState::with_local_store(
            local.clone() as Arc<dyn LocalStore>,
            DataAccess::new(store),
            Arc::new(gateway),
        );
        Self {
            state,
            local,
            cookie: Mutex::new(None),
        }
    }

    /// Document store that is always offline.
    pub fn offline() -> Self {
        Self::with_store(Arc::new(OfflineStore))
    }

    /// Require a live gateway session in addition to the session cookie.
    pub fn require_live_session(mut self) -> Self {
        self.state = self.state.with_guard(GuardConfig {
            require_live_session: true,
            ..GuardConfig::default()
        });
        self
    }

    /// A fresh router over the shared state.
    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    async fn send(&self, mut request: Request<Body>, with_cookie: bool) -> TestResponse {
        if with_cookie {
            if let Some(token) = self.session_token() {
                let cookie = format!("{SESSION_COOKIE}={token}");
                request
                    .headers_mut()
                    .insert(header::COOKIE, cookie.parse().expect("cookie header"));
            }
        }
        let response = self.router().oneshot(request).await.expect("infallible");
        let status = response.status();
        let header_text = |name: header::HeaderName| {
            response
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let location = header_text(header::LOCATION);
        let set_cookie = header_text(header::SET_COOKIE);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        TestResponse {
            status,
            location,
            set_cookie,
            body: String::from_utf8(bytes.to_vec()).expect("utf-8 body"),
        }
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).expect("request")
    }

    fn form_request(uri: &str, fields: &[(&str, &str)]) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form_body(fields)))
            .expect("request")
    }

    /// `GET uri`.
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Self::get_request(uri), true).await
    }

    /// `POST uri` with a urlencoded form body.
    pub async fn post_form(&self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        self.send(Self::form_request(uri, fields), true).await
    }

    /// `GET uri` from a client with no session cookie.
    pub async fn get_anonymous(&self, uri: &str) -> TestResponse {
        self.send(Self::get_request(uri), false).await
    }

    /// `POST uri` from a client with no session cookie.
    pub async fn post_form_anonymous(&self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        self.send(Self::form_request(uri, fields), false).await
    }

    /// Token from the session cookie this client holds.
    pub fn session_token(&self) -> Option<String> {
        self.cookie.lock().expect("cookie jar").clone()
    }

    /// Sign in through the login form, assert the redirect and keep the
    /// session cookie.
    pub async fn login(&self) {
        let resp = self
            .post_form(
                "/admin/login",
                &[("email", ADMIN_EMAIL), ("password", ADMIN_PASSWORD)],
            )
            .await;
        assert_eq!(resp.status, StatusCode::SEE_OTHER);
        assert_eq!(resp.location.as_deref(), Some("/admin/dashboard"));
        let token = resp
            .set_cookie
            .as_deref()
            .and_then(|c| c.split(';').next())
            .and_then(|pair| pair.strip_prefix(&format!("{SESSION_COOKIE}=")))
            .map(str::to_string)
            .expect("session cookie");
        *self.cookie.lock().expect("cookie jar") = Some(token);
    }

    /// Replace the session cookie this client holds.
    pub fn set_session_token(&self, token: Option<String>) {
        *self.cookie.lock().expect("cookie jar") = token;
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode `fields` as `application/x-www-form-urlencoded`.
pub fn form_body(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

fn encode(value: &str) -> String {
    let mut out = String::new();
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'*' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
