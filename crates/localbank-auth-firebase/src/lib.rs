//! Identity Toolkit (Firebase Auth) gateway for LocalBank ONE.
//!
//! Implements [`localbank_auth::AuthGateway`] over the REST endpoint
//! `accounts:signInWithPassword`:
//! - email/password sign-in returning the account's `localId`
//! - provider error codes mapped onto [`AuthErrorCode`]
//! - local sign-out and principal-change notifications

use std::sync::RwLock;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use localbank_auth::{
    AuthError, AuthErrorCode, AuthGateway, Principal, PrincipalCallback, PrincipalWatchers,
    Subscription,
};

/// Production Identity Toolkit endpoint.
pub const IDENTITY_TOOLKIT_URL: &str = "https://identitytoolkit.googleapis.com";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    local_id: String,
    email: String,
    #[serde(default)]
    id_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Clone)]
struct Session {
    principal: Principal,
    id_token: Option<String>,
}

/// Map an Identity Toolkit error message to a failure code.
///
/// Messages may carry detail after the code, as in
/// `TOO_MANY_ATTEMPTS_TRY_LATER : Access to this account has been disabled`.
pub fn map_error_code(message: &str) -> AuthErrorCode {
    let code = message.split(':').next().unwrap_or_default().trim();
    match code {
        "EMAIL_NOT_FOUND" => AuthErrorCode::UserNotFound,
        "INVALID_PASSWORD" => AuthErrorCode::WrongPassword,
        "INVALID_EMAIL" => AuthErrorCode::InvalidEmail,
        "INVALID_LOGIN_CREDENTIALS" => AuthErrorCode::InvalidCredential,
        "TOO_MANY_ATTEMPTS_TRY_LATER" => AuthErrorCode::TooManyRequests,
        "USER_DISABLED" => AuthErrorCode::UserDisabled,
        _ => AuthErrorCode::Other,
    }
}

/// Email/password gateway over the Identity Toolkit REST API.
pub struct IdentityToolkitGateway {
    api_key: String,
    base_url: String,
    http_client: reqwest::Client,
    session: RwLock<Option<Session>>,
    watchers: PrincipalWatchers,
}

impl std::fmt::Debug for IdentityToolkitGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityToolkitGateway")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl IdentityToolkitGateway {
    /// Create a gateway for the given web API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self, AuthError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(AuthError::Config("auth.api_key is empty".to_string()));
        }
        Ok(Self {
            api_key,
            base_url: IDENTITY_TOOLKIT_URL.to_string(),
            http_client: reqwest::Client::new(),
            session: RwLock::new(None),
            watchers: PrincipalWatchers::new(),
        })
    }

    /// Point the gateway at a different endpoint (emulator or test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// ID token of the current session, if the provider returned one.
    pub fn id_token(&self) -> Option<String> {
        self.session
            .read()
            .ok()
            .and_then(|s| s.as_ref().and_then(|s| s.id_token.clone()))
    }

    fn sign_in_url(&self) -> String {
        format!(
            "{}/v1/accounts:signInWithPassword?key={}",
            self.base_url, self.api_key
        )
    }

    fn set_session(&self, session: Option<Session>) {
        let principal = session.as_ref().map(|s| s.principal.clone());
        match self.session.write() {
            Ok(mut current) => *current = session,
            Err(_) => log::warn!("auth session lock poisoned"),
        }
        self.watchers.notify(principal.as_ref());
    }
}

#[async_trait]
impl AuthGateway for IdentityToolkitGateway {
    async fn login(&self, email: &str, password: &str) -> Result<Principal, AuthError> {
        let response = self
            .http_client
            .post(self.sign_in_url())
            .json(&SignInRequest {
                email: email.trim(),
                password,
                return_secure_token: true,
            })
            .send()
            .await
            .map_err(|e| AuthError::Network(format!("sign-in request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let envelope: ErrorEnvelope = response.json().await.map_err(|e| {
                AuthError::Provider(format!("sign-in failed (HTTP {status}): {e}"))
            })?;
            let code = map_error_code(&envelope.error.message);
            log::debug!("Sign-in rejected: {}", envelope.error.message);
            return Err(AuthError::rejected(code, envelope.error.message));
        }

        let body: SignInResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Provider(format!("sign-in response parse failed: {e}")))?;

        let principal = Principal::new(body.local_id, body.email);
        log::info!("Signed in {} via Identity Toolkit", principal.email);
        self.set_session(Some(Session {
            principal: principal.clone(),
            id_token: body.id_token,
        }));
        Ok(principal)
    }

    async fn logout(&self) -> Result<(), AuthError> {
        self.set_session(None);
        Ok(())
    }

    fn current_principal(&self) -> Option<Principal> {
        self.session
            .read()
            .ok()
            .and_then(|s| s.as_ref().map(|s| s.principal.clone()))
    }

    fn on_principal_change(&self, callback: PrincipalCallback) -> Subscription {
        let current = self.current_principal();
        self.watchers.subscribe(callback, current.as_ref())
    }

    fn name(&self) -> &str {
        "firebase"
    }
}
