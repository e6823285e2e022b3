//! Error types for localbank-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use localbank_auth::AuthError;
use localbank_core::brand;
use thiserror::Error;

use crate::views;

/// Result type alias for localbank-api operations
pub type Result<T> = std::result::Result<T, Error>;

/// Shown for every failure the visitor cannot fix by editing the form.
pub const UNAVAILABLE_MESSAGE: &str =
    "일시적인 오류로 요청을 처리하지 못했습니다. 잠시 후 다시 시도해주세요.";

/// Shown when the addressed notice or inquiry no longer exists.
pub const NOT_FOUND_MESSAGE: &str = "요청하신 항목을 찾을 수 없습니다.";

/// Errors that can occur in localbank-api
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from localbank-core
    #[error("Core error: {0}")]
    Core(#[from] localbank_core::Error),

    /// Error from localbank-storage
    #[error("Storage error: {0}")]
    Storage(#[from] localbank_storage::Error),

    /// Error from localbank-whitelabel
    #[error("White-label error: {0}")]
    WhiteLabel(#[from] localbank_whitelabel::Error),

    /// Error from the auth gateway
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Listener or socket failure.
    #[error("Server I/O error on {addr}: {source}")]
    Io {
        /// Address being served.
        addr: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create an I/O error for a listener address.
    pub fn io(source: std::io::Error, addr: impl std::fmt::Display) -> Self {
        Self::Io {
            addr: addr.to_string(),
            source,
        }
    }

    /// The validation failure carried by this error, if any.
    pub fn validation(&self) -> Option<&localbank_core::Error> {
        match self {
            Error::Core(e) if e.is_user_error() => Some(e),
            Error::Storage(localbank_storage::Error::Core(e)) if e.is_user_error() => Some(e),
            _ => None,
        }
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        if self.validation().is_some() {
            return StatusCode::UNPROCESSABLE_ENTITY;
        }
        match self {
            Error::Storage(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            Error::Auth(e) if e.is_client_error() => StatusCode::UNAUTHORIZED,
            Error::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_GATEWAY,
        }
    }

    /// Message safe to show to a visitor.
    ///
    /// Backend details stay in the logs.
    pub fn public_message(&self) -> String {
        if let Some(e) = self.validation() {
            return match e {
                localbank_core::Error::Validation { message, .. } => message.clone(),
                other => other.to_string(),
            };
        }
        match self {
            Error::Storage(e) if e.is_not_found() => NOT_FOUND_MESSAGE.to_string(),
            Error::Auth(e) => e.user_message().to_string(),
            _ => UNAVAILABLE_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }
        let page = views::layout::error_page(
            &brand::default_config(),
            status,
            &self.public_message(),
            "/",
        );
        (status, page).into_response()
    }
}
