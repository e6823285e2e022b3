//! Request handlers.
//!
//! - [`public`]: visitor-facing pages
//! - [`admin`]: login and the guarded console
//! - [`api`]: JSON endpoints

pub mod admin;
pub mod api;
pub mod public;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::error::Error;
use crate::state::AppState;
use crate::views;

/// Render a failed write as a branded error page with a link back.
pub(crate) fn failure(state: &AppState, error: Error, back: &str) -> Response {
    let status = error.status();
    if status.is_server_error() {
        tracing::error!(error = %error, back, "Request failed");
    } else {
        tracing::debug!(error = %error, back, "Request rejected");
    }
    let page = views::layout::error_page(
        &state.whitelabel.get_config(),
        status,
        &error.public_message(),
        back,
    );
    (status, page).into_response()
}

/// Field name and message of a validation failure, for inline display.
pub(crate) fn invalid_field(error: &Error) -> Option<(String, String)> {
    error.validation().map(|e| {
        (
            e.field().unwrap_or_default().to_string(),
            error.public_message(),
        )
    })
}

/// A page re-rendered because the submitted form was invalid.
pub(crate) fn unprocessable(page: Html<String>) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, page).into_response()
}
