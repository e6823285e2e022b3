//! JSON endpoints.

use axum::Json;
use axum::extract::State;
use localbank_core::WhiteLabelConfig;
use serde::Serialize;

use crate::state::AppState;

/// `GET /api/config`: the configuration every page is rendering with.
pub async fn config(State(state): State<AppState>) -> Json<WhiteLabelConfig> {
    Json(state.whitelabel.get_config())
}

/// Health check body.
#[derive(Debug, Serialize)]
pub struct Health {
    /// Always `ok` while the process serves requests.
    pub status: &'static str,
    /// Crate name.
    pub service: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// Auth gateway in use.
    pub auth: String,
    /// Document store in use.
    pub storage: String,
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        auth: state.auth.name().to_string(),
        storage: state.data.store().name().to_string(),
    })
}
