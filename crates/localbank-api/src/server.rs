//! Router assembly and the listener loop.

use std::net::SocketAddr;

use axum::Router;
use axum::routing::{get, post};
use localbank_auth::{AdminGuardLayer, LOGIN_PATH};
use tower_http::trace::TraceLayer;

use crate::error::{Error, Result};
use crate::routes::{admin, api, public};
use crate::state::AppState;

/// Build the full application router.
///
/// The admin subtree, apart from the login page, is wrapped in
/// [`AdminGuardLayer`] as a route layer, so unknown `/admin/...` paths still
/// fall through to the 404 page.
pub fn build_router(state: AppState) -> Router {
    let guard = AdminGuardLayer::new(
        state.sessions.clone(),
        state.auth.clone(),
        state.guard.clone(),
    );

    let admin_routes = Router::new()
        .route("/admin", get(admin::root))
        .route("/admin/logout", post(admin::logout))
        .route("/admin/dashboard", get(admin::dashboard))
        .route(
            "/admin/notices",
            get(admin::notices).post(admin::create_notice),
        )
        .route("/admin/notices/{id}/delete", post(admin::delete_notice))
        .route("/admin/inquiries", get(admin::inquiries))
        .route(
            "/admin/inquiries/{id}/status",
            post(admin::update_inquiry_status),
        )
        .route(
            "/admin/settings",
            get(admin::settings).post(admin::update_settings),
        )
        .route(
            "/admin/settings/institution",
            post(admin::switch_institution),
        )
        .route("/admin/settings/save", post(admin::save_settings))
        .route_layer(guard);

    Router::new()
        .route("/", get(public::home))
        .route("/services", get(public::services))
        .route("/notices", get(public::notices))
        .route("/about", get(public::about))
        .route(
            "/inquiry",
            get(public::inquiry_form).post(public::submit_inquiry),
        )
        .route(LOGIN_PATH, get(admin::login_form).post(admin::login))
        .route("/api/config", get(api::config))
        .route("/health", get(api::health))
        .merge(admin_routes)
        .fallback(public::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C or SIGTERM.
pub async fn serve(state: AppState, addr: SocketAddr) -> Result<()> {
    if !state.guard.require_live_session {
        tracing::info!(
            "Admin sessions are not re-checked against the auth provider; \
             set admin.require_live_session = true to require a live sign-in"
        );
    }
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::io(e, addr))?;
    tracing::info!(%addr, "LocalBank ONE listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::io(e, addr))?;
    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for Ctrl-C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl-C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
