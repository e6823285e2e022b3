//! Tower middleware guarding the admin console.
//!
//! `AdminGuardLayer` and `AdminGuardService` wrap any inner service with the
//! session check. Requests that carry no known session token are redirected
//! to the login page with `303 See Other`.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::response::{IntoResponse, Redirect};
use http::Request;
use tower::{Layer, Service};

use crate::gateway::AuthGateway;
use crate::session::{SessionStore, session_token};

/// Default login page path.
pub const LOGIN_PATH: &str = "/admin/login";

/// Configuration for the admin guard.
#[derive(Clone, Debug)]
pub struct GuardConfig {
    /// Also require the gateway to report the session's principal as
    /// signed in. A session without one is treated as stale and removed.
    pub require_live_session: bool,
    /// Where unauthenticated requests are sent.
    pub login_path: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            require_live_session: false,
            login_path: LOGIN_PATH.to_string(),
        }
    }
}

/// Tower `Layer` that wraps services with the admin session check.
#[derive(Clone)]
pub struct AdminGuardLayer {
    sessions: SessionStore,
    gateway: Arc<dyn AuthGateway>,
    config: GuardConfig,
}

impl AdminGuardLayer {
    /// Create a guard over the given sessions and gateway.
    pub fn new(sessions: SessionStore, gateway: Arc<dyn AuthGateway>, config: GuardConfig) -> Self {
        Self {
            sessions,
            gateway,
            config,
        }
    }
}

impl<S> Layer<S> for AdminGuardLayer {
    type Service = AdminGuardService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AdminGuardService {
            inner,
            sessions: self.sessions.clone(),
            gateway: self.gateway.clone(),
            config: self.config.clone(),
        }
    }
}

/// Tower `Service` that checks the session before forwarding requests.
///
/// The session's [`crate::Principal`] is inserted into request extensions
/// for downstream handlers.
#[derive(Clone)]
pub struct AdminGuardService<S> {
    inner: S,
    sessions: SessionStore,
    gateway: Arc<dyn AuthGateway>,
    config: GuardConfig,
}

impl<S> Service<Request<Body>> for AdminGuardService<S>
where
    S: Service<Request<Body>, Error = Infallible> + Clone + Send + 'static,
    S::Response: IntoResponse,
    S::Future: Send,
{
    type Response = axum::response::Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<Body>) -> Self::Future {
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        let sessions = self.sessions.clone();
        let gateway = self.gateway.clone();
        let config = self.config.clone();

        Box::pin(async move {
            let token = session_token(req.headers()).map(str::to_string);
            let Some((token, principal)) =
                token.and_then(|t| sessions.get(&t).map(|p| (t, p)))
            else {
                log::debug!("No admin session for {}", req.uri().path());
                return Ok(Redirect::to(&config.login_path).into_response());
            };

            if config.require_live_session
                && gateway
                    .current_principal()
                    .is_none_or(|live| live.uid != principal.uid)
            {
                log::warn!("Stale admin session for {} removed", principal.email);
                sessions.remove(&token);
                return Ok(Redirect::to(&config.login_path).into_response());
            }
            req.extensions_mut().insert(principal);

            let resp = inner
                .call(req)
                .await
                .unwrap_or_else(|infallible| match infallible {});
            Ok(resp.into_response())
        })
    }
}
