//! Shared application state handed to every handler.

use std::sync::Arc;

use localbank_auth::{AuthGateway, GuardConfig, SessionStore};
use localbank_storage::{DataAccess, LocalStore, MemoryDocumentStore, MemoryLocalStore};
use localbank_whitelabel::WhiteLabelStore;

/// Everything a request handler can reach.
///
/// Cloned per request by axum; all members are cheap handles.
#[derive(Clone)]
pub struct AppState {
    /// The process-wide branding object.
    pub whitelabel: Arc<WhiteLabelStore>,
    /// Notices, inquiries and the remote configuration document.
    pub data: DataAccess,
    /// Remote authentication provider.
    pub auth: Arc<dyn AuthGateway>,
    /// Per-client admin sessions.
    pub sessions: SessionStore,
    /// Admin guard behavior.
    pub guard: GuardConfig,
}

impl AppState {
    /// Assemble state from its parts with the default guard configuration.
    pub fn new(
        whitelabel: Arc<WhiteLabelStore>,
        data: DataAccess,
        auth: Arc<dyn AuthGateway>,
        sessions: SessionStore,
    ) -> Self {
        Self {
            whitelabel,
            data,
            auth,
            sessions,
            guard: GuardConfig::default(),
        }
    }

    /// Build state over a shared local store.
    ///
    /// The white-label cache and the admin sessions live side by side in
    /// `local`, the way they share one key/value space in a deployment.
    pub fn with_local_store(
        local: Arc<dyn LocalStore>,
        data: DataAccess,
        auth: Arc<dyn AuthGateway>,
    ) -> Self {
        Self::new(
            Arc::new(WhiteLabelStore::new(local.clone())),
            data,
            auth,
            SessionStore::new(local),
        )
    }

    /// Build state entirely over in-memory backends.
    pub fn in_memory(auth: Arc<dyn AuthGateway>) -> Self {
        Self::with_local_store(
            Arc::new(MemoryLocalStore::new()),
            DataAccess::new(Arc::new(MemoryDocumentStore::new())),
            auth,
        )
    }

    /// Replace the guard configuration.
    pub fn with_guard(mut self, guard: GuardConfig) -> Self {
        self.guard = guard;
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("data", &self.data)
            .field("auth", &self.auth.name())
            .field("guard", &self.guard)
            .finish_non_exhaustive()
    }
}
