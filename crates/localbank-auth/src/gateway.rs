//! The authentication gateway seam and principal-change subscriptions.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, Weak};

use async_trait::async_trait;

use crate::error::AuthError;
use crate::user::Principal;

/// Callback invoked with the new principal (`None` after sign-out).
pub type PrincipalCallback = Box<dyn Fn(Option<&Principal>) + Send + Sync>;

/// Email/password identity provider.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Sign in. On success the principal becomes current and subscribers are
    /// notified.
    async fn login(&self, email: &str, password: &str) -> Result<Principal, AuthError>;

    /// Sign out. Subscribers are notified with `None`.
    async fn logout(&self) -> Result<(), AuthError>;

    /// The currently signed-in principal, if any.
    fn current_principal(&self) -> Option<Principal>;

    /// Register for principal changes. The callback is invoked once
    /// immediately with the current principal, then on every change until the
    /// returned [`Subscription`] is dropped or unsubscribed.
    fn on_principal_change(&self, callback: PrincipalCallback) -> Subscription;

    /// Provider name for diagnostics.
    fn name(&self) -> &str;
}

type SharedCallback = Arc<dyn Fn(Option<&Principal>) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    callbacks: BTreeMap<u64, SharedCallback>,
}

/// Subscriber list shared by gateway implementations.
#[derive(Clone, Default)]
pub struct PrincipalWatchers {
    registry: Arc<Mutex<Registry>>,
}

impl std::fmt::Debug for PrincipalWatchers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrincipalWatchers")
            .field("count", &self.len())
            .finish()
    }
}

impl PrincipalWatchers {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a callback, invoke it with `current`, and return its handle.
    pub fn subscribe(&self, callback: PrincipalCallback, current: Option<&Principal>) -> Subscription {
        let callback: SharedCallback = Arc::from(callback);
        let id = match self.registry.lock() {
            Ok(mut registry) => {
                let id = registry.next_id;
                registry.next_id += 1;
                registry.callbacks.insert(id, callback.clone());
                Some(id)
            }
            Err(_) => {
                log::warn!("principal watcher registry poisoned; subscription inactive");
                None
            }
        };
        callback(current);
        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Invoke every registered callback.
    pub fn notify(&self, principal: Option<&Principal>) {
        // Callbacks run outside the lock so they may unsubscribe.
        let callbacks: Vec<SharedCallback> = match self.registry.lock() {
            Ok(registry) => registry.callbacks.values().cloned().collect(),
            Err(_) => return,
        };
        for callback in callbacks {
            callback(principal);
        }
    }

    /// Number of live subscriptions.
    pub fn len(&self) -> usize {
        self.registry
            .lock()
            .map(|r| r.callbacks.len())
            .unwrap_or_default()
    }

    /// Whether there are no live subscriptions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle returned by [`AuthGateway::on_principal_change`].
///
/// Dropping it stops notifications.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    id: Option<u64>,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// Stop receiving notifications.
    pub fn unsubscribe(mut self) {
        self.detach();
    }

    fn detach(&mut self) {
        let Some(id) = self.id.take() else {
            return;
        };
        if let Some(registry) = self.registry.upgrade() {
            if let Ok(mut registry) = registry.lock() {
                registry.callbacks.remove(&id);
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.detach();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
