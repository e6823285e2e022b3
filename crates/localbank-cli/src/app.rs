//! Wiring from [`LocalbankConfig`] to a ready [`AppState`].

use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;

use localbank_api::AppState;
use localbank_auth::{AuthGateway, GuardConfig, MemoryAuthGateway};
use localbank_auth_firebase::IdentityToolkitGateway;
use localbank_storage::{
    DataAccess, DocumentStore, FileDocumentStore, FileLocalStore, LocalStore,
    MemoryDocumentStore, MemoryLocalStore,
};

use crate::config::{AuthConfig, AuthProvider, LocalbankConfig, StorageBackend};
use crate::error::{Error, Result};

/// Open the configured backends and auth provider.
pub fn build_state(config: &LocalbankConfig) -> Result<AppState> {
    let (documents, local): (Arc<dyn DocumentStore>, Arc<dyn LocalStore>) =
        match config.storage.backend {
            StorageBackend::Memory => {
                tracing::warn!("Using in-memory storage; content is lost on restart");
                (
                    Arc::new(MemoryDocumentStore::new()),
                    Arc::new(MemoryLocalStore::new()),
                )
            }
            StorageBackend::Filesystem => {
                let dir = &config.storage.data_dir;
                tracing::info!(data_dir = %dir.display(), "Using filesystem storage");
                (
                    Arc::new(FileDocumentStore::open(dir)?),
                    Arc::new(FileLocalStore::open(dir)?),
                )
            }
        };

    let auth = build_gateway(&config.auth)?;
    let guard = GuardConfig {
        require_live_session: config.admin.require_live_session,
        ..GuardConfig::default()
    };

    Ok(AppState::with_local_store(local, DataAccess::new(documents), auth).with_guard(guard))
}

/// Construct the auth provider named by `[auth]`.
pub fn build_gateway(config: &AuthConfig) -> Result<Arc<dyn AuthGateway>> {
    match config.provider {
        AuthProvider::Memory => {
            let mut gateway = MemoryAuthGateway::new();
            for account in &config.accounts {
                gateway = gateway.with_account(&account.email, &account.password_hash)?;
            }
            if gateway.account_count() == 0 {
                tracing::warn!("No [[auth.accounts]] configured; nobody can sign in");
            }
            Ok(Arc::new(gateway))
        }
        AuthProvider::Firebase => {
            let mut gateway = IdentityToolkitGateway::new(config.api_key.as_str())?;
            if !config.base_url.trim().is_empty() {
                gateway = gateway.with_base_url(config.base_url.as_str());
            }
            Ok(Arc::new(gateway))
        }
    }
}

/// Resolve `host:port` to the address to bind.
pub fn listen_addr(host: &str, port: u16) -> Result<SocketAddr> {
    let addr = format!("{host}:{port}");
    (host, port)
        .to_socket_addrs()
        .map_err(|e| Error::Address {
            addr: addr.clone(),
            reason: e.to_string(),
        })?
        .next()
        .ok_or_else(|| Error::Address {
            addr,
            reason: "no addresses resolved".to_string(),
        })
}
