//! The `localbank` configuration file.
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 3000
//!
//! [storage]
//! backend = "filesystem"
//! data_dir = "/var/lib/localbank"
//!
//! [auth]
//! provider = "memory"
//!
//! [[auth.accounts]]
//! email = "admin@example.com"
//! password_hash = "<output of `localbank admin hash-password`>"
//!
//! [admin]
//! require_live_session = false
//! ```
//!
//! Every scalar can be overridden from the environment as
//! `LOCALBANK_<SECTION>_<KEY>`, e.g. `LOCALBANK_SERVER_PORT=8080`.

use std::path::PathBuf;

use localbank_core::ConfigManager;
use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalbankConfig {
    /// Listener settings.
    pub server: ServerConfig,
    /// Document and local store backends.
    pub storage: StorageConfig,
    /// Admin authentication provider.
    pub auth: AuthConfig,
    /// Admin console behaviour.
    pub admin: AdminConfig,
}

impl ConfigManager for LocalbankConfig {
    fn project_name() -> &'static str {
        "localbank"
    }
}

/// `[server]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind host or IP.
    pub host: String,
    /// Bind port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Which storage backend to run on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Everything in process memory; lost on restart.
    #[default]
    Memory,
    /// JSON snapshots under `data_dir`.
    Filesystem,
}

/// `[storage]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Backend selector.
    pub backend: StorageBackend,
    /// Directory for the filesystem backend.
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            data_dir: PathBuf::from("data"),
        }
    }
}

/// Which identity provider checks admin credentials.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    /// Accounts listed under `[[auth.accounts]]`.
    #[default]
    Memory,
    /// Firebase Auth (Identity Toolkit) email/password sign-in.
    Firebase,
}

/// `[auth]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Provider selector.
    pub provider: AuthProvider,
    /// Web API key for the `firebase` provider.
    pub api_key: String,
    /// Endpoint override for the `firebase` provider (emulator); empty for
    /// the public endpoint.
    pub base_url: String,
    /// Accounts for the `memory` provider.
    pub accounts: Vec<AccountConfig>,
}

/// One `[[auth.accounts]]` entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Sign-in email.
    pub email: String,
    /// Argon2 PHC string of the password (`$argon2id$...`).
    pub password_hash: String,
}

/// `[admin]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Also require a live provider session on every admin request, not just
    /// a known session cookie.
    pub require_live_session: bool,
}
