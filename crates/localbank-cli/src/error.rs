//! Error types for localbank-cli

use thiserror::Error;

/// Result type alias for localbank-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while assembling or running the server
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from localbank-core (configuration, IO)
    #[error("Core error: {0}")]
    Core(#[from] localbank_core::Error),

    /// A storage backend could not be opened
    #[error("Storage error: {0}")]
    Storage(#[from] localbank_storage::Error),

    /// The auth provider could not be configured
    #[error("Auth error: {0}")]
    Auth(#[from] localbank_auth::AuthError),

    /// The HTTP server failed
    #[error("Server error: {0}")]
    Api(#[from] localbank_api::Error),

    /// `server.host` / `server.port` do not form a listen address
    #[error("Invalid listen address '{addr}': {reason}")]
    Address {
        /// The address as configured
        addr: String,
        /// Why it was rejected
        reason: String,
    },
}
