//! Error types for localbank-whitelabel

use thiserror::Error;

/// Result type alias for localbank-whitelabel operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by remote configuration sync.
///
/// Local persistence never fails from the caller's point of view.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The configuration document could not be read or written.
    #[error("Remote configuration sync failed: {0}")]
    Storage(#[from] localbank_storage::Error),
}

impl Error {
    /// Returns `true` if the configuration document was unreadable rather
    /// than unreachable.
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            Error::Storage(localbank_storage::Error::Core(
                localbank_core::Error::Decode { .. }
            ))
        )
    }
}
