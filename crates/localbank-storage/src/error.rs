//! Error types for localbank-storage

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for localbank-storage operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in localbank-storage
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from localbank-core
    #[error("Core error: {0}")]
    Core(#[from] localbank_core::Error),

    /// The addressed document does not exist.
    #[error("Document not found: {collection}/{id}")]
    NotFound {
        /// Collection name
        collection: String,
        /// Document id
        id: String,
    },

    /// The backing service failed.
    #[error("Storage backend error: {message}")]
    Backend {
        /// Human-readable error message
        message: String,
        /// Source error if available
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O error tied to a specific path
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Creates a not-found error.
    pub fn not_found(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Error::NotFound {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// Creates a backend error with a message.
    pub fn backend<S: Into<String>>(message: S) -> Self {
        Error::Backend {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a backend error with a message and source error.
    pub fn backend_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Backend {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Wraps an I/O error with the path it occurred on.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// A stored record could not be decoded.
    pub fn decode<S: Into<String>>(message: S) -> Self {
        Error::Core(localbank_core::Error::decode(message))
    }

    /// Returns `true` for [`Error::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_not_found_display() {
        let err = Error::not_found("notices", "abc");
        assert_eq!(err.to_string(), "Document not found: notices/abc");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_backend_with_source_keeps_cause() {
        let err = Error::backend_with_source("write failed", std::io::Error::other("disk full"));
        assert_eq!(err.to_string(), "Storage backend error: write failed");
        assert!(err.source().is_some());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_decode_wraps_core() {
        let err = Error::decode("missing createdAt");
        assert!(matches!(err, Error::Core(localbank_core::Error::Decode { .. })));
    }
}
