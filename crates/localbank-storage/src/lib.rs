//! # localbank-storage
//!
//! Storage backends and the data access layer for LocalBank ONE.
//!
//! This crate provides:
//! - Storage abstraction traits ([`DocumentStore`], [`LocalStore`])
//! - In-memory backends (for testing and ephemeral deployments)
//! - Filesystem backends (JSON snapshot / JSON object file)
//! - Timestamp normalization
//! - The typed data access layer ([`DataAccess`])

#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod data;
pub mod error;
pub mod filesystem;
pub mod memory;
pub mod timestamp;
pub mod traits;

pub use data::DataAccess;
pub use error::{Error, Result};
pub use filesystem::{FileDocumentStore, FileLocalStore};
pub use memory::{MemoryDocumentStore, MemoryLocalStore};
pub use timestamp::Timestamp;
pub use traits::{Direction, Document, DocumentStore, Fields, Filter, LocalStore, OrderBy, Query};
