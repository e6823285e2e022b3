//! # localbank-whitelabel
//!
//! The white-label configuration store: one process-wide branding object
//! read by every page and changed only through a shallow-merge update.

#![doc = include_str!("../README.md")]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod merge;
mod proptests;
pub mod store;

pub use error::{Error, Result};
pub use merge::{apply_patch, merged};
pub use store::{LOCAL_CONFIG_KEY, WhiteLabelStore};
