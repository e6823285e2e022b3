//! # localbank-api
//!
//! HTTP server for LocalBank ONE.
//!
//! This crate provides:
//! - Public pages (home, services, notices, about, inquiry form)
//! - The admin console behind [`localbank_auth::AdminGuardLayer`]
//! - White-label settings editor with remote load/save
//! - JSON endpoints for the current configuration and health checks
//!
//! Pages are rendered server-side as plain HTML carrying the brand colors
//! inline.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod error;
pub mod routes;
pub mod server;
pub mod state;
pub mod views;

pub use error::{Error, Result};
pub use server::{build_router, serve, shutdown_signal};
pub use state::AppState;
