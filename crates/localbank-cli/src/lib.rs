//! # localbank-cli
//!
//! The `localbank` binary for LocalBank ONE:
//! - `serve`: run the public site and admin console
//! - `config`: inspect and edit the TOML configuration
//! - `admin hash-password`: hash a password read from stdin for `[[auth.accounts]]`
//!
//! The library half exposes the configuration type and the wiring from
//! configuration to [`AppState`](localbank_api::AppState) so both can be
//! tested without starting a listener.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;
pub mod error;

pub use app::{build_gateway, build_state, listen_addr};
pub use cli::{AdminAction, Cli, Command, ConfigAction};
pub use config::LocalbankConfig;
pub use error::{Error, Result};
