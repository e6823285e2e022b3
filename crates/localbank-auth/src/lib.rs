//! Authentication primitives for the LocalBank ONE admin console.
//!
//! Provides:
//! - [`AuthGateway`]: async trait over an email/password identity provider
//! - [`Principal`]: the signed-in identity
//! - [`AuthError`] / [`AuthErrorCode`]: provider-coded failures with localized messages
//! - [`Subscription`] / [`PrincipalWatchers`]: principal-change notifications
//! - [`MemoryAuthGateway`]: accounts configured with Argon2 password hashes
//! - [`SessionStore`]: per-client admin sessions keyed by a cookie or bearer token
//! - [`AdminGuardLayer`] / [`AdminGuardService`]: Tower middleware for the admin subtree

mod error;
mod gateway;
mod memory;
mod middleware;
mod session;
mod user;

pub use error::{AuthError, AuthErrorCode};
pub use gateway::{AuthGateway, PrincipalCallback, PrincipalWatchers, Subscription};
pub use memory::{LOCKOUT_WINDOW, MAX_FAILED_ATTEMPTS, MemoryAuthGateway, hash_password};
pub use middleware::{AdminGuardLayer, AdminGuardService, GuardConfig, LOGIN_PATH};
pub use session::{
    SESSION_COOKIE, SESSION_KEY_PREFIX, SessionStore, expired_session_cookie, session_cookie,
    session_token,
};
pub use user::{Principal, email_from_parts, principal_from_parts};
