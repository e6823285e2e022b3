//! Signed-in identity and extraction helpers.

use serde::{Deserialize, Serialize};

/// The signed-in administrator.
///
/// The admin guard stores it in request extensions when the gateway reports
/// a live session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Provider-assigned user id.
    pub uid: String,
    /// Email address used to sign in.
    pub email: String,
}

impl Principal {
    /// Create a principal.
    pub fn new(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
        }
    }
}

/// Extract the [`Principal`] from HTTP request `Parts`, if present.
pub fn principal_from_parts(parts: &http::request::Parts) -> Option<&Principal> {
    parts.extensions.get::<Principal>()
}

/// Extract the signed-in email from HTTP request `Parts`.
///
/// Returns `"admin"` if no principal is present (outside the admin guard).
pub fn email_from_parts(parts: &http::request::Parts) -> &str {
    parts
        .extensions
        .get::<Principal>()
        .map(|p| p.email.as_str())
        .unwrap_or("admin")
}
