//! Per-client admin sessions.
//!
//! A successful login mints a random token and records the signed-in
//! [`Principal`] under it in the local store. The browser carries the token
//! in the [`SESSION_COOKIE`] cookie; API clients may send it as an
//! `Authorization: Bearer` header instead.

use std::sync::Arc;

use http::HeaderMap;
use localbank_storage::LocalStore;
use uuid::Uuid;

use crate::error::AuthError;
use crate::user::Principal;

/// Prefix of the local store keys holding sessions.
pub const SESSION_KEY_PREFIX: &str = "admin-logged-in:";

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "localbank_session";

const TOKEN_LEN: usize = 64;

/// Signed-in admin sessions, keyed by token.
///
/// Read failures are logged and treated as "no session"; they never surface
/// to the guard.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn LocalStore>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("prefix", &SESSION_KEY_PREFIX)
            .finish()
    }
}

fn session_key(token: &str) -> String {
    format!("{SESSION_KEY_PREFIX}{token}")
}

fn is_well_formed(token: &str) -> bool {
    token.len() == TOKEN_LEN && token.bytes().all(|b| b.is_ascii_hexdigit())
}

impl SessionStore {
    /// Wrap a local store.
    pub fn new(store: Arc<dyn LocalStore>) -> Self {
        Self { store }
    }

    /// Start a session for `principal` and return its token.
    pub fn create(&self, principal: &Principal) -> Result<String, AuthError> {
        let token = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
        let value = serde_json::to_string(principal)
            .map_err(|e| AuthError::Session(format!("could not encode session: {e}")))?;
        self.store
            .set(&session_key(&token), &value)
            .map_err(|e| AuthError::Session(e.to_string()))?;
        Ok(token)
    }

    /// The principal signed in under `token`, if any.
    pub fn get(&self, token: &str) -> Option<Principal> {
        if !is_well_formed(token) {
            return None;
        }
        let raw = match self.store.get(&session_key(token)) {
            Ok(raw) => raw?,
            Err(e) => {
                log::warn!("Could not read admin session: {e}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(principal) => Some(principal),
            Err(e) => {
                log::warn!("Ignoring unreadable admin session: {e}");
                None
            }
        }
    }

    /// End the session under `token`.
    pub fn remove(&self, token: &str) {
        if !is_well_formed(token) {
            return;
        }
        if let Err(e) = self.store.remove(&session_key(token)) {
            log::warn!("Could not clear admin session: {e}");
        }
    }
}

/// Session token from the `Authorization: Bearer` header or the session
/// cookie, in that order.
pub fn session_token(headers: &HeaderMap) -> Option<&str> {
    let bearer = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));
    bearer.or_else(|| {
        headers
            .get_all(http::header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .map(|(_, value)| value)
    })
}

/// `Set-Cookie` value handing `token` to the browser.
pub fn session_cookie(token: &str) -> String {
    format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax")
}

/// `Set-Cookie` value that deletes the session cookie.
pub fn expired_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;
    use localbank_storage::{MemoryLocalStore, Result as StorageResult};

    struct BrokenStore;

    impl LocalStore for BrokenStore {
        fn get(&self, _key: &str) -> StorageResult<Option<String>> {
            Err(localbank_storage::Error::backend("unavailable"))
        }
        fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(localbank_storage::Error::backend("unavailable"))
        }
        fn remove(&self, _key: &str) -> StorageResult<()> {
            Err(localbank_storage::Error::backend("unavailable"))
        }
    }

    fn admin() -> Principal {
        Principal::new("uid-1", "admin@localbank.kr")
    }

    #[test]
    fn test_create_get_remove() {
        let store = Arc::new(MemoryLocalStore::new());
        let sessions = SessionStore::new(store.clone());

        let token = sessions.create(&admin()).unwrap();
        assert_eq!(token.len(), 64);
        assert_eq!(sessions.get(&token), Some(admin()));
        assert!(store.get(&session_key(&token)).unwrap().is_some());

        sessions.remove(&token);
        assert_eq!(sessions.get(&token), None);
    }

    #[test]
    fn test_tokens_are_independent() {
        let sessions = SessionStore::new(Arc::new(MemoryLocalStore::new()));
        let first = sessions.create(&admin()).unwrap();
        let second = sessions.create(&Principal::new("uid-2", "ops@localbank.kr")).unwrap();
        assert_ne!(first, second);

        sessions.remove(&first);
        assert_eq!(sessions.get(&first), None);
        assert_eq!(sessions.get(&second).unwrap().uid, "uid-2");
    }

    #[test]
    fn test_unknown_and_malformed_tokens() {
        let store = Arc::new(MemoryLocalStore::with_entries([(
            "admin-logged-in:true",
            r#"{"uid":"x","email":"x@y.kr"}"#,
        )]));
        let sessions = SessionStore::new(store);
        assert_eq!(sessions.get("true"), None);
        assert_eq!(sessions.get(&"0".repeat(64)), None);
        assert_eq!(sessions.get(""), None);
    }

    #[test]
    fn test_unreadable_record_is_no_session() {
        let token = "a".repeat(64);
        let store = Arc::new(MemoryLocalStore::with_entries([(
            session_key(&token).as_str(),
            "true",
        )]));
        assert_eq!(SessionStore::new(store).get(&token), None);
    }

    #[test]
    fn test_storage_failure() {
        let sessions = SessionStore::new(Arc::new(BrokenStore));
        assert!(matches!(
            sessions.create(&admin()),
            Err(AuthError::Session(_))
        ));
        assert_eq!(sessions.get(&"a".repeat(64)), None);
        sessions.remove(&"a".repeat(64));
    }

    #[test]
    fn test_token_from_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::COOKIE,
            HeaderValue::from_static("theme=dark; localbank_session=abc123; other=1"),
        );
        assert_eq!(session_token(&headers), Some("abc123"));
    }

    #[test]
    fn test_token_from_bearer_wins() {
        let mut headers = HeaderMap::new();
        headers.insert(
            http::header::COOKIE,
            HeaderValue::from_static("localbank_session=from-cookie"),
        );
        headers.insert(
            http::header::AUTHORIZATION,
            HeaderValue::from_static("Bearer from-header"),
        );
        assert_eq!(session_token(&headers), Some("from-header"));
    }

    #[test]
    fn test_no_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_token(&headers), None);
        headers.insert(
            http::header::COOKIE,
            HeaderValue::from_static("localbank_session_old=abc"),
        );
        assert_eq!(session_token(&headers), None);
        headers.insert(
            http::header::AUTHORIZATION,
            HeaderValue::from_static("Basic abc"),
        );
        assert_eq!(session_token(&headers), None);
    }

    #[test]
    fn test_cookie_values() {
        let cookie = session_cookie("abc");
        assert!(cookie.starts_with("localbank_session=abc;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(expired_session_cookie().contains("Max-Age=0"));
    }
}
