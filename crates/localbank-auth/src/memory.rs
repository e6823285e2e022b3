//! In-process gateway backed by a fixed account list.

use std::collections::HashMap;
use std::sync::{Mutex, RwLock};
use std::time::{Duration, Instant};

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use async_trait::async_trait;

use crate::error::{AuthError, AuthErrorCode};
use crate::gateway::{AuthGateway, PrincipalCallback, PrincipalWatchers, Subscription};
use crate::user::Principal;

/// Consecutive failed logins for one email before it is locked out.
pub const MAX_FAILED_ATTEMPTS: u32 = 5;

/// How long a locked-out email stays locked.
pub const LOCKOUT_WINDOW: Duration = Duration::from_secs(15 * 60);

/// Argon2id PHC string for a password, as stored in account configuration.
///
/// Each call draws a fresh salt, so hashing the same password twice gives
/// different strings.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Config(format!("could not hash password: {e}")))
}

fn verify_password(password: &str, phc: &str) -> bool {
    match PasswordHash::new(phc) {
        Ok(hash) => Argon2::default()
            .verify_password(password.as_bytes(), &hash)
            .is_ok(),
        Err(e) => {
            log::warn!("Unreadable stored password hash: {e}");
            false
        }
    }
}

#[derive(Debug, Clone)]
struct Account {
    uid: String,
    password_hash: String,
    disabled: bool,
}

#[derive(Debug, Clone, Copy, Default)]
struct Failures {
    count: u32,
    locked_until: Option<Instant>,
}

/// Gateway over accounts configured with Argon2 password hashes.
///
/// The provider-side principal is process-wide; per-client admin sessions
/// live in [`crate::SessionStore`].
#[derive(Debug)]
pub struct MemoryAuthGateway {
    accounts: HashMap<String, Account>,
    failures: Mutex<HashMap<String, Failures>>,
    lockout_window: Duration,
    current: RwLock<Option<Principal>>,
    watchers: PrincipalWatchers,
}

impl Default for MemoryAuthGateway {
    fn default() -> Self {
        Self {
            accounts: HashMap::new(),
            failures: Mutex::new(HashMap::new()),
            lockout_window: LOCKOUT_WINDOW,
            current: RwLock::new(None),
            watchers: PrincipalWatchers::default(),
        }
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

impl MemoryAuthGateway {
    /// Create a gateway with no accounts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an account given the PHC string of its password hash (see
    /// [`hash_password`]).
    pub fn with_account(mut self, email: &str, password_hash: &str) -> Result<Self, AuthError> {
        let password_hash = password_hash.trim();
        PasswordHash::new(password_hash).map_err(|e| {
            AuthError::Config(format!("invalid password hash for {email}: {e}"))
        })?;
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(AuthError::Config(format!("invalid account email '{email}'")));
        }
        let uid = blake3::hash(email.as_bytes()).to_hex().as_str()[..16].to_string();
        self.accounts.insert(
            email,
            Account {
                uid,
                password_hash: password_hash.to_string(),
                disabled: false,
            },
        );
        Ok(self)
    }

    /// Add an account from a plaintext password.
    pub fn with_password(self, email: &str, password: &str) -> Result<Self, AuthError> {
        let hash = hash_password(password)?;
        self.with_account(email, &hash)
    }

    /// How long an email stays locked after [`MAX_FAILED_ATTEMPTS`]
    /// failures. Defaults to [`LOCKOUT_WINDOW`].
    pub fn with_lockout_window(mut self, window: Duration) -> Self {
        self.lockout_window = window;
        self
    }

    /// Mark an account as disabled.
    pub fn disable(mut self, email: &str) -> Self {
        if let Some(account) = self.accounts.get_mut(&normalize_email(email)) {
            account.disabled = true;
        }
        self
    }

    /// Number of configured accounts.
    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }

    fn set_current(&self, principal: Option<Principal>) {
        match self.current.write() {
            Ok(mut current) => *current = principal.clone(),
            Err(_) => log::warn!("auth session lock poisoned"),
        }
        self.watchers.notify(principal.as_ref());
    }

    fn record_failure(&self, email: &str) {
        if let Ok(mut failures) = self.failures.lock() {
            let entry = failures.entry(email.to_string()).or_default();
            entry.count += 1;
            if entry.count >= MAX_FAILED_ATTEMPTS {
                entry.locked_until = Some(Instant::now() + self.lockout_window);
            }
        }
    }

    /// Whether `email` is inside its lockout window. An expired lock is
    /// dropped together with its failure count.
    fn locked_out(&self, email: &str) -> bool {
        let Ok(mut failures) = self.failures.lock() else {
            return false;
        };
        match failures.get(email).and_then(|f| f.locked_until) {
            Some(until) if Instant::now() < until => true,
            Some(_) => {
                failures.remove(email);
                false
            }
            None => false,
        }
    }

    fn clear_failures(&self, email: &str) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.remove(email);
        }
    }
}

#[async_trait]
impl AuthGateway for MemoryAuthGateway {
    async fn login(&self, email: &str, password: &str) -> Result<Principal, AuthError> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(AuthError::rejected(
                AuthErrorCode::InvalidEmail,
                format!("'{email}' is not an email address"),
            ));
        }
        let Some(account) = self.accounts.get(&email) else {
            return Err(AuthError::rejected(
                AuthErrorCode::UserNotFound,
                format!("no account for {email}"),
            ));
        };
        if account.disabled {
            return Err(AuthError::rejected(
                AuthErrorCode::UserDisabled,
                format!("{email} is disabled"),
            ));
        }
        if self.locked_out(&email) {
            return Err(AuthError::rejected(
                AuthErrorCode::TooManyRequests,
                format!("{email} locked after {MAX_FAILED_ATTEMPTS} failures"),
            ));
        }
        if !verify_password(password, &account.password_hash) {
            self.record_failure(&email);
            return Err(AuthError::rejected(
                AuthErrorCode::WrongPassword,
                format!("password mismatch for {email}"),
            ));
        }

        self.clear_failures(&email);
        let principal = Principal::new(account.uid.clone(), email);
        log::debug!("Signed in {}", principal.email);
        self.set_current(Some(principal.clone()));
        Ok(principal)
    }

    async fn logout(&self) -> Result<(), AuthError> {
        self.set_current(None);
        log::debug!("Signed out");
        Ok(())
    }

    fn current_principal(&self) -> Option<Principal> {
        self.current.read().ok().and_then(|p| p.clone())
    }

    fn on_principal_change(&self, callback: PrincipalCallback) -> Subscription {
        let current = self.current_principal();
        self.watchers.subscribe(callback, current.as_ref())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
