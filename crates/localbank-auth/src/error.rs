//! Auth-specific error types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Provider failure codes surfaced to the login page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum AuthErrorCode {
    /// Malformed email address.
    InvalidEmail,
    /// No account for this email.
    UserNotFound,
    /// Password does not match.
    WrongPassword,
    /// Email/password pair rejected without saying which part.
    InvalidCredential,
    /// Too many failed attempts.
    TooManyRequests,
    /// Account disabled by an administrator.
    UserDisabled,
    /// The provider could not be reached.
    Network,
    /// Anything else.
    Other,
}

impl AuthErrorCode {
    /// Stable code string (`invalid-email`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidEmail => "invalid-email",
            Self::UserNotFound => "user-not-found",
            Self::WrongPassword => "wrong-password",
            Self::InvalidCredential => "invalid-credential",
            Self::TooManyRequests => "too-many-requests",
            Self::UserDisabled => "user-disabled",
            Self::Network => "network",
            Self::Other => "other",
        }
    }

    /// Parse a code, with or without the `auth/` prefix. Unknown codes map
    /// to [`AuthErrorCode::Other`].
    pub fn from_code(code: &str) -> Self {
        match code.strip_prefix("auth/").unwrap_or(code) {
            "invalid-email" => Self::InvalidEmail,
            "user-not-found" => Self::UserNotFound,
            "wrong-password" => Self::WrongPassword,
            "invalid-credential" => Self::InvalidCredential,
            "too-many-requests" => Self::TooManyRequests,
            "user-disabled" => Self::UserDisabled,
            "network" | "network-request-failed" => Self::Network,
            _ => Self::Other,
        }
    }

    /// Message shown on the login page.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidEmail => "유효하지 않은 이메일 형식입니다",
            Self::UserNotFound => "등록되지 않은 사용자입니다",
            Self::WrongPassword => "비밀번호가 올바르지 않습니다",
            Self::InvalidCredential => "이메일 또는 비밀번호가 올바르지 않습니다",
            Self::TooManyRequests => {
                "로그인 시도 횟수가 초과되었습니다. 잠시 후 다시 시도해주세요"
            }
            _ => "로그인에 실패했습니다",
        }
    }
}

impl fmt::Display for AuthErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during authentication.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AuthError {
    /// The provider rejected the credentials.
    #[error("authentication rejected ({code}): {message}")]
    Rejected {
        /// Failure code.
        code: AuthErrorCode,
        /// Provider detail, for logs.
        message: String,
    },

    /// The provider could not be reached.
    #[error("auth provider unreachable: {0}")]
    Network(String),

    /// The provider answered with something unexpected.
    #[error("auth provider error: {0}")]
    Provider(String),

    /// Gateway misconfiguration (bad account entry, missing API key).
    #[error("auth configuration error: {0}")]
    Config(String),

    /// The admin session could not be recorded.
    #[error("session store error: {0}")]
    Session(String),
}

impl AuthError {
    /// Creates a rejection with the given code.
    pub fn rejected(code: AuthErrorCode, message: impl Into<String>) -> Self {
        AuthError::Rejected {
            code,
            message: message.into(),
        }
    }

    /// Failure code for this error.
    pub fn code(&self) -> AuthErrorCode {
        match self {
            AuthError::Rejected { code, .. } => *code,
            AuthError::Network(_) => AuthErrorCode::Network,
            AuthError::Provider(_) | AuthError::Config(_) | AuthError::Session(_) => {
                AuthErrorCode::Other
            }
        }
    }

    /// Localized message for the login page.
    pub fn user_message(&self) -> &'static str {
        self.code().user_message()
    }

    /// Whether the caller's input caused this error (vs. a server fault).
    pub fn is_client_error(&self) -> bool {
        matches!(self, AuthError::Rejected { .. })
    }
}
