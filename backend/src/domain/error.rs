//! Domain-level error types.
//!
//! These errors are presentation agnostic. The CLI adapter renders the
//! message; any other view is free to branch on the [`ErrorCode`].

use serde::Serialize;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The input failed validation before reaching the wall.
    InvalidRequest,
    /// Registration used a username that already exists.
    DuplicateUsername,
    /// No user matches the supplied username and password.
    InvalidCredentials,
    /// The operation needs an active session.
    NotAuthenticated,
    /// The persistent store rejected a read or write.
    StorageUnavailable,
    /// Stored data is unreadable or internal state is inconsistent.
    InternalError,
}

/// Domain error payload.
///
/// Every wall operation returns this on failure; none of them abort the
/// process. The caller may retry immediately with corrected input.
///
/// # Examples
/// ```
/// use wall::domain::{Error, ErrorCode};
///
/// let err = Error::not_authenticated("sign in to post");
/// assert_eq!(err.code(), ErrorCode::NotAuthenticated);
/// assert_eq!(err.to_string(), "sign in to post");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Error {
    code: ErrorCode,
    message: String,
}

impl Error {
    /// Create a new error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message for the view.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Convenience constructor for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Convenience constructor for [`ErrorCode::DuplicateUsername`].
    pub fn duplicate_username(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DuplicateUsername, message)
    }

    /// Convenience constructor for [`ErrorCode::InvalidCredentials`].
    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidCredentials, message)
    }

    /// Convenience constructor for [`ErrorCode::NotAuthenticated`].
    pub fn not_authenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotAuthenticated, message)
    }

    /// Convenience constructor for [`ErrorCode::StorageUnavailable`].
    pub fn storage_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageUnavailable, message)
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}
