//! Registered users and their validated components.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroizing;

/// Validation errors raised while building users from raw input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
    EmptyUsername,
    EmptyFirstName,
    EmptyLastName,
    EmptyPassword,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyFirstName => write!(f, "first name must not be empty"),
            Self::EmptyLastName => write!(f, "last name must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from its string form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Unique handle chosen at registration.
///
/// Surrounding whitespace is trimmed; comparison is otherwise exact and
/// case-sensitive, so `ana` and `Ana` are different users.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = username.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A trimmed, non-empty first or last name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    fn new(name: &str, empty: UserValidationError) -> Result<Self, UserValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Validate a first name.
    pub fn first(name: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::new(name.as_ref(), UserValidationError::EmptyFirstName)
    }

    /// Validate a last name.
    pub fn last(name: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::new(name.as_ref(), UserValidationError::EmptyLastName)
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Credential compared verbatim on sign-in.
///
/// The value is kept exactly as supplied (no trimming) and the buffer is
/// zeroed on drop. `Debug` never prints it.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordSecret(Zeroizing<String>);

impl PasswordSecret {
    /// Validate and wrap a password.
    pub fn new(password: impl Into<String>) -> Result<Self, UserValidationError> {
        let password = password.into();
        if password.is_empty() {
            return Err(UserValidationError::EmptyPassword);
        }
        Ok(Self(Zeroizing::new(password)))
    }

    /// Exact comparison against a candidate password.
    pub fn matches(&self, candidate: &str) -> bool {
        self.0.as_str() == candidate
    }

    pub(crate) fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordSecret(<redacted>)")
    }
}

/// Registered wall user.
///
/// ## Invariants
/// - `id` is a valid UUID and never changes.
/// - `username`, `first_name` and `last_name` are trimmed and non-empty.
/// - `password` is non-empty.
///
/// Serialised as camelCase JSON: `id`, `username`, `firstName`, `lastName`,
/// `passwordSecret`, `createdAt` (RFC 3339).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UserRecord", into = "UserRecord")]
pub struct User {
    id: UserId,
    username: Username,
    first_name: PersonName,
    last_name: PersonName,
    password: PasswordSecret,
    created_at: DateTime<Utc>,
}

/// Validated registration input for a user that does not exist yet.
///
/// # Examples
/// ```
/// use wall::domain::{Registration, UserValidationError};
///
/// let registration = Registration::try_from_parts(" ana ", "Ana", "Gomez", "secret1")?;
/// assert_eq!(registration.username.as_ref(), "ana");
///
/// let err = Registration::try_from_parts("ana", "  ", "Gomez", "secret1").unwrap_err();
/// assert_eq!(err, UserValidationError::EmptyFirstName);
/// # Ok::<(), UserValidationError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub username: Username,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub password: PasswordSecret,
}

impl Registration {
    /// Validate raw registration fields.
    ///
    /// Names are trimmed; the password is kept verbatim.
    pub fn try_from_parts(
        username: &str,
        first_name: &str,
        last_name: &str,
        password: &str,
    ) -> Result<Self, UserValidationError> {
        Ok(Self {
            username: Username::new(username)?,
            first_name: PersonName::first(first_name)?,
            last_name: PersonName::last(last_name)?,
            password: PasswordSecret::new(password)?,
        })
    }
}

impl User {
    /// Build a user from validated registration input.
    pub fn new(id: UserId, registration: Registration, created_at: DateTime<Utc>) -> Self {
        let Registration {
            username,
            first_name,
            last_name,
            password,
        } = registration;
        Self {
            id,
            username,
            first_name,
            last_name,
            password,
            created_at,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Unique username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// First name.
    pub fn first_name(&self) -> &PersonName {
        &self.first_name
    }

    /// Last name.
    pub fn last_name(&self) -> &PersonName {
        &self.last_name
    }

    /// Full name shown next to the user's posts.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Registration timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether `username` and `password` both match exactly.
    pub fn has_credentials(&self, username: &Username, password: &str) -> bool {
        &self.username == username && self.password.matches(password)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserRecord {
    id: String,
    username: String,
    first_name: String,
    last_name: String,
    password_secret: String,
    created_at: DateTime<Utc>,
}

impl From<User> for UserRecord {
    fn from(value: User) -> Self {
        Self {
            password_secret: value.password.expose().to_owned(),
            id: value.id.into(),
            username: value.username.0,
            first_name: value.first_name.0,
            last_name: value.last_name.0,
            created_at: value.created_at,
        }
    }
}

impl TryFrom<UserRecord> for User {
    type Error = UserValidationError;

    fn try_from(value: UserRecord) -> Result<Self, Self::Error> {
        let UserRecord {
            id,
            username,
            first_name,
            last_name,
            password_secret,
            created_at,
        } = value;
        let registration = Registration {
            username: Username::new(username)?,
            first_name: PersonName::first(first_name)?,
            last_name: PersonName::last(last_name)?,
            password: PasswordSecret::new(password_secret)?,
        };
        Ok(Self::new(UserId::new(id)?, registration, created_at))
    }
}
