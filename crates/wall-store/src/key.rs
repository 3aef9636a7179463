//! Record key validation.
//!
//! Keys double as file stems in [`crate::DirStore`], so they are restricted to
//! a conservative character set that cannot escape the store directory.

use std::fmt;

use crate::error::StoreError;

/// Maximum length of a record key, in characters.
pub const RECORD_KEY_MAX: usize = 64;

/// Validated name of a stored record.
///
/// ## Invariants
/// - between 1 and [`RECORD_KEY_MAX`] characters long
/// - only ASCII letters, digits, `-` and `_`
///
/// # Example
///
/// ```
/// use wall_store::RecordKey;
///
/// let key = RecordKey::new("currentSession").expect("valid key");
/// assert_eq!(key.as_str(), "currentSession");
/// assert!(RecordKey::new("../etc/passwd").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordKey(String);

impl RecordKey {
    /// Validates and wraps a record name.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidKey`] when the name is empty, too long, or
    /// contains characters outside the allowed set.
    pub fn new(name: impl Into<String>) -> Result<Self, StoreError> {
        let key = name.into();
        if key.is_empty() {
            return Err(StoreError::InvalidKey {
                key,
                reason: "key must not be empty",
            });
        }
        if key.chars().count() > RECORD_KEY_MAX {
            return Err(StoreError::InvalidKey {
                key,
                reason: "key is longer than 64 characters",
            });
        }
        if !key.chars().all(is_valid_key_char) {
            return Err(StoreError::InvalidKey {
                key,
                reason: "only ASCII letters, digits, '-' and '_' are allowed",
            });
        }
        Ok(Self(key))
    }

    /// Returns the record name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// File name used when the record is stored on disk.
    pub(crate) fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

const fn is_valid_key_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

impl AsRef<str> for RecordKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for RecordKey {
    type Error = StoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("users")]
    #[case("posts")]
    #[case("currentSession")]
    #[case("feed_v2-backup")]
    fn accepts_plain_names(#[case] name: &str) {
        let key = RecordKey::new(name);
        assert_eq!(key.map(|k| k.file_name()), Ok(format!("{name}.json")));
    }

    #[rstest]
    #[case::empty("")]
    #[case::parent_dir("../users")]
    #[case::nested("a/b")]
    #[case::dotted("users.json")]
    #[case::space("current session")]
    #[case::non_ascii("café")]
    fn rejects_unsafe_names(#[case] name: &str) {
        let result = RecordKey::new(name);
        assert!(matches!(result, Err(StoreError::InvalidKey { .. })));
    }

    #[test]
    fn rejects_overlong_names() {
        let name = "k".repeat(RECORD_KEY_MAX + 1);
        let result = RecordKey::new(name);
        assert!(matches!(
            result,
            Err(StoreError::InvalidKey {
                reason: "key is longer than 64 characters",
                ..
            })
        ));
    }

    #[test]
    fn accepts_names_at_the_length_limit() {
        let name = "k".repeat(RECORD_KEY_MAX);
        assert!(RecordKey::new(name).is_ok());
    }
}
