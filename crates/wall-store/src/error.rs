//! Error types for the wall-store crate.
//!
//! Store failures are split by the phase that failed so callers can tell an
//! unavailable medium apart from a record that exists but cannot be parsed.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised by [`crate::KeyValueStore`] implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The record name cannot be used as a key.
    #[error("invalid record key '{key}': {reason}")]
    InvalidKey {
        /// The rejected key.
        key: String,
        /// Why the key was rejected.
        reason: &'static str,
    },

    /// The store directory could not be created or opened.
    #[error("failed to open store directory '{path}': {message}")]
    Open {
        /// Directory that was being opened.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The medium refused a read, write or removal.
    #[error("storage unavailable for record '{key}': {message}")]
    Unavailable {
        /// Record that was being accessed.
        key: String,
        /// Description of the underlying failure.
        message: String,
    },

    /// A record exists but does not hold valid JSON.
    #[error("record '{key}' is not valid JSON: {message}")]
    Corrupt {
        /// Record that failed to parse.
        key: String,
        /// Parser error message.
        message: String,
    },

    /// Another thread panicked while holding the store lock.
    #[error("store lock poisoned")]
    Poisoned,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_key_formats_correctly() {
        let err = StoreError::InvalidKey {
            key: "../users".to_owned(),
            reason: "only ASCII letters, digits, '-' and '_' are allowed",
        };
        assert_eq!(
            err.to_string(),
            "invalid record key '../users': only ASCII letters, digits, '-' and '_' are allowed"
        );
    }

    #[test]
    fn open_formats_correctly() {
        let err = StoreError::Open {
            path: Utf8PathBuf::from("/var/lib/wall"),
            message: "permission denied".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "failed to open store directory '/var/lib/wall': permission denied"
        );
    }

    #[test]
    fn unavailable_formats_correctly() {
        let err = StoreError::Unavailable {
            key: "posts".to_owned(),
            message: "no space left on device".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "storage unavailable for record 'posts': no space left on device"
        );
    }

    #[test]
    fn corrupt_formats_correctly() {
        let err = StoreError::Corrupt {
            key: "users".to_owned(),
            message: "expected value at line 1 column 1".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "record 'users' is not valid JSON: expected value at line 1 column 1"
        );
    }
}
