//! Domain primitives, ports and the wall service.
//!
//! Purpose: Define strongly typed entities for the wall and the service that
//! owns the user registry, session slot and post ledger. Keep types immutable
//! and document invariants and serialisation contracts (serde) in each type's
//! Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): domain error payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - User, Registration: registered users and validated registration input.
//! - LoginCredentials: validated sign-in input.
//! - Post, PostContent, PostId: wall posts.
//! - Session: the signed-in user, if any.
//! - WallService: registration, sign-in/out and the post ledger.

pub mod auth;
pub mod error;
pub mod ports;
pub mod post;
pub mod session;
pub mod user;
mod wall_service;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode};
pub use self::post::{Post, PostContent, PostId, PostValidationError};
pub use self::session::Session;
pub use self::user::{
    PasswordSecret, PersonName, Registration, User, UserId, UserValidationError, Username,
};
pub use self::wall_service::WallService;

/// Convenient result alias for wall operations.
///
/// # Examples
/// ```
/// use wall::domain::{Error, WallResult};
///
/// fn guarded() -> WallResult<()> {
///     Err(Error::not_authenticated("sign in first"))
/// }
///
/// assert!(guarded().is_err());
/// ```
pub type WallResult<T> = Result<T, Error>;
