//! The single active session held by the wall.

use crate::domain::User;

/// Who is currently signed in, if anyone.
///
/// `NoSession --sign in--> Active(user) --sign out--> NoSession`. Signing in
/// while active replaces the user without passing through `NoSession`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    /// Nobody is signed in.
    #[default]
    NoSession,
    /// A copy of the signed-in user.
    Active(User),
}

impl Session {
    /// Build a session from its persisted form.
    pub fn from_user(user: Option<User>) -> Self {
        user.map_or(Self::NoSession, Self::Active)
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::NoSession => None,
            Self::Active(user) => Some(user),
        }
    }

    /// Whether someone is signed in.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }
}
