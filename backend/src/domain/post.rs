//! Wall posts and their validated content.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{User, UserId, UserValidationError};

/// Validation errors raised while building posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostValidationError {
    /// Content was empty once surrounding whitespace was removed.
    EmptyContent,
    /// Post ids start at 1.
    ZeroId,
    /// The snapshot of the author was invalid.
    Author(UserValidationError),
}

impl fmt::Display for PostValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "post content must not be empty"),
            Self::ZeroId => write!(f, "post id must be greater than zero"),
            Self::Author(err) => write!(f, "invalid post author: {err}"),
        }
    }
}

impl std::error::Error for PostValidationError {}

impl From<UserValidationError> for PostValidationError {
    fn from(value: UserValidationError) -> Self {
        Self::Author(value)
    }
}

/// Sequential post identifier.
///
/// Ids are assigned in creation order, so a larger id always means a newer
/// post. Listing uses this to order posts that share a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct PostId(u64);

impl PostId {
    /// The id given to the first post on an empty wall.
    pub const FIRST: Self = Self(1);

    /// Validate a raw id.
    pub fn new(value: u64) -> Result<Self, PostValidationError> {
        if value == 0 {
            return Err(PostValidationError::ZeroId);
        }
        Ok(Self(value))
    }

    /// The id following `self`.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Raw numeric value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<PostId> for u64 {
    fn from(value: PostId) -> Self {
        value.0
    }
}

impl TryFrom<u64> for PostId {
    type Error = PostValidationError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Post body with surrounding whitespace removed.
///
/// # Examples
/// ```
/// use wall::domain::PostContent;
///
/// let content = PostContent::new("  Hola mundo \n").unwrap();
/// assert_eq!(content.as_ref(), "Hola mundo");
/// assert!(PostContent::new(" \t ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostContent(String);

impl PostContent {
    /// Trim and validate post content.
    pub fn new(content: impl AsRef<str>) -> Result<Self, PostValidationError> {
        let trimmed = content.as_ref().trim();
        if trimmed.is_empty() {
            return Err(PostValidationError::EmptyContent);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for PostContent {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// A message on the wall.
///
/// ## Invariants
/// - Posts are immutable once created.
/// - The author name and username are a snapshot taken at creation time.
///
/// Serialised as camelCase JSON: `id`, `content`, `authorId`,
/// `authorDisplayName`, `authorUsername`, `createdAt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PostRecord", into = "PostRecord")]
pub struct Post {
    id: PostId,
    content: PostContent,
    author_id: UserId,
    author_display_name: String,
    author_username: String,
    created_at: DateTime<Utc>,
}

impl Post {
    /// Create a post authored by `author`.
    pub fn new(id: PostId, content: PostContent, author: &User, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            content,
            author_id: author.id().clone(),
            author_display_name: author.display_name(),
            author_username: author.username().to_string(),
            created_at,
        }
    }

    /// Sequential id.
    pub fn id(&self) -> PostId {
        self.id
    }

    /// Trimmed body.
    pub fn content(&self) -> &str {
        self.content.as_ref()
    }

    /// Id of the user who wrote the post.
    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }

    /// Author's full name when the post was written.
    pub fn author_display_name(&self) -> &str {
        self.author_display_name.as_str()
    }

    /// Author's username when the post was written.
    pub fn author_username(&self) -> &str {
        self.author_username.as_str()
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostRecord {
    id: u64,
    content: String,
    author_id: String,
    author_display_name: String,
    author_username: String,
    created_at: DateTime<Utc>,
}

impl From<Post> for PostRecord {
    fn from(value: Post) -> Self {
        Self {
            id: value.id.into(),
            content: value.content.0,
            author_id: value.author_id.into(),
            author_display_name: value.author_display_name,
            author_username: value.author_username,
            created_at: value.created_at,
        }
    }
}

impl TryFrom<PostRecord> for Post {
    type Error = PostValidationError;

    fn try_from(value: PostRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PostId::new(value.id)?,
            content: PostContent::new(value.content)?,
            author_id: UserId::new(value.author_id)?,
            author_display_name: value.author_display_name,
            author_username: value.author_username,
            created_at: value.created_at,
        })
    }
}
