//! The wall: user registry, session slot and post ledger.
//!
//! `WallService` is the only writer of persisted wall state. Every mutating
//! operation builds the next version of a record, writes it through the
//! [`PersistentStore`] port, and only then swaps it into memory, so a failed
//! write leaves the service exactly as it was.

use std::sync::{Arc, Mutex, MutexGuard};

use mockable::Clock;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::domain::ports::{PersistentStore, PersistentStoreError, WallRecord};
use crate::domain::{
    Error, LoginCredentials, Post, PostContent, PostId, Registration, Session, User, UserId,
    Username, WallResult,
};

#[derive(Debug, Default)]
struct WallState {
    users: Vec<User>,
    posts: Vec<Post>,
    session: Session,
}

impl WallState {
    fn find_user(&self, username: &Username) -> Option<&User> {
        self.users.iter().find(|user| user.username() == username)
    }

    fn contains_user(&self, id: &UserId) -> bool {
        self.users.iter().any(|user| user.id() == id)
    }

    fn next_post_id(&self) -> PostId {
        self.posts
            .iter()
            .map(Post::id)
            .max()
            .map_or(PostId::FIRST, PostId::next)
    }
}

/// Registration, sign-in/out and posting backed by a persistent store.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use mockable::DefaultClock;
/// use wall::domain::ports::InMemoryPersistentStore;
/// use wall::domain::{LoginCredentials, PostContent, Registration, WallService};
///
/// let wall = WallService::open(
///     Arc::new(InMemoryPersistentStore::new()),
///     Arc::new(DefaultClock),
/// )?;
/// wall.register(Registration::try_from_parts("ana", "Ana", "Gomez", "secret1").unwrap())?;
/// wall.sign_in(&LoginCredentials::try_from_parts("ana", "secret1").unwrap())?;
/// let post = wall.create_post(PostContent::new("Hola mundo").unwrap())?;
///
/// assert_eq!(post.author_username(), "ana");
/// assert_eq!(wall.list_posts()?, vec![post]);
/// # Ok::<(), wall::domain::Error>(())
/// ```
pub struct WallService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    state: Mutex<WallState>,
}

impl<S> WallService<S>
where
    S: PersistentStore,
{
    /// Load the registry, ledger and session from `store`.
    ///
    /// Absent records start empty. A persisted session whose user is no
    /// longer registered is discarded.
    pub fn open(store: Arc<S>, clock: Arc<dyn Clock>) -> WallResult<Self> {
        let users: Vec<User> = Self::load(store.as_ref(), WallRecord::Users)?.unwrap_or_default();
        let posts: Vec<Post> = Self::load(store.as_ref(), WallRecord::Posts)?.unwrap_or_default();
        let mut state = WallState {
            users,
            posts,
            session: Session::NoSession,
        };

        let persisted: Option<User> = Self::load(store.as_ref(), WallRecord::CurrentSession)?;
        match persisted {
            Some(user) if state.contains_user(user.id()) => {
                debug!(user_id = %user.id(), username = %user.username(), "restored session");
                state.session = Session::Active(user);
            }
            Some(user) => {
                warn!(
                    user_id = %user.id(),
                    username = %user.username(),
                    "discarding session for unregistered user"
                );
                store
                    .clear(WallRecord::CurrentSession)
                    .map_err(Self::map_store_error)?;
            }
            None => {}
        }

        info!(
            users = state.users.len(),
            posts = state.posts.len(),
            signed_in = state.session.is_active(),
            "wall opened"
        );
        Ok(Self {
            store,
            clock,
            state: Mutex::new(state),
        })
    }

    /// Create a user. Does not sign them in.
    ///
    /// Fails with `DuplicateUsername` when the username is taken.
    pub fn register(&self, registration: Registration) -> WallResult<User> {
        let mut state = self.lock_state()?;
        if state.find_user(&registration.username).is_some() {
            debug!(username = %registration.username, "registration rejected: username taken");
            return Err(Error::duplicate_username(format!(
                "username '{}' is already taken",
                registration.username
            )));
        }

        let user = User::new(UserId::random(), registration, self.clock.utc());
        let mut users = state.users.clone();
        users.push(user.clone());
        self.save(WallRecord::Users, &users)?;
        state.users = users;

        info!(user_id = %user.id(), username = %user.username(), "registered user");
        Ok(user)
    }

    /// Start a session for the user matching `credentials`.
    ///
    /// Replaces any active session. On mismatch the current session is left
    /// untouched and `InvalidCredentials` is returned.
    pub fn sign_in(&self, credentials: &LoginCredentials) -> WallResult<User> {
        let mut state = self.lock_state()?;
        let Some(user) = state
            .users
            .iter()
            .find(|user| user.has_credentials(credentials.username(), credentials.password()))
            .cloned()
        else {
            debug!(username = %credentials.username(), "sign-in rejected");
            return Err(Error::invalid_credentials("invalid username or password"));
        };

        self.save(WallRecord::CurrentSession, &user)?;
        state.session = Session::Active(user.clone());

        info!(user_id = %user.id(), username = %user.username(), "signed in");
        Ok(user)
    }

    /// End the active session. Succeeds when nobody is signed in.
    pub fn sign_out(&self) -> WallResult<()> {
        let mut state = self.lock_state()?;
        let Some(user_id) = state.session.user().map(|user| user.id().clone()) else {
            debug!("sign-out without an active session");
            return Ok(());
        };

        self.store
            .clear(WallRecord::CurrentSession)
            .map_err(Self::map_store_error)?;
        state.session = Session::NoSession;

        info!(user_id = %user_id, "signed out");
        Ok(())
    }

    /// Publish a post as the signed-in user.
    ///
    /// Fails with `NotAuthenticated` when nobody is signed in.
    pub fn create_post(&self, content: PostContent) -> WallResult<Post> {
        let mut state = self.lock_state()?;
        let Some(author) = state.session.user() else {
            return Err(Error::not_authenticated("sign in to post on the wall"));
        };

        let post = Post::new(state.next_post_id(), content, author, self.clock.utc());
        let mut posts = Vec::with_capacity(state.posts.len() + 1);
        posts.push(post.clone());
        posts.extend(state.posts.iter().cloned());
        self.save(WallRecord::Posts, &posts)?;
        state.posts = posts;

        info!(post_id = %post.id(), author_id = %post.author_id(), "created post");
        Ok(post)
    }

    /// Every post, newest first. Posts sharing a timestamp are ordered by
    /// descending id.
    pub fn list_posts(&self) -> WallResult<Vec<Post>> {
        let state = self.lock_state()?;
        let mut posts = state.posts.clone();
        posts.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        Ok(posts)
    }

    /// The signed-in user, if any.
    pub fn current_user(&self) -> WallResult<Option<User>> {
        Ok(self.lock_state()?.session.user().cloned())
    }

    /// Exact, case-sensitive registry lookup.
    pub fn find_user(&self, username: &Username) -> WallResult<Option<User>> {
        Ok(self.lock_state()?.find_user(username).cloned())
    }

    fn lock_state(&self) -> WallResult<MutexGuard<'_, WallState>> {
        self.state
            .lock()
            .map_err(|_| Error::internal("wall state lock poisoned"))
    }

    fn save<T: Serialize + ?Sized>(&self, record: WallRecord, value: &T) -> WallResult<()> {
        let encoded = serde_json::to_value(value)
            .map_err(|err| Error::internal(format!("failed to encode {record}: {err}")))?;
        self.store
            .write(record, &encoded)
            .map_err(Self::map_store_error)
    }

    fn load<T: DeserializeOwned>(store: &S, record: WallRecord) -> WallResult<Option<T>> {
        let Some(value) = store.read(record).map_err(Self::map_store_error)? else {
            return Ok(None);
        };
        serde_json::from_value(value)
            .map(Some)
            .map_err(|err| Error::internal(format!("stored {record} record is invalid: {err}")))
    }

    fn map_store_error(error: PersistentStoreError) -> Error {
        match error {
            PersistentStoreError::Unavailable { record, message } => {
                warn!(%record, %message, "persistent store unavailable");
                Error::storage_unavailable(format!("could not access {record}: {message}"))
            }
            PersistentStoreError::Corrupt { record, message } => {
                warn!(%record, %message, "persistent store returned an unreadable record");
                Error::internal(format!("stored {record} record is unreadable: {message}"))
            }
        }
    }
}

#[cfg(test)]
#[path = "wall_service_tests.rs"]
mod tests;
