//! Command-line view over the wall.
//!
//! Arguments are parsed with `clap`, validated into domain input types, and
//! dispatched to [`WallService`]. Rendering writes to any [`Write`] sink so
//! the adapter can be exercised in tests without spawning a process.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use thiserror::Error;
use tracing::debug;

use crate::domain::ports::PersistentStore;
use crate::domain::{
    Error, LoginCredentials, Post, PostContent, Registration, User, WallService,
};

const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M";

/// `wall` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "wall",
    about = "Register, sign in and post short messages to a shared wall",
    version
)]
pub struct Cli {
    /// Directory holding the wall records. Overrides `WALL_DATA_DIR`.
    #[arg(long = "data-dir", value_name = "path", global = true)]
    pub data_dir: Option<PathBuf>,
    /// Operation to perform.
    #[command(subcommand)]
    pub command: Command,
}

/// Wall operations exposed on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Create an account. Does not sign in.
    Register {
        /// Unique, case-sensitive handle.
        username: String,
        /// Given name shown on posts.
        first_name: String,
        /// Family name shown on posts.
        last_name: String,
        /// Password compared verbatim on sign-in.
        password: String,
    },
    /// Start a session, replacing any active one.
    SignIn {
        /// Registered username.
        username: String,
        /// Account password.
        password: String,
    },
    /// End the active session.
    SignOut,
    /// Publish a post as the signed-in user.
    Post {
        /// Post text; multiple words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        content: Vec<String>,
    },
    /// Show every post, newest first.
    List,
    /// Show the signed-in user.
    Whoami,
}

/// Failures surfaced by the command-line adapter.
#[derive(Debug, Error)]
pub enum CliError {
    /// The wall rejected the operation.
    #[error(transparent)]
    Wall(#[from] Error),
    /// Writing to the output sink failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Execute `command` against `wall`, rendering the outcome to `out`.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use mockable::DefaultClock;
/// use wall::domain::WallService;
/// use wall::domain::ports::InMemoryPersistentStore;
/// use wall::inbound::cli::{Command, run};
///
/// let wall = WallService::open(Arc::new(InMemoryPersistentStore::new()), Arc::new(DefaultClock))?;
/// let mut out = Vec::new();
/// run(&wall, Command::List, &mut out)?;
/// assert_eq!(String::from_utf8(out)?, "No posts yet\n");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn run<S, W>(wall: &WallService<S>, command: Command, out: &mut W) -> Result<(), CliError>
where
    S: PersistentStore,
    W: Write,
{
    match command {
        Command::Register {
            username,
            first_name,
            last_name,
            password,
        } => {
            let registration =
                Registration::try_from_parts(&username, &first_name, &last_name, &password)
                    .map_err(|err| Error::invalid_request(err.to_string()))?;
            let user = wall.register(registration)?;
            writeln!(
                out,
                "Registered {}. Sign in to start posting.",
                describe(&user)
            )?;
        }
        Command::SignIn { username, password } => {
            let credentials = LoginCredentials::try_from_parts(&username, &password)
                .map_err(|err| Error::invalid_request(err.to_string()))?;
            let user = wall.sign_in(&credentials)?;
            writeln!(out, "Signed in as {}.", describe(&user))?;
        }
        Command::SignOut => {
            wall.sign_out()?;
            writeln!(out, "Signed out.")?;
        }
        Command::Post { content } => {
            let content = PostContent::new(content.join(" "))
                .map_err(|err| Error::invalid_request(err.to_string()))?;
            let post = wall.create_post(content)?;
            writeln!(out, "Posted #{}.", post.id())?;
        }
        Command::List => {
            let posts = wall.list_posts()?;
            debug!(count = posts.len(), "rendering posts");
            render_posts(&posts, out)?;
        }
        Command::Whoami => match wall.current_user()? {
            Some(user) => writeln!(out, "{}", describe(&user))?,
            None => writeln!(out, "Not signed in.")?,
        },
    }
    Ok(())
}

fn describe(user: &User) -> String {
    format!("{} (@{})", user.display_name(), user.username())
}

fn render_posts<W: Write>(posts: &[Post], out: &mut W) -> io::Result<()> {
    if posts.is_empty() {
        return writeln!(out, "No posts yet");
    }
    for post in posts {
        writeln!(
            out,
            "{} @{} · {}",
            post.author_display_name(),
            post.author_username(),
            post.created_at().format(TIMESTAMP_FORMAT)
        )?;
        for line in post.content().lines() {
            writeln!(out, "    {line}")?;
        }
    }
    Ok(())
}
