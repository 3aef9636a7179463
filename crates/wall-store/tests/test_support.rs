//! Shared filesystem helpers for wall-store integration tests.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Create a unique, empty store root under `target/wall-store-tests`.
///
/// # Errors
///
/// Returns any filesystem errors encountered while creating the directory.
pub fn unique_store_root(prefix: &str) -> io::Result<Utf8PathBuf> {
    static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let process_id = std::process::id();
    let root = Utf8PathBuf::from("target")
        .join("wall-store-tests")
        .join(format!("{prefix}-{process_id}-{counter}"));
    let cwd = Dir::open_ambient_dir(".", ambient_authority())?;
    cwd.create_dir_all(&root)?;
    Ok(root)
}

/// Overwrite a record file directly, bypassing the store.
///
/// # Errors
///
/// Returns any filesystem errors encountered while writing.
pub fn write_raw_record(root: &Utf8Path, key: &str, contents: &str) -> io::Result<()> {
    let dir = Dir::open_ambient_dir(root, ambient_authority())?;
    dir.write(format!("{key}.json"), contents)
}
