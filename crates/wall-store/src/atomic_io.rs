//! Atomic record replacement.
//!
//! Records are written to a hidden sibling file, flushed, and renamed over the
//! target so a crash leaves either the previous bytes or the new bytes behind.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use cap_std::fs::{Dir, OpenOptions};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Replaces `file_name` inside `dir` with `contents`.
///
/// `file_name` must be a bare file name; [`crate::RecordKey`] guarantees that
/// for every caller in this crate.
pub(crate) fn replace_file(dir: &Dir, file_name: &str, contents: &str) -> io::Result<()> {
    let tmp_name = temp_name_for(file_name);

    if let Err(err) = write_temp_file(dir, &tmp_name, contents) {
        discard_temp_file(dir, &tmp_name);
        return Err(err);
    }
    if let Err(err) = rename_over(dir, &tmp_name, file_name) {
        discard_temp_file(dir, &tmp_name);
        return Err(err);
    }
    sync_directory(dir);
    Ok(())
}

fn temp_name_for(file_name: &str) -> String {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    format!(".{file_name}.tmp.{}.{nanos}.{counter}", std::process::id())
}

fn write_temp_file(dir: &Dir, tmp_name: &str, contents: &str) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(tmp_name, &options)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}

#[cfg(windows)]
fn rename_over(dir: &Dir, tmp_name: &str, file_name: &str) -> io::Result<()> {
    // Windows rename fails if the target exists.
    match dir.remove_file(file_name) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, file_name)
}

#[cfg(not(windows))]
fn rename_over(dir: &Dir, tmp_name: &str, file_name: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, file_name)
}

fn discard_temp_file(dir: &Dir, tmp_name: &str) {
    if let Err(err) = dir.remove_file(tmp_name) {
        if err.kind() != io::ErrorKind::NotFound {
            tracing::debug!(file = tmp_name, error = %err, "temporary record file left behind");
        }
    }
}

fn sync_directory(dir: &Dir) {
    if let Err(err) = dir.open(".").and_then(|handle| handle.sync_all()) {
        tracing::debug!(error = %err, "store directory sync skipped");
    }
}
