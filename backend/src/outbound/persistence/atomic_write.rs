//! Atomic file replacement for the contact store.
//!
//! Contents are written to a hidden temporary file in the data directory,
//! flushed, and renamed over the target so readers never observe a
//! truncated store.

use std::io::{self, Write};
use std::path::{Component, Path};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use cap_std::fs::{Dir, OpenOptions};

use crate::domain::ports::ContactStoreError;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Whether `name` is a single plain file name with no directory parts.
pub(crate) fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Replace `file_name` inside `dir` with `contents`.
///
/// `display_path` is only used in error messages.
pub(crate) fn write_atomic(
    dir: &Dir,
    file_name: &str,
    display_path: &Path,
    contents: &str,
) -> Result<(), ContactStoreError> {
    let io_error =
        |err: io::Error| ContactStoreError::io(display_path.display().to_string(), err.to_string());
    if !is_plain_file_name(file_name) {
        return Err(ContactStoreError::io(
            display_path.display().to_string(),
            "contact store path must be a plain file name",
        ));
    }

    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    let tmp_name = format!(
        ".{file_name}.tmp.{}.{suffix}.{counter}",
        std::process::id()
    );

    if let Err(err) = write_temp_file(dir, &tmp_name, contents) {
        drop(dir.remove_file(&tmp_name));
        return Err(io_error(err));
    }
    if let Err(err) = replace_target(dir, &tmp_name, file_name) {
        drop(dir.remove_file(&tmp_name));
        return Err(io_error(err));
    }
    sync_directory(dir);
    Ok(())
}

fn write_temp_file(dir: &Dir, tmp_name: &str, contents: &str) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(tmp_name, &options)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}

#[cfg(windows)]
fn replace_target(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    // Windows rename fails if the target exists, so remove it first.
    match dir.remove_file(target_name) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target_name)
}

#[cfg(not(windows))]
fn replace_target(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target_name)
}

/// Best-effort directory sync so the rename is durable.
pub(crate) fn sync_directory(dir: &Dir) {
    if dir.open(".").and_then(|handle| handle.sync_all()).is_err() {
        // Ignore sync failures.
    }
}
