//! Idempotent and non-clobbering I/O operations

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use fs2::FileExt;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::{Error, NormalizedPath, Result};

/// Write content to a file that must not exist yet.
///
/// Content goes to a locked temp file in the destination directory, which
/// is then moved into place without replacing anything. A failed write
/// never leaves a partial file at `path`, and a file that appears at
/// `path` in the meantime yields [`Error::AlreadyExists`].
pub fn write_new(path: &NormalizedPath, content: &[u8]) -> Result<()> {
    let native_path = path.to_native();
    let parent = match native_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent).map_err(|e| Error::io(&parent, e))?;

    let mut temp = NamedTempFile::new_in(&parent).map_err(|e| Error::io(&parent, e))?;

    temp.as_file()
        .lock_exclusive()
        .map_err(|_| Error::LockFailed {
            path: native_path.clone(),
        })?;
    temp.write_all(content)
        .map_err(|e| Error::io(temp.path(), e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| Error::io(temp.path(), e))?;
    temp.as_file().unlock().map_err(|_| Error::LockFailed {
        path: native_path.clone(),
    })?;

    temp.persist_noclobber(&native_path).map_err(|e| match e.error.kind() {
        ErrorKind::AlreadyExists => Error::AlreadyExists {
            path: native_path.clone(),
        },
        _ => Error::io(&native_path, e.error),
    })?;

    debug!(path = %path, bytes = content.len(), "Created file");
    Ok(())
}

/// Copy `source` byte-for-byte to `dest`, which must not exist yet.
pub fn copy_new(source: &NormalizedPath, dest: &NormalizedPath) -> Result<()> {
    let native_source = source.to_native();
    let content = fs::read(&native_source).map_err(|e| Error::io(&native_source, e))?;
    write_new(dest, &content)
}

/// Read text content from a file.
pub fn read_text(path: &NormalizedPath) -> Result<String> {
    let native_path = path.to_native();
    fs::read_to_string(&native_path).map_err(|e| Error::io(&native_path, e))
}

/// Ensure a directory exists (`mkdir -p`).
///
/// Returns `true` when the directory was created by this call and `false`
/// when it was already present.
pub fn ensure_dir(path: &NormalizedPath) -> Result<bool> {
    let native_path = path.to_native();

    if native_path.is_dir() {
        return Ok(false);
    }
    if native_path.exists() {
        return Err(Error::NotADirectory { path: native_path });
    }

    fs::create_dir_all(&native_path).map_err(|e| Error::io(&native_path, e))?;
    debug!(path = %path, "Created directory");
    Ok(true)
}

/// Remove a directory tree if it exists.
///
/// Returns `true` when something was removed.
pub fn remove_dir_if_exists(path: &NormalizedPath) -> Result<bool> {
    let native_path = path.to_native();

    match fs::symlink_metadata(&native_path) {
        Ok(meta) if meta.is_dir() => {
            fs::remove_dir_all(&native_path).map_err(|e| Error::io(&native_path, e))?;
        }
        Ok(_) => {
            fs::remove_file(&native_path).map_err(|e| Error::io(&native_path, e))?;
        }
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(Error::io(&native_path, e)),
    }

    debug!(path = %path, "Removed existing path");
    Ok(true)
}
