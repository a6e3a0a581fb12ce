//! Cross-process advisory file lock
//!
//! Every append to a shared artifact happens under an exclusive lock on a
//! sidecar file `<path>.lock`. The lock is advisory: only writers that go
//! through [`ScopedFileLock`] are serialized.
//!
//! Acquisition blocks with no timeout. A process that dies while holding the
//! lock releases it with its file descriptor, but a wedged holder stalls every
//! other writer.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Exclusive lock guard, released on drop.
#[derive(Debug)]
pub struct ScopedFileLock {
    file: File,
    path: PathBuf,
}

impl ScopedFileLock {
    /// Block until the lock guarding `target` is held.
    ///
    /// Creates the sidecar file and its parent directories when missing.
    pub fn acquire(target: &Path) -> io::Result<Self> {
        let path = lock_path(target);
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&path)?;
        fs2::FileExt::lock_exclusive(&file)?;
        debug!("Acquired lock {}", path.display());

        Ok(Self { file, path })
    }

    /// The sidecar lock file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScopedFileLock {
    fn drop(&mut self) {
        // Closing the descriptor releases the lock anyway.
        if let Err(e) = fs2::FileExt::unlock(&self.file) {
            debug!("Failed to release lock {}: {}", self.path.display(), e);
        }
    }
}

/// Sidecar lock path for `target`.
pub fn lock_path(target: &Path) -> PathBuf {
    let mut name = OsString::from(target.as_os_str());
    name.push(".lock");
    PathBuf::from(name)
}

/// Run `critical_section` while holding the lock guarding `target`.
pub fn with_lock<T>(
    target: &Path,
    critical_section: impl FnOnce() -> io::Result<T>,
) -> io::Result<T> {
    let _guard = ScopedFileLock::acquire(target)?;
    critical_section()
}
