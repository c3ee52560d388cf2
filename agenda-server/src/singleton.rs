//! Ensure only one agenda-server instance owns a data file.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// A lock guard that releases the lock when dropped
pub struct LockGuard {
    _file: File,
}

fn lock_path(data_path: &Path) -> PathBuf {
    let mut path = data_path.as_os_str().to_owned();
    path.push(".lock");
    PathBuf::from(path)
}

/// Acquire an exclusive lock next to `data_path`, failing if another
/// instance is already serving it
pub fn acquire_lock(data_path: &Path) -> Result<LockGuard> {
    let path = lock_path(data_path);
    if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    let file = File::create(&path).context("Failed to create lock file")?;

    file.try_lock_exclusive().map_err(|_| {
        anyhow::anyhow!(
            "Another agenda-server instance is already using {}.\n\
            If you believe this is an error, remove: {}",
            data_path.display(),
            path.display()
        )
    })?;

    Ok(LockGuard { _file: file })
}
