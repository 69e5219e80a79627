//! Moving a rewritten file over its original

use std::fs::{self, File};
use std::io;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Replace `to` with the file at `from`
///
/// A plain rename is tried first. If that fails (typically because the two
/// paths are on different filesystems) the data is copied into a temporary
/// file next to `to`, which is then renamed over it, and `from` is removed.
/// Either way `to` is never left truncated or half-written.
///
/// The permissions of the existing `to` are carried over to the new file.
pub fn replace_file(from: &Path, to: &Path) -> Result<()> {
    let permissions = fs::metadata(to).ok().map(|m| m.permissions());
    if let Some(permissions) = &permissions
        && let Err(e) = fs::set_permissions(from, permissions.clone())
    {
        log::debug!("Could not copy permissions onto {}: {}", from.display(), e);
    }

    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) => {
            log::debug!(
                "Rename {} -> {} failed ({}), copying instead",
                from.display(),
                to.display(),
                e
            );
            copy_then_rename(from, to).map_err(|source| Error::Replace {
                path: to.to_path_buf(),
                source,
            })
        }
    }
}

fn copy_then_rename(from: &Path, to: &Path) -> io::Result<()> {
    let dir = match to.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir)?;
    io::copy(&mut File::open(from)?, staged.as_file_mut())?;
    staged.as_file().sync_all()?;
    if let Ok(metadata) = fs::metadata(from) {
        fs::set_permissions(staged.path(), metadata.permissions())?;
    }

    staged.persist(to).map_err(|e| e.error)?;
    fs::remove_file(from)
}
