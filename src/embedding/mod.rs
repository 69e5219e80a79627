//! Album art embedding
//!
//! Locates ffmpeg and uses it to rewrite audio files with the cover image
//! attached.

mod ffmpeg;
mod replace;

pub use ffmpeg::{embed_art_into_file, progress_line, remove_stale_scratch_dirs, EmbedResult};

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Locate the ffmpeg binary
///
/// An explicitly configured path wins; otherwise `ffmpeg` is looked up on
/// PATH.
pub fn find_ffmpeg(configured: Option<&Path>) -> Result<PathBuf> {
    let path = match configured {
        Some(path) => path.to_path_buf(),
        None => which::which("ffmpeg")
            .map_err(|e| Error::ToolNotFound(format!("not found on PATH ({})", e)))?,
    };

    verify_ffmpeg(&path)?;
    log::debug!("Using ffmpeg at {}", path.display());
    Ok(path)
}

/// Verify that ffmpeg exists and is executable
pub fn verify_ffmpeg(path: &Path) -> Result<()> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| Error::ToolNotFound(format!("{}: {}", path.display(), e)))?;

    if !metadata.is_file() {
        return Err(Error::ToolNotFound(format!(
            "{} is not a file",
            path.display()
        )));
    }

    // On Unix, check if executable
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if metadata.permissions().mode() & 0o111 == 0 {
            return Err(Error::ToolNotFound(format!(
                "{} is not executable",
                path.display()
            )));
        }
    }

    Ok(())
}
