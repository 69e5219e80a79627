//! Album directory scanning
//!
//! Looks for `cover.jpg` directly inside a directory and, when it exists,
//! lists the audio files sitting next to it. Subdirectories are never
//! entered.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::audio::is_audio_file;
use crate::error::{Error, Result};

/// Name of the cover image looked up in each album directory (case-sensitive)
pub const COVER_FILENAME: &str = "cover.jpg";

/// A directory that has a cover image and the audio files to embed it into
#[derive(Debug, Clone)]
pub struct AlbumScan {
    /// Directory as supplied by the caller
    pub directory: PathBuf,
    /// Absolute path to the cover image
    pub cover_path: PathBuf,
    /// Audio files directly inside the directory, sorted by file name
    pub audio_files: Vec<PathBuf>,
}

/// Result of scanning a directory
#[derive(Debug, Clone)]
pub enum ScanOutcome {
    /// No `cover.jpg` in the directory; nothing to do
    MissingCover { directory: PathBuf },
    /// Cover found, with the candidate audio files
    Found(AlbumScan),
}

/// Absolute path of the cover image for a directory
///
/// Does not check whether the file exists.
pub fn cover_path_for(directory: &Path) -> Result<PathBuf> {
    let cover_path = directory.join(COVER_FILENAME);
    std::path::absolute(&cover_path).map_err(|source| Error::CurrentDir {
        path: cover_path,
        source,
    })
}

/// Scan a directory for its cover image and audio files
///
/// A missing cover is not an error. A path that does not exist or is not a
/// directory is.
pub fn scan_album_directory(directory: &Path) -> Result<ScanOutcome> {
    if !directory.exists() {
        return Err(Error::DirectoryNotFound(directory.to_path_buf()));
    }
    if !directory.is_dir() {
        return Err(Error::NotADirectory(directory.to_path_buf()));
    }

    let cover_path = cover_path_for(directory)?;
    if !cover_path.is_file() {
        log::debug!("No regular file at {}", cover_path.display());
        return Ok(ScanOutcome::MissingCover {
            directory: directory.to_path_buf(),
        });
    }

    let audio_files = get_audio_files(directory)?;
    log::debug!(
        "Found {} audio file(s) and {} in {}",
        audio_files.len(),
        COVER_FILENAME,
        directory.display()
    );

    Ok(ScanOutcome::Found(AlbumScan {
        directory: directory.to_path_buf(),
        cover_path,
        audio_files,
    }))
}

/// List the audio files directly inside a directory
///
/// Symlinks are followed, so a link to an audio file counts and a link to a
/// directory does not. Entries that cannot be inspected (dangling links) are
/// skipped.
pub fn get_audio_files(directory: &Path) -> Result<Vec<PathBuf>> {
    let mut audio_files = Vec::new();

    for entry in WalkDir::new(directory)
        .follow_links(true)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(Error::ReadDir {
                    path: directory.to_path_buf(),
                    source: e.into(),
                });
            }
            Err(e) => {
                log::debug!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        if entry.file_type().is_file() && is_audio_file(entry.path()) {
            audio_files.push(entry.into_path());
        }
    }

    Ok(audio_files)
}
