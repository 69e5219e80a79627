//! FFmpeg subprocess handling for embedding album art

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

use super::replace::replace_file;
use crate::error::{Error, Result};

/// Prefix for scratch directories created next to the audio files
const SCRATCH_PREFIX: &str = ".add-album-art-";

/// Result of embedding art into one file
#[derive(Debug, Clone)]
pub struct EmbedResult {
    /// The audio file that was (or was meant to be) rewritten
    pub audio_path: PathBuf,
    /// Whether the file now carries the cover
    pub success: bool,
    /// Error message if embedding failed
    pub error: Option<String>,
}

impl EmbedResult {
    fn succeeded(audio_path: &Path) -> Self {
        Self {
            audio_path: audio_path.to_path_buf(),
            success: true,
            error: None,
        }
    }

    fn failed(audio_path: &Path, error: Error) -> Self {
        Self {
            audio_path: audio_path.to_path_buf(),
            success: false,
            error: Some(error.to_string()),
        }
    }

    /// File name of the audio file, for messages
    pub fn file_name(&self) -> String {
        display_name(&self.audio_path)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Build the ffmpeg arguments that embed `cover_path` into `audio_path`
pub fn build_embed_args(audio_path: &Path, cover_path: &Path, output_path: &Path) -> Vec<OsString> {
    // -i <audio> -i <cover> : Audio is input 0, cover is input 1
    // -c copy               : Stream copy, nothing is re-encoded
    // -map 0:0 -map 1:0     : First audio stream, then the image
    // -id3v2_version 3      : Write ID3v2.3 tags (MP3)
    // -metadata:s:v ...     : Mark the image stream as the front cover
    // -v error              : Only report errors
    let mut args: Vec<OsString> = Vec::with_capacity(20);
    args.push("-i".into());
    args.push(audio_path.into());
    args.push("-i".into());
    args.push(cover_path.into());
    for arg in [
        "-c",
        "copy",
        "-map",
        "0:0",
        "-map",
        "1:0",
        "-id3v2_version",
        "3",
        // Values go in without shell quotes so ffmpeg matches "Cover (front)"
        // to the front-cover picture type
        "-metadata:s:v",
        "title=Album cover",
        "-metadata:s:v",
        "comment=Cover (front)",
        "-v",
        "error",
    ] {
        args.push(arg.into());
    }
    args.push(output_path.into());
    args
}

/// Progress line announcing that `cover_path` is about to go into `audio_path`
pub fn progress_line(audio_path: &Path, cover_path: &Path) -> String {
    format!(
        "Adding {} to {}",
        display_name(cover_path),
        display_name(audio_path)
    )
}

/// Embed a cover image into a single audio file, replacing it in place
///
/// ffmpeg writes into a scratch directory that is removed again on every
/// path out of this function. The original is only replaced when ffmpeg
/// exits successfully and left a non-empty file behind.
///
/// Callers announce the file with [`progress_line`] before calling this.
pub fn embed_art_into_file(
    ffmpeg_path: &Path,
    audio_path: &Path,
    cover_path: &Path,
) -> EmbedResult {
    match try_embed(ffmpeg_path, audio_path, cover_path) {
        Ok(()) => {
            log::debug!("Replaced {}", audio_path.display());
            EmbedResult::succeeded(audio_path)
        }
        Err(e) => EmbedResult::failed(audio_path, e),
    }
}

fn try_embed(ffmpeg_path: &Path, audio_path: &Path, cover_path: &Path) -> Result<()> {
    let file_name = audio_path
        .file_name()
        .ok_or_else(|| Error::InvalidAudioPath(audio_path.to_path_buf()))?;

    let scratch = scratch_dir_for(audio_path)?;
    let output_path = scratch.path().join(file_name);

    let args = build_embed_args(audio_path, cover_path, &output_path);
    log::debug!("Running {} {:?}", ffmpeg_path.display(), args);

    let output = Command::new(ffmpeg_path)
        .args(&args)
        .output()
        .map_err(Error::ToolSpawn)?;

    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        log::debug!("ffmpeg stderr for {}: {}", audio_path.display(), stderr.trim());
    }

    if !output.status.success() {
        return Err(Error::ToolFailed {
            status: output.status.to_string(),
            message: stderr
                .lines()
                .rev()
                .map(str::trim)
                .find(|l| !l.is_empty())
                .unwrap_or("Unknown error")
                .to_string(),
        });
    }

    match fs::metadata(&output_path) {
        Ok(metadata) if metadata.is_file() && metadata.len() > 0 => {}
        _ => return Err(Error::MissingOutput(output_path)),
    }

    replace_file(&output_path, audio_path)
}

/// Create the scratch directory for one file
///
/// Prefers the audio file's own directory so the final move is a rename on
/// the same filesystem. Falls back to the system temp directory when that
/// directory is not writable.
///
/// `Drop` removes the directory on every normal exit, but not when the
/// process is killed mid-run. Such leftovers are cleared by
/// [`remove_stale_scratch_dirs`] the next time the album is processed.
fn scratch_dir_for(audio_path: &Path) -> Result<TempDir> {
    let parent = audio_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    match tempfile::Builder::new().prefix(SCRATCH_PREFIX).tempdir_in(parent) {
        Ok(dir) => Ok(dir),
        Err(e) => {
            log::debug!(
                "Could not create scratch directory in {}: {}; using system temp",
                parent.display(),
                e
            );
            tempfile::Builder::new()
                .prefix(SCRATCH_PREFIX)
                .tempdir()
                .map_err(Error::TempDir)
        }
    }
}

/// Remove scratch directories left behind in `directory` by an interrupted run
///
/// Only directories whose name carries the scratch prefix are removed;
/// files and symlinks are left alone. Returns how many were removed.
pub fn remove_stale_scratch_dirs(directory: &Path) -> usize {
    let entries = match fs::read_dir(directory) {
        Ok(entries) => entries,
        Err(e) => {
            log::debug!("Could not list {}: {}", directory.display(), e);
            return 0;
        }
    };

    let mut removed = 0;
    for entry in entries.flatten() {
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if !is_dir || !entry.file_name().to_string_lossy().starts_with(SCRATCH_PREFIX) {
            continue;
        }

        let path = entry.path();
        match fs::remove_dir_all(&path) {
            Ok(()) => {
                log::debug!("Removed leftover scratch directory {}", path.display());
                removed += 1;
            }
            Err(e) => log::warn!("Could not remove {}: {}", path.display(), e),
        }
    }

    removed
}
