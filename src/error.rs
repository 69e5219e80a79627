//! Error types for add-album-art
//!
//! Directory and tool-discovery errors abort the whole run. The remaining
//! variants are scoped to a single audio file and end up in that file's
//! `EmbedResult` instead of stopping the run.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Target directory does not exist
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// Target path exists but is not a directory
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Reading the directory listing failed
    #[error("Failed to read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A relative path could not be resolved against the current directory
    #[error("Failed to resolve {} against the current directory: {source}", path.display())]
    CurrentDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Audio path has no file name component
    #[error("Not a file path: {}", .0.display())]
    InvalidAudioPath(PathBuf),

    /// ffmpeg could not be located or is not usable
    #[error("ffmpeg not found: {0}")]
    ToolNotFound(String),

    /// ffmpeg could not be started
    #[error("Failed to spawn ffmpeg: {0}")]
    ToolSpawn(#[source] std::io::Error),

    /// ffmpeg ran but exited unsuccessfully
    #[error("ffmpeg failed ({status}): {message}")]
    ToolFailed { status: String, message: String },

    /// ffmpeg reported success but left no usable output
    #[error("ffmpeg produced no output at {}", .0.display())]
    MissingOutput(PathBuf),

    /// Scratch directory could not be created
    #[error("Failed to create temporary directory: {0}")]
    TempDir(#[source] std::io::Error),

    /// Moving the new file over the original failed
    #[error("Failed to replace {}: {source}", path.display())]
    Replace {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
