//! Persisted application settings
//!
//! Read from `<config dir>/add-album-art/settings.json`. The file is
//! optional; any problem reading it falls back to defaults.
//!
//! Settings are read before logging starts, so loading reports what happened
//! as a [`LoadOutcome`] for the caller to log afterwards.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory name used under the platform config/data directories
pub const APP_DIR_NAME: &str = "add-album-art";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Explicit ffmpeg binary; looked up on PATH when unset
    #[serde(default)]
    pub ffmpeg_path: Option<PathBuf>,
    /// Whether to also write the log file
    #[serde(default = "default_true")]
    pub log_to_file: bool,
    /// Read each file back after embedding and log the pictures found
    #[serde(default)]
    pub verify_embedded_art: bool,
}

fn default_true() -> bool {
    true
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            ffmpeg_path: None,
            log_to_file: true,
            verify_embedded_art: false,
        }
    }
}

/// How the settings were obtained
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(PathBuf),
    /// No config directory, or no settings file in it
    NotFound,
    /// The file exists but could not be used
    Invalid { path: PathBuf, error: String },
}

impl LoadOutcome {
    /// Log the outcome; call once logging is initialized
    pub fn log(&self) {
        match self {
            LoadOutcome::Loaded(path) => log::debug!("Loaded settings from {}", path.display()),
            LoadOutcome::NotFound => log::debug!("No settings file, using default settings"),
            LoadOutcome::Invalid { path, error } => log::warn!(
                "Ignoring settings in {}: {}; using defaults",
                path.display(),
                error
            ),
        }
    }
}

impl AppSettings {
    const SETTINGS_FILE: &'static str = "settings.json";

    /// Path of the settings file (e.g. ~/.config/add-album-art/settings.json)
    pub fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join(Self::SETTINGS_FILE))
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> (Self, LoadOutcome) {
        match Self::settings_path() {
            Some(path) => Self::load_from(&path),
            None => (Self::default(), LoadOutcome::NotFound),
        }
    }

    /// Load settings from a specific file, or return defaults
    pub fn load_from(path: &Path) -> (Self, LoadOutcome) {
        if !path.exists() {
            return (Self::default(), LoadOutcome::NotFound);
        }

        match Self::try_load(path) {
            Ok(settings) => (settings, LoadOutcome::Loaded(path.to_path_buf())),
            Err(error) => (
                Self::default(),
                LoadOutcome::Invalid {
                    path: path.to_path_buf(),
                    error,
                },
            ),
        }
    }

    fn try_load(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read settings: {}", e))?;

        serde_json::from_str(&contents).map_err(|e| format!("Failed to parse settings: {}", e))
    }
}
