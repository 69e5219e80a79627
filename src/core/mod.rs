//! Core application logic
//!
//! This module contains:
//! - Album directory scanning (cover image + audio files)
//! - Persisted settings
//! - The run driver that embeds art into every scanned file

mod run;
mod scanning;
mod settings;

pub use run::process_directory;
pub use settings::{AppSettings, APP_DIR_NAME};
