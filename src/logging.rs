//! Logging configuration for add-album-art
//!
//! Progress and errors go to the terminal. When enabled, a debug-level copy
//! (including the exact ffmpeg command lines) is appended to
//! `<local data dir>/add-album-art/logs/add-album-art.log`.

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};
use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use crate::core::APP_DIR_NAME;

const LOG_FILE_NAME: &str = "add-album-art.log";
const MAX_LOG_SIZE: u64 = 10 * 1024 * 1024;

/// Get the log directory path
pub fn get_log_directory() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join(APP_DIR_NAME).join("logs"))
}

/// Terminal output carries the bare message so progress lines read as plain text
fn terminal_config() -> Config {
    ConfigBuilder::new()
        .set_max_level(LevelFilter::Off)
        .set_time_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_location_level(LevelFilter::Off)
        .build()
}

fn file_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_thread_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build()
}

/// Initialize the logging system
///
/// Sets up combined logging to the terminal and, if `log_to_file` is set,
/// to the log file. Returns the path to the log file when one is in use.
pub fn init_logging(log_to_file: bool) -> Option<PathBuf> {
    if !log_to_file {
        init_terminal_only();
        return None;
    }

    let log_dir = match get_log_directory() {
        Some(d) => d,
        None => {
            init_terminal_only();
            log::debug!("Could not determine log directory");
            return None;
        }
    };

    if let Err(e) = fs::create_dir_all(&log_dir) {
        init_terminal_only();
        log::debug!("Could not create log directory: {}", e);
        return None;
    }

    let log_path = log_dir.join(LOG_FILE_NAME);

    // Rotate old log if it's too large
    if let Ok(metadata) = fs::metadata(&log_path)
        && metadata.len() > MAX_LOG_SIZE
    {
        let backup_path = log_dir.join(format!("{}.old", LOG_FILE_NAME));
        let _ = fs::rename(&log_path, &backup_path);
    }

    let log_file = match OpenOptions::new().create(true).append(true).open(&log_path) {
        Ok(f) => f,
        Err(e) => {
            init_terminal_only();
            log::debug!("Could not open log file: {}", e);
            return None;
        }
    };

    let loggers: Vec<Box<dyn SharedLogger>> = vec![
        TermLogger::new(
            LevelFilter::Info,
            terminal_config(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Debug, file_config(), log_file),
    ];

    if CombinedLogger::init(loggers).is_err() {
        eprintln!("Warning: Logger already initialized");
    }

    log::debug!("=== add-album-art started ===");
    log::debug!("Log file: {}", log_path.display());

    Some(log_path)
}

/// Initialize terminal-only logging
fn init_terminal_only() {
    let term_logger = TermLogger::new(
        LevelFilter::Info,
        terminal_config(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
    let _ = CombinedLogger::init(vec![term_logger]);
}
