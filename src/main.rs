//! add-album-art
//!
//! Embeds a directory's `cover.jpg` into every MP3 and FLAC file next to it,
//! using ffmpeg to rewrite each file in place.

mod audio;
mod core;
mod embedding;
mod error;
mod logging;
#[cfg(test)]
mod test_fixtures;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crate::core::{process_directory, AppSettings};

/// Add album art in a directory to all MP3 and FLAC files contained within that directory
#[derive(Parser, Debug)]
#[command(name = "add-album-art")]
#[command(version)]
struct Args {
    /// Directory containing cover.jpg and the audio files
    path: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Settings decide whether to log to a file, so their outcome is logged
    // only once the logger exists
    let (settings, outcome) = AppSettings::load();
    logging::init_logging(settings.log_to_file);
    outcome.log();
    log::debug!("Settings: {:?}", settings);

    match process_directory(&args.path, &settings) {
        Ok(summary) => {
            if summary.skipped {
                log::debug!("Nothing to do in {}", summary.directory.display());
            }
            ExitCode::from(summary.exit_code())
        }
        Err(e) => {
            log::error!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
