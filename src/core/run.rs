//! Processing one album directory from scan to summary

use std::path::{Path, PathBuf};

use super::scanning::{scan_album_directory, ScanOutcome, COVER_FILENAME};
use super::settings::AppSettings;
use crate::audio::read_embedded_art;
use crate::embedding::{
    embed_art_into_file, find_ffmpeg, progress_line, remove_stale_scratch_dirs, EmbedResult,
};
use crate::error::Result;

/// What happened while processing a directory
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub directory: PathBuf,
    /// True when the directory had no cover image
    pub skipped: bool,
    /// One entry per audio file attempted, in processing order
    pub results: Vec<EmbedResult>,
    /// Info lines printed to the terminal, in order
    pub notices: Vec<String>,
}

impl RunSummary {
    fn new(directory: &Path) -> Self {
        Self {
            directory: directory.to_path_buf(),
            skipped: false,
            results: Vec::new(),
            notices: Vec::new(),
        }
    }

    fn skipped(directory: &Path) -> Self {
        let mut summary = Self::new(directory);
        summary.skipped = true;
        summary.notice(skip_notice(directory));
        summary
    }

    /// Log an info line and keep it
    fn notice(&mut self, line: String) {
        log::info!("{}", line);
        self.notices.push(line);
    }

    pub fn attempted(&self) -> usize {
        self.results.len()
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &EmbedResult> {
        self.results.iter().filter(|r| !r.success)
    }

    /// True when no file failed
    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Process exit status for this run
    pub fn exit_code(&self) -> u8 {
        if self.is_success() { 0 } else { 1 }
    }
}

/// Notice logged for a directory without a cover image
pub fn skip_notice(directory: &Path) -> String {
    format!(
        "{} not found in {}!  Skipping.",
        COVER_FILENAME,
        directory.display()
    )
}

/// Embed the directory's cover into each of its audio files
///
/// Files are processed one at a time. A failure on one file is recorded in
/// the summary and processing moves on to the next. Errors returned from
/// here (bad directory, ffmpeg not found) mean nothing was touched.
pub fn process_directory(directory: &Path, settings: &AppSettings) -> Result<RunSummary> {
    let scan = match scan_album_directory(directory)? {
        ScanOutcome::MissingCover { directory } => {
            return Ok(RunSummary::skipped(&directory));
        }
        ScanOutcome::Found(scan) => scan,
    };

    let mut summary = RunSummary::new(&scan.directory);

    let stale = remove_stale_scratch_dirs(&scan.directory);
    if stale > 0 {
        log::warn!(
            "Removed {} scratch director{} left by an interrupted run",
            stale,
            if stale == 1 { "y" } else { "ies" }
        );
    }

    if scan.audio_files.is_empty() {
        summary.notice(format!("No MP3 or FLAC files found in {}", directory.display()));
        return Ok(summary);
    }

    let ffmpeg = find_ffmpeg(settings.ffmpeg_path.as_deref())?;

    for audio_path in &scan.audio_files {
        summary.notice(progress_line(audio_path, &scan.cover_path));
        let result = embed_art_into_file(&ffmpeg, audio_path, &scan.cover_path);

        match &result.error {
            Some(error) => log::error!(
                "Failed to add {} to {}: {}",
                COVER_FILENAME,
                result.file_name(),
                error
            ),
            None if settings.verify_embedded_art => verify(audio_path),
            None => {}
        }

        summary.results.push(result);
    }

    let line = format!(
        "Embedded {} into {} of {} file(s) in {}",
        COVER_FILENAME,
        summary.succeeded(),
        summary.attempted(),
        summary.directory.display()
    );
    summary.notice(line);

    Ok(summary)
}

/// Log what a rewritten file now carries; read problems are only warnings
fn verify(audio_path: &Path) {
    match read_embedded_art(audio_path) {
        Ok(art) if art.has_art() => log::debug!(
            "{} has {} embedded picture(s), {} front cover(s)",
            audio_path.display(),
            art.pictures,
            art.front_covers
        ),
        Ok(_) => log::warn!("No embedded picture found in {}", audio_path.display()),
        Err(e) => log::warn!("Could not verify {}: {}", audio_path.display(), e),
    }
}
