use std::path::Path;

/// File extensions (lower-case, without the dot) that get album art embedded
pub const AUDIO_EXTENSIONS: [&str; 2] = ["mp3", "flac"];

/// Check if a file is a supported audio file based on its extension
///
/// The comparison is case-insensitive, so `Track.MP3` and `track.Flac` match.
pub fn is_audio_file(path: &Path) -> bool {
    if let Some(ext) = path.extension() {
        let ext = ext.to_string_lossy().to_lowercase();
        AUDIO_EXTENSIONS.contains(&ext.as_str())
    } else {
        false
    }
}
