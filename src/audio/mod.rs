// Audio module - file type detection and embedded art read-back

pub mod detection;
pub mod metadata;

pub use detection::is_audio_file;
pub use metadata::read_embedded_art;
