//! Read-back of embedded album art
//!
//! Used after a file has been replaced to confirm that the picture actually
//! landed in the tag.

use std::path::Path;

use lofty::{PictureType, Probe, TaggedFileExt};

/// Pictures found in an audio file's tags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmbeddedArt {
    /// Total number of embedded pictures across all tags
    pub pictures: usize,
    /// Number of pictures typed as the front cover
    pub front_covers: usize,
}

impl EmbeddedArt {
    pub fn has_art(&self) -> bool {
        self.pictures > 0
    }
}

/// Count the embedded pictures in an audio file
pub fn read_embedded_art(path: &Path) -> Result<EmbeddedArt, String> {
    let tagged_file = Probe::open(path)
        .map_err(|e| format!("Failed to open file: {}", e))?
        .read()
        .map_err(|e| format!("Failed to read file: {}", e))?;

    let mut art = EmbeddedArt::default();
    for tag in tagged_file.tags() {
        for picture in tag.pictures() {
            art.pictures += 1;
            if picture.pic_type() == PictureType::CoverFront {
                art.front_covers += 1;
            }
        }
    }

    Ok(art)
}
