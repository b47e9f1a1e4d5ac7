//! Output file naming
//!
//! Generated images are named `output_{turn:03}_{HHMMSS}.{ext}` so they sort
//! chronologically and never collide within a session.

use chrono::NaiveTime;
use std::path::{Path, PathBuf};

/// File extension for a media type
pub fn extension_for(mime_type: &str) -> &'static str {
    match mime_type.to_ascii_lowercase().as_str() {
        "image/png" => "png",
        "image/jpeg" | "image/jpg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "bin",
    }
}

/// Path for an image produced by `turn` (1-based).
///
/// `index` counts images within the same response; the first keeps the
/// plain name, later ones get a numeric suffix.
pub fn output_path(
    output_dir: &Path,
    turn: u32,
    time: NaiveTime,
    mime_type: &str,
    index: usize,
) -> PathBuf {
    let stem = format!("output_{:03}_{}", turn, time.format("%H%M%S"));
    let name = if index == 0 {
        format!("{}.{}", stem, extension_for(mime_type))
    } else {
        format!("{}_{}.{}", stem, index + 1, extension_for(mime_type))
    };
    output_dir.join(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_first_turn_name() {
        let path = output_path(Path::new("photos"), 1, at(9, 5, 7), "image/png", 0);
        assert_eq!(path, PathBuf::from("photos/output_001_090507.png"));
    }

    #[test]
    fn test_extension_follows_media_type() {
        let path = output_path(Path::new("out"), 12, at(23, 59, 0), "image/jpeg", 0);
        assert_eq!(path, PathBuf::from("out/output_012_235900.jpg"));
        assert_eq!(extension_for("IMAGE/WEBP"), "webp");
        assert_eq!(extension_for("application/pdf"), "bin");
    }

    #[test]
    fn test_additional_images_get_suffix() {
        let path = output_path(Path::new("out"), 3, at(10, 0, 0), "image/png", 1);
        assert_eq!(path, PathBuf::from("out/output_003_100000_2.png"));
    }
}
