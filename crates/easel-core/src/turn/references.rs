//! Reference image loading

use crate::error::{EaselError, EaselResult};
use easel_session::Part;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;

/// Reference images resolved for one turn
#[derive(Debug, Default)]
pub struct References {
    /// Image parts for the files that exist, in input order
    pub parts: Vec<Part>,
    /// Paths that did not resolve to a file
    pub missing: Vec<PathBuf>,
}

/// Media type guessed from the file extension
pub fn mime_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("heic") => "image/heic",
        Some("heif") => "image/heif",
        _ => "application/octet-stream",
    }
}

/// Read reference images, skipping paths that do not exist.
///
/// A missing file is a warning, not a failure. A file that exists but
/// cannot be read is an error.
pub async fn load_references(paths: &[PathBuf]) -> EaselResult<References> {
    let mut references = References::default();

    for path in paths {
        if !fs::try_exists(path).await.unwrap_or(false) {
            warn!("Reference image not found: {}", path.display());
            references.missing.push(path.clone());
            continue;
        }

        let data = fs::read(path).await.map_err(|e| {
            EaselError::io_with_path(
                format!("Failed to read reference image: {}", e),
                path.display().to_string(),
            )
        })?;
        references.parts.push(Part::blob(mime_type_for(path), data));
    }

    Ok(references)
}
