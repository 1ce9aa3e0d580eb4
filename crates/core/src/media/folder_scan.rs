use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::shared::constants::MEDIA_EXTENSIONS;

/// Whether the path carries a supported media extension, compared
/// case-insensitively.
pub fn is_media_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| MEDIA_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// List the supported media files directly inside `dir`, deduplicated and
/// sorted. Subdirectories are not descended into; non-media files are
/// skipped silently. An empty result is valid — whether that warrants a
/// warning is the caller's call.
pub fn scan_folder(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut found = BTreeSet::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_media_file(&path) {
            found.insert(path);
        }
    }
    log::debug!("Found {} media file(s) in {}", found.len(), dir.display());
    Ok(found.into_iter().collect())
}
