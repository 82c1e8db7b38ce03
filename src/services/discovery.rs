//! Trade file discovery.

use crate::error::{Result, VolatilityError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Recursively list the trade files under `dir`.
///
/// Files whose extension matches `extension` (case-insensitive, leading dot
/// optional) are returned sorted by path. Anything else is logged and skipped.
/// Symlinked directories are not followed.
pub fn discover(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(VolatilityError::NoSuchDirectory(dir.to_path_buf()));
    }

    let extension = extension.trim_start_matches('.');
    let mut found = Vec::new();
    let mut pending = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        for entry in fs::read_dir(&current)? {
            let entry = entry?;
            let file_type = entry.file_type()?;
            let path = entry.path();
            if file_type.is_dir() {
                pending.push(path);
            } else if file_type.is_symlink() && path.is_dir() {
                debug!("Not following directory link {}", path.display());
            } else if has_extension(&path, extension) {
                found.push(path);
            } else {
                warn!(
                    "{} - unknown file format, only \"*.{}\" files are scanned",
                    path.display(),
                    extension
                );
            }
        }
    }

    if found.is_empty() {
        return Err(VolatilityError::EmptyDirectory(dir.to_path_buf()));
    }

    found.sort();
    debug!("Found {} trade files under {}", found.len(), dir.display());
    Ok(found)
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}
