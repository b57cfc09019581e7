use std::path::{Path, PathBuf};

use seq_logging::{seq_debug, seq_warn};
use thiserror::Error;
use walkdir::WalkDir;

/// Extensions picked up when none are configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["mp3"];

#[derive(Debug, Error)]
pub enum DiscoverError {
    #[error("source not found: {}", .0.display())]
    NotFound(PathBuf),
}

/// Expand files and folders into an ordered list of audio files.
///
/// Inputs keep their order. Folders are walked recursively with entries
/// sorted by file name, so the same tree always yields the same list.
pub fn discover_sources(
    inputs: &[PathBuf],
    extensions: &[String],
) -> Result<Vec<PathBuf>, DiscoverError> {
    let mut found = Vec::new();
    for input in inputs {
        if input.is_dir() {
            walk_directory(input, extensions, &mut found);
        } else if input.is_file() {
            if has_audio_extension(input, extensions) {
                found.push(input.clone());
            } else {
                seq_debug!("Skipping {:?}: extension not in {:?}", input, extensions);
            }
        } else {
            return Err(DiscoverError::NotFound(input.clone()));
        }
    }
    Ok(found)
}

fn walk_directory(root: &Path, extensions: &[String], found: &mut Vec<PathBuf>) {
    let walker = WalkDir::new(root).sort_by_file_name();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                seq_warn!("Skipping unreadable entry under {:?}: {}", root, err);
                continue;
            }
        };
        if entry.file_type().is_file() && has_audio_extension(entry.path(), extensions) {
            found.push(entry.into_path());
        }
    }
}

/// Case-insensitive extension match; a leading dot in the configured value is ignored.
pub fn has_audio_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };
    extensions
        .iter()
        .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
}
