use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;

use seq_logging::seq_debug;

use crate::{StartError, TransferError};

/// Destination must already exist and be a directory; it is never created.
pub fn ensure_destination_dir(dir: &Path) -> Result<(), StartError> {
    match fs::metadata(dir) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(StartError::DestinationNotDirectory(dir.to_path_buf())),
        Err(_) => Err(StartError::DestinationMissing(dir.to_path_buf())),
    }
}

/// Write `content` to `target`, creating or truncating it.
///
/// The file is written in place rather than renamed from a temp file: devices
/// enumerate directory entries in creation order, and a rename can reuse the
/// slot of an earlier deleted temp entry. A failed write removes the partial
/// target.
pub fn write_destination(target: &Path, content: &mut dyn Read) -> Result<u64, TransferError> {
    let result = File::create(target).and_then(|mut file| {
        let written = io::copy(content, &mut file)?;
        file.flush()?;
        file.sync_all()?;
        Ok(written)
    });

    result.map_err(|err| {
        discard_partial(target);
        TransferError::new(target, err)
    })
}

pub(crate) fn discard_partial(target: &Path) {
    if let Err(err) = fs::remove_file(target) {
        if err.kind() != io::ErrorKind::NotFound {
            seq_debug!("Could not remove partial file {:?}: {}", target, err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[test]
    fn existing_directory_is_accepted() {
        let temp = TempDir::new().unwrap();
        ensure_destination_dir(temp.path()).unwrap();
    }

    #[test]
    fn missing_directory_is_not_created() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("out");
        let err = ensure_destination_dir(&missing).unwrap_err();
        assert!(matches!(err, StartError::DestinationMissing(_)));
        assert!(!missing.exists());
    }

    #[test]
    fn file_is_not_a_destination() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("not_a_dir");
        fs::write(&file_path, "x").unwrap();
        let err = ensure_destination_dir(&file_path).unwrap_err();
        assert!(matches!(err, StartError::DestinationNotDirectory(_)));
    }

    #[test]
    fn write_replaces_existing_content() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("track.mp3");
        fs::write(&target, b"old and longer content").unwrap();

        let written = write_destination(&target, &mut Cursor::new(b"new".to_vec())).unwrap();
        assert_eq!(written, 3);
        assert_eq!(fs::read(&target).unwrap(), b"new");
    }

    #[test]
    fn write_into_missing_parent_reports_target() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("gone").join("track.mp3");
        let err = write_destination(&target, &mut Cursor::new(b"data".to_vec())).unwrap_err();
        assert_eq!(err.path, target);
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
