use std::fs::{self, File};
use std::io::{self, Seek, SeekFrom};
use std::path::Path;

use crate::persist::write_destination;
use crate::TransferError;

/// Per-entry transformation from a source file to its destination path.
///
/// On success exactly one file exists at `dest`; on failure none is left
/// behind by this call.
pub trait Transfer: Send + Sync {
    fn transfer(&self, source: &Path, dest: &Path) -> Result<(), TransferError>;
}

/// Byte-for-byte copy. File timestamps are not carried over.
#[derive(Debug, Default, Clone, Copy)]
pub struct RawCopy;

impl Transfer for RawCopy {
    fn transfer(&self, source: &Path, dest: &Path) -> Result<(), TransferError> {
        reject_same_file(source, dest)?;
        let mut stage = stage_source(source)?;
        write_destination(dest, &mut stage)?;
        Ok(())
    }
}

/// Read all of `source` into an anonymous temp file, rewound to the start.
///
/// The destination is only opened once this has succeeded, so an unreadable
/// source never truncates an existing destination file.
pub(crate) fn stage_source(source: &Path) -> Result<File, TransferError> {
    let mut input = File::open(source).map_err(|err| TransferError::new(source, err))?;
    let mut stage = tempfile::tempfile().map_err(|err| TransferError::new(source, err))?;
    io::copy(&mut input, &mut stage).map_err(|err| TransferError::new(source, err))?;
    rewind(&mut stage).map_err(|err| TransferError::new(source, err))?;
    Ok(stage)
}

pub(crate) fn rewind(file: &mut File) -> io::Result<()> {
    file.seek(SeekFrom::Start(0)).map(|_| ())
}

/// Writing onto the source would truncate it before it is read.
pub(crate) fn reject_same_file(source: &Path, dest: &Path) -> Result<(), TransferError> {
    let (Ok(source_real), Ok(dest_real)) = (fs::canonicalize(source), fs::canonicalize(dest))
    else {
        return Ok(());
    };
    if source_real == dest_real {
        return Err(TransferError::new(
            dest,
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "source and destination are the same file",
            ),
        ));
    }
    Ok(())
}
