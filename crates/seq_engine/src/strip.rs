//! Metadata stripping.
//!
//! The source is staged into an anonymous temp file outside the destination,
//! parsed as an audio container and stripped there. Only a fully stripped
//! stage is written to the destination, so a read or parse failure never
//! touches an existing destination file.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use lofty::{Probe, Tag, TagType, TaggedFile, TaggedFileExt};
use seq_logging::seq_trace;

use crate::persist::write_destination;
use crate::transfer::{reject_same_file, rewind, stage_source, Transfer};
use crate::TransferError;

/// Removes all embedded tags while keeping the audio payload untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct TagStripper;

impl TagStripper {
    /// Stage `source` and strip it, returning the rewound stage.
    pub fn strip_to_stage(&self, source: &Path) -> Result<File, TransferError> {
        let mut stage = stage_source(source)?;
        let tagged = parse_container(&mut stage)
            .map_err(|cause| TransferError::invalid_data(source, cause))?;

        // Removing a tag type the file lacks writes an empty tag of that type.
        for tag_type in present_tag_types(&tagged) {
            seq_trace!("Removing {:?} from {:?}", tag_type, source);
            rewind(&mut stage).map_err(|err| TransferError::new(source, err))?;
            tag_type
                .remove_from(&mut stage)
                .map_err(|cause| TransferError::invalid_data(source, cause))?;
        }

        rewind(&mut stage).map_err(|err| TransferError::new(source, err))?;
        Ok(stage)
    }
}

impl Transfer for TagStripper {
    fn transfer(&self, source: &Path, dest: &Path) -> Result<(), TransferError> {
        reject_same_file(source, dest)?;
        let mut stage = self.strip_to_stage(source)?;
        write_destination(dest, &mut stage)?;
        Ok(())
    }
}

/// Identify and fully parse the staged container.
fn parse_container(stage: &mut File) -> Result<TaggedFile, String> {
    rewind(stage).map_err(|err| err.to_string())?;
    let probe = Probe::new(BufReader::new(&mut *stage))
        .guess_file_type()
        .map_err(|err| err.to_string())?;
    if probe.file_type().is_none() {
        return Err("not a recognized audio container".to_string());
    }
    probe.read().map_err(|err| err.to_string())
}

fn present_tag_types(tagged: &TaggedFile) -> Vec<TagType> {
    let mut types: Vec<TagType> = tagged.tags().iter().map(Tag::tag_type).collect();
    types.dedup();
    types
}
