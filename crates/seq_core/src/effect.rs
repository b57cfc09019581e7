use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Snapshot of the list taken at start; the list may not change until the run ends.
    StartTransfer {
        entries: Vec<PathBuf>,
        destination: PathBuf,
        strip_tags: bool,
    },
    CancelTransfer,
}
