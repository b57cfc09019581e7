use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Files appended to the end of the list, in order.
    FilesAdded(Vec<PathBuf>),
    /// User selected a row (0-based).
    RowSelected(usize),
    MoveUpClicked,
    MoveDownClicked,
    ClearClicked,
    DestinationChosen(PathBuf),
    StripTagsToggled(bool),
    StartClicked,
    CancelClicked,
    /// The engine refused to start; carries the reason shown to the user.
    StartRejected(String),
    /// Engine progress for the entry about to be written.
    TransferProgress {
        index: usize,
        total: usize,
        label: String,
    },
    /// Engine could not write one entry.
    EntryFailed {
        index: usize,
        path: PathBuf,
        message: String,
    },
    /// Engine worker stopped.
    TransferFinished { processed: usize, total: usize },
}
