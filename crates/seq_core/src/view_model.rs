use std::path::PathBuf;

use crate::{EntryFailure, Progress, RunStatus};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub rows: Vec<EntryRowView>,
    pub destination_label: String,
    pub strip_tags: bool,
    pub status: RunStatus,
    pub status_text: String,
    pub progress: Option<Progress>,
    pub failures: Vec<EntryFailure>,
    pub start_enabled: bool,
    pub cancel_enabled: bool,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRowView {
    /// 1-based position in the write order.
    pub position: usize,
    pub file_name: String,
    pub path: PathBuf,
    pub selected: bool,
}
