use std::path::{Path, PathBuf};

use crate::view_model::{AppViewModel, EntryRowView};

pub(crate) const STATUS_READY: &str = "Ready (add files or folders)";
pub(crate) const STATUS_DONE: &str = "Done";
pub(crate) const STATUS_CANCELLED: &str = "Cancelled";
pub(crate) const STATUS_NO_DESTINATION: &str = "Select a destination folder first";
pub(crate) const STATUS_EMPTY_LIST: &str = "The file list is empty";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunStatus {
    #[default]
    Idle,
    Running,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub index: usize,
    pub total: usize,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFailure {
    pub index: usize,
    pub path: PathBuf,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    entries: Vec<PathBuf>,
    selected: Option<usize>,
    destination: Option<PathBuf>,
    strip_tags: bool,
    status: RunStatus,
    /// Restored when the engine refuses to start.
    status_before_run: RunStatus,
    progress: Option<Progress>,
    failures: Vec<EntryFailure>,
    status_text: String,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            selected: None,
            destination: None,
            strip_tags: false,
            status: RunStatus::Idle,
            status_before_run: RunStatus::Idle,
            progress: None,
            failures: Vec::new(),
            status_text: STATUS_READY.to_string(),
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn destination(&self) -> Option<&Path> {
        self.destination.as_deref()
    }

    pub fn strip_tags(&self) -> bool {
        self.strip_tags
    }

    pub fn failures(&self) -> &[EntryFailure] {
        &self.failures
    }

    pub fn is_running(&self) -> bool {
        self.status == RunStatus::Running
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            rows: self
                .entries
                .iter()
                .enumerate()
                .map(|(row, path)| EntryRowView {
                    position: row + 1,
                    file_name: path
                        .file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                    path: path.clone(),
                    selected: self.selected == Some(row),
                })
                .collect(),
            destination_label: self
                .destination
                .as_ref()
                .map(|dir| dir.display().to_string())
                .unwrap_or_else(|| "(not selected)".to_string()),
            strip_tags: self.strip_tags,
            status: self.status,
            status_text: self.status_text.clone(),
            progress: self.progress.clone(),
            failures: self.failures.clone(),
            start_enabled: !self.is_running(),
            cancel_enabled: self.is_running(),
            dirty: self.dirty,
        }
    }

    /// Returns whether the view changed since the last call, and resets it.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn append_entries(&mut self, paths: Vec<PathBuf>) {
        if paths.is_empty() {
            return;
        }
        self.entries.extend(paths);
        self.mark_dirty();
    }

    pub(crate) fn select(&mut self, row: usize) {
        if row < self.entries.len() && self.selected != Some(row) {
            self.selected = Some(row);
            self.mark_dirty();
        }
    }

    pub(crate) fn move_selected_up(&mut self) {
        let Some(row) = self.selected else {
            return;
        };
        if row == 0 {
            return;
        }
        self.entries.swap(row, row - 1);
        self.selected = Some(row - 1);
        self.mark_dirty();
    }

    pub(crate) fn move_selected_down(&mut self) {
        let Some(row) = self.selected else {
            return;
        };
        if row + 1 >= self.entries.len() {
            return;
        }
        self.entries.swap(row, row + 1);
        self.selected = Some(row + 1);
        self.mark_dirty();
    }

    pub(crate) fn clear_entries(&mut self) {
        if self.entries.is_empty() && self.selected.is_none() {
            return;
        }
        self.entries.clear();
        self.selected = None;
        self.mark_dirty();
    }

    pub(crate) fn set_destination(&mut self, dir: PathBuf) {
        self.destination = Some(dir);
        self.mark_dirty();
    }

    pub(crate) fn set_strip_tags(&mut self, strip: bool) {
        if self.strip_tags != strip {
            self.strip_tags = strip;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_status_text(&mut self, text: impl Into<String>) {
        self.status_text = text.into();
        self.mark_dirty();
    }

    pub(crate) fn begin_run(&mut self) {
        self.status_before_run = self.status;
        self.status = RunStatus::Running;
        self.progress = None;
        self.failures.clear();
        self.mark_dirty();
    }

    pub(crate) fn reject_run(&mut self, reason: String) {
        self.status = self.status_before_run;
        self.progress = None;
        self.set_status_text(reason);
    }

    pub(crate) fn apply_progress(&mut self, index: usize, total: usize, label: String) {
        self.status_text = label.clone();
        self.progress = Some(Progress {
            index,
            total,
            label,
        });
        self.mark_dirty();
    }

    pub(crate) fn record_failure(&mut self, index: usize, path: PathBuf, message: String) {
        self.failures.push(EntryFailure {
            index,
            path,
            message,
        });
        self.mark_dirty();
    }

    /// `processed == total` means the list was exhausted; anything less was cancelled.
    pub(crate) fn finish_run(&mut self, processed: usize, total: usize) {
        if processed == total {
            self.status = RunStatus::Completed;
            self.status_text = STATUS_DONE.to_string();
        } else {
            self.status = RunStatus::Cancelled;
            self.status_text = STATUS_CANCELLED.to_string();
        }
        self.mark_dirty();
    }
}
