use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;

/// One source file at a fixed position in the user-defined order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub source_path: PathBuf,
}

impl FileEntry {
    pub fn new(source_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
        }
    }

    /// Final path component; the destination file name for this entry.
    pub fn file_name(&self) -> String {
        self.source_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Immutable snapshot of the inputs for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSpec {
    entries: Vec<FileEntry>,
    destination_dir: PathBuf,
    strip_tags: bool,
}

impl JobSpec {
    /// An empty list is rejected.
    pub fn new(
        entries: Vec<FileEntry>,
        destination_dir: impl Into<PathBuf>,
        strip_tags: bool,
    ) -> Result<Self, StartError> {
        if entries.is_empty() {
            return Err(StartError::EmptyList);
        }
        Ok(Self {
            entries,
            destination_dir: destination_dir.into(),
            strip_tags,
        })
    }

    pub fn from_paths<I, P>(
        paths: I,
        destination_dir: impl Into<PathBuf>,
        strip_tags: bool,
    ) -> Result<Self, StartError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self::new(
            paths.into_iter().map(FileEntry::new).collect(),
            destination_dir,
            strip_tags,
        )
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn destination_dir(&self) -> &Path {
        &self.destination_dir
    }

    pub fn strip_tags(&self) -> bool {
        self.strip_tags
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }

    /// `destination_dir / basename(entry)`. Shared basenames map to the same path.
    pub fn destination_for(&self, entry: &FileEntry) -> PathBuf {
        match entry.source_path.file_name() {
            Some(name) => self.destination_dir.join(name),
            None => self.destination_dir.join(entry.source_path.as_os_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    /// 1-based position of the entry being processed.
    pub index: usize,
    pub total: usize,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Completed,
    Cancelled,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Idle => write!(f, "idle"),
            RunState::Running => write!(f, "running"),
            RunState::Completed => write!(f, "completed"),
            RunState::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Payload of the completion event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// `Completed` or `Cancelled`.
    pub outcome: RunState,
    /// Highest progress index emitted.
    pub processed: usize,
    pub total: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn is_cancelled(&self) -> bool {
        self.outcome == RunState::Cancelled
    }
}

#[derive(Debug)]
pub enum TransferEvent {
    Progress(ProgressEvent),
    EntryFailed {
        index: usize,
        path: PathBuf,
        error: TransferError,
    },
    Completed(RunSummary),
}

/// Failure to transfer one entry: the offending path and the underlying cause.
#[derive(Debug, Error)]
#[error("{}: {source}", .path.display())]
pub struct TransferError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

impl TransferError {
    pub fn new(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }

    /// Source that is not a readable audio container.
    pub(crate) fn invalid_data(path: impl Into<PathBuf>, cause: impl fmt::Display) -> Self {
        Self::new(
            path,
            io::Error::new(io::ErrorKind::InvalidData, cause.to_string()),
        )
    }

    pub fn kind(&self) -> io::ErrorKind {
        self.source.kind()
    }
}

/// Precondition violations reported synchronously by `start`.
#[derive(Debug, Error)]
pub enum StartError {
    #[error("the file list is empty")]
    EmptyList,
    #[error("destination folder does not exist: {}", .0.display())]
    DestinationMissing(PathBuf),
    #[error("destination is not a folder: {}", .0.display())]
    DestinationNotDirectory(PathBuf),
    #[error("a transfer is already running")]
    AlreadyRunning,
    #[error("could not start transfer worker: {0}")]
    Spawn(#[source] io::Error),
}

/// Cooperative cancellation flag shared between the caller and one worker.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}
