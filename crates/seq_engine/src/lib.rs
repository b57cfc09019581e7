//! Seqwrite engine: ordered transfer of audio files into a destination folder.
mod discover;
mod engine;
mod persist;
mod sink;
mod strip;
mod transfer;
mod types;

pub use discover::{discover_sources, has_audio_extension, DiscoverError, DEFAULT_EXTENSIONS};
pub use engine::{run_job, TransferEngine, Transfers};
pub use persist::{ensure_destination_dir, write_destination};
pub use sink::{ChannelEventSink, EventSink};
pub use strip::TagStripper;
pub use transfer::{RawCopy, Transfer};
pub use types::{
    CancelToken, FileEntry, JobSpec, ProgressEvent, RunState, RunSummary, StartError,
    TransferError, TransferEvent,
};
