use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use seq_logging::{seq_debug, seq_error, seq_info, seq_warn};

use crate::persist::ensure_destination_dir;
use crate::sink::{ChannelEventSink, EventSink};
use crate::strip::TagStripper;
use crate::transfer::{RawCopy, Transfer};
use crate::{CancelToken, JobSpec, ProgressEvent, RunState, RunSummary, StartError, TransferEvent};

const WORKER_THREAD_NAME: &str = "seq-transfer";

/// The two per-entry transformations a run chooses between.
pub struct Transfers {
    copy: Box<dyn Transfer>,
    strip: Box<dyn Transfer>,
}

impl Transfers {
    pub fn new(copy: impl Transfer + 'static, strip: impl Transfer + 'static) -> Self {
        Self {
            copy: Box::new(copy),
            strip: Box::new(strip),
        }
    }

    fn select(&self, strip_tags: bool) -> &dyn Transfer {
        if strip_tags {
            self.strip.as_ref()
        } else {
            self.copy.as_ref()
        }
    }
}

impl Default for Transfers {
    fn default() -> Self {
        Self::new(RawCopy, TagStripper)
    }
}

/// Run one job to a terminal state on the calling thread.
///
/// Entries are processed strictly in list order. Cancellation is observed
/// only between entries, and a failing entry is reported and skipped. A
/// `Completed` event is always the last event emitted.
pub fn run_job(
    spec: &JobSpec,
    transfers: &Transfers,
    sink: &dyn EventSink,
    cancel: &CancelToken,
) -> RunSummary {
    let total = spec.total();
    let transfer = transfers.select(spec.strip_tags());
    seq_info!(
        "Transfer started: {} entries -> {:?} (strip_tags={})",
        total,
        spec.destination_dir(),
        spec.strip_tags()
    );

    let mut index = 0;
    let mut failed = 0;
    let mut outcome = RunState::Completed;

    for entry in spec.entries() {
        if cancel.is_cancelled() {
            outcome = RunState::Cancelled;
            break;
        }
        index += 1;
        let dest = spec.destination_for(entry);
        sink.emit(TransferEvent::Progress(ProgressEvent {
            index,
            total,
            label: format!("processing {}", entry.file_name()),
        }));
        seq_debug!("[{}/{}] {:?} -> {:?}", index, total, entry.source_path, dest);

        if let Err(error) = transfer.transfer(&entry.source_path, &dest) {
            failed += 1;
            seq_warn!(
                "[{}/{}] failed to write {:?} -> {:?}: {}",
                index,
                total,
                entry.source_path,
                dest,
                error
            );
            sink.emit(TransferEvent::EntryFailed {
                index,
                path: entry.source_path.clone(),
                error,
            });
        }
    }

    let summary = RunSummary {
        outcome,
        processed: index,
        total,
        failed,
    };
    seq_info!(
        "Transfer {}: {}/{} processed, {} failed",
        summary.outcome,
        summary.processed,
        summary.total,
        summary.failed
    );
    sink.emit(TransferEvent::Completed(summary.clone()));
    summary
}

struct ActiveRun {
    cancel: CancelToken,
    worker: JoinHandle<()>,
}

/// Owns the event channel and at most one background run.
///
/// Events are drained through `try_recv`/`recv_timeout`; draining the
/// `Completed` event frees the handle for the next `start`.
pub struct TransferEngine {
    transfers: Arc<Transfers>,
    event_tx: mpsc::Sender<TransferEvent>,
    event_rx: mpsc::Receiver<TransferEvent>,
    active: Option<ActiveRun>,
    last_outcome: Option<RunState>,
}

impl TransferEngine {
    pub fn new() -> Self {
        Self::with_transfers(Transfers::default())
    }

    pub fn with_transfers(transfers: Transfers) -> Self {
        let (event_tx, event_rx) = mpsc::channel();
        Self {
            transfers: Arc::new(transfers),
            event_tx,
            event_rx,
            active: None,
            last_outcome: None,
        }
    }

    /// Validate preconditions and hand `spec` to a new worker thread.
    pub fn start(&mut self, spec: JobSpec) -> Result<(), StartError> {
        if self.active.is_some() {
            return Err(StartError::AlreadyRunning);
        }
        ensure_destination_dir(spec.destination_dir())?;

        let cancel = CancelToken::new();
        let worker_cancel = cancel.clone();
        let transfers = Arc::clone(&self.transfers);
        let sink = ChannelEventSink::new(self.event_tx.clone());

        let worker = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || {
                run_job(&spec, &transfers, &sink, &worker_cancel);
            })
            .map_err(StartError::Spawn)?;

        self.active = Some(ActiveRun { cancel, worker });
        Ok(())
    }

    /// Request cancellation; it takes effect before the next entry.
    pub fn cancel(&self) -> bool {
        match &self.active {
            Some(run) => {
                seq_info!("Cancellation requested");
                run.cancel.cancel();
                true
            }
            None => false,
        }
    }

    /// Token of the active run, for cancelling from another thread.
    pub fn cancel_token(&self) -> Option<CancelToken> {
        self.active.as_ref().map(|run| run.cancel.clone())
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// `Running` until completion is drained, then the outcome of that run.
    pub fn state(&self) -> RunState {
        if self.active.is_some() {
            RunState::Running
        } else {
            self.last_outcome.unwrap_or(RunState::Idle)
        }
    }

    pub fn try_recv(&mut self) -> Option<TransferEvent> {
        match self.event_rx.try_recv() {
            Ok(event) => {
                self.observe(&event);
                Some(event)
            }
            Err(_) => self.drain_exited_worker(),
        }
    }

    pub fn recv_timeout(&mut self, timeout: Duration) -> Option<TransferEvent> {
        match self.event_rx.recv_timeout(timeout) {
            Ok(event) => {
                self.observe(&event);
                Some(event)
            }
            Err(_) => self.drain_exited_worker(),
        }
    }

    fn observe(&mut self, event: &TransferEvent) {
        if let TransferEvent::Completed(summary) = event {
            self.last_outcome = Some(summary.outcome);
            if let Some(run) = self.active.take() {
                // The worker returns right after emitting completion.
                if run.worker.join().is_err() {
                    seq_error!("Transfer worker panicked after completion");
                }
            }
        }
    }

    /// Called on an empty channel: picks up events that raced the probe and
    /// frees the handle if the worker exited without emitting completion.
    fn drain_exited_worker(&mut self) -> Option<TransferEvent> {
        let finished = self
            .active
            .as_ref()
            .is_some_and(|run| run.worker.is_finished());
        if !finished {
            return None;
        }
        if let Ok(event) = self.event_rx.try_recv() {
            self.observe(&event);
            return Some(event);
        }
        if let Some(run) = self.active.take() {
            if run.worker.join().is_err() {
                seq_error!("Transfer worker panicked before completion");
            } else {
                seq_error!("Transfer worker stopped without completing");
            }
            self.last_outcome = Some(RunState::Cancelled);
        }
        None
    }
}

impl Default for TransferEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TransferEngine {
    fn drop(&mut self) {
        self.cancel();
    }
}
