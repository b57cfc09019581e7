use std::time::Duration;

use seq_core::{Effect, Msg};
use seq_engine::{JobSpec, TransferEngine, TransferEvent};
use seq_logging::{seq_error, seq_info};

/// Executes core effects against the transfer engine and turns engine
/// events back into core messages.
pub struct EffectRunner {
    engine: TransferEngine,
    /// Last `(index, total)` seen for the active run.
    last_progress: (usize, usize),
}

impl EffectRunner {
    pub fn new(engine: TransferEngine) -> Self {
        Self {
            engine,
            last_progress: (0, 0),
        }
    }

    /// Returns a follow-up message when the effect could not be carried out.
    pub fn apply(&mut self, effect: Effect) -> Option<Msg> {
        match effect {
            Effect::StartTransfer {
                entries,
                destination,
                strip_tags,
            } => {
                seq_info!(
                    "StartTransfer entries={} destination={:?} strip_tags={}",
                    entries.len(),
                    destination,
                    strip_tags
                );
                self.last_progress = (0, entries.len());
                let started = JobSpec::from_paths(entries, destination, strip_tags)
                    .and_then(|spec| self.engine.start(spec));
                match started {
                    Ok(()) => None,
                    Err(err) => {
                        seq_error!("Transfer not started: {}", err);
                        Some(Msg::StartRejected(err.to_string()))
                    }
                }
            }
            Effect::CancelTransfer => {
                self.engine.cancel();
                None
            }
        }
    }

    pub fn next_msg(&mut self, timeout: Duration) -> Option<Msg> {
        let was_running = self.engine.is_running();
        match self.engine.recv_timeout(timeout) {
            Some(event) => {
                if let TransferEvent::Progress(progress) = &event {
                    self.last_progress = (progress.index, progress.total);
                }
                Some(map_event(event))
            }
            // The worker went away without a completion event.
            None if was_running && !self.engine.is_running() => {
                let (processed, total) = self.last_progress;
                Some(Msg::TransferFinished { processed, total })
            }
            None => None,
        }
    }
}

fn map_event(event: TransferEvent) -> Msg {
    match event {
        TransferEvent::Progress(progress) => Msg::TransferProgress {
            index: progress.index,
            total: progress.total,
            label: progress.label,
        },
        TransferEvent::EntryFailed { index, path, error } => Msg::EntryFailed {
            index,
            path,
            message: error.to_string(),
        },
        TransferEvent::Completed(summary) => Msg::TransferFinished {
            processed: summary.processed,
            total: summary.total,
        },
    }
}
