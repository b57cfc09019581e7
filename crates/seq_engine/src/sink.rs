use std::sync::mpsc;

use crate::TransferEvent;

/// Receives run events in emission order, on the worker's thread.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: TransferEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<TransferEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<TransferEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: TransferEvent) {
        // A dropped receiver means nobody is observing; the run still finishes.
        let _ = self.tx.send(event);
    }
}
