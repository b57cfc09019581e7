#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::time::{Duration, Instant};

use seq_engine::{
    EventSink, RawCopy, RunSummary, Transfer, TransferEngine, TransferError, TransferEvent,
};

/// MPEG-1 Layer III, 128 kbit/s, 44.1 kHz, no padding.
const FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x00];
pub const FRAME_LEN: usize = 417;

/// Bare audio frames with a payload that never contains a sync byte.
pub fn mpeg_frames(count: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(count * FRAME_LEN);
    for i in 0..count {
        let mut frame = vec![0u8; FRAME_LEN];
        frame[..4].copy_from_slice(&FRAME_HEADER);
        for (j, byte) in frame[40..].iter_mut().enumerate() {
            *byte = ((i + j) % 251) as u8;
        }
        out.extend_from_slice(&frame);
    }
    out
}

/// ID3v2.3 tag holding a single title frame plus padding.
pub fn id3v2_tag(title: &str) -> Vec<u8> {
    let mut frames = Vec::new();
    frames.extend_from_slice(b"TIT2");
    frames.extend_from_slice(&((1 + title.len()) as u32).to_be_bytes());
    frames.extend_from_slice(&[0, 0]);
    frames.push(0);
    frames.extend_from_slice(title.as_bytes());
    frames.extend_from_slice(&[0u8; 16]);

    let size = frames.len() as u32;
    let mut tag = Vec::with_capacity(10 + frames.len());
    tag.extend_from_slice(b"ID3");
    tag.extend_from_slice(&[3, 0, 0]);
    tag.extend_from_slice(&[
        ((size >> 21) & 0x7F) as u8,
        ((size >> 14) & 0x7F) as u8,
        ((size >> 7) & 0x7F) as u8,
        (size & 0x7F) as u8,
    ]);
    tag.extend_from_slice(&frames);
    tag
}

/// 128-byte ID3v1 trailer.
pub fn id3v1_tag(title: &str) -> Vec<u8> {
    let mut tag = vec![0u8; 128];
    tag[..3].copy_from_slice(b"TAG");
    let title = title.as_bytes();
    let len = title.len().min(30);
    tag[3..3 + len].copy_from_slice(&title[..len]);
    tag[127] = 0xFF;
    tag
}

/// APEv2 tag with a header and a footer holding one text item.
pub fn ape_tag(key: &str, value: &str) -> Vec<u8> {
    let mut items = Vec::new();
    items.extend_from_slice(&(value.len() as u32).to_le_bytes());
    items.extend_from_slice(&0u32.to_le_bytes());
    items.extend_from_slice(key.as_bytes());
    items.push(0);
    items.extend_from_slice(value.as_bytes());

    // The size covers the items and the footer, not the header.
    let size = (items.len() + 32) as u32;
    let block = |flags: u32| {
        let mut out = Vec::with_capacity(32);
        out.extend_from_slice(b"APETAGEX");
        out.extend_from_slice(&2000u32.to_le_bytes());
        out.extend_from_slice(&size.to_le_bytes());
        out.extend_from_slice(&1u32.to_le_bytes());
        out.extend_from_slice(&flags.to_le_bytes());
        out.extend_from_slice(&[0u8; 8]);
        out
    };

    let has_header = 1u32 << 31;
    let mut tag = block(has_header | (1 << 29));
    tag.extend_from_slice(&items);
    tag.extend_from_slice(&block(has_header));
    tag
}

/// A tagged MP3 on disk; returns the bare frames it wraps.
pub fn write_tagged_mp3(path: &Path, title: &str, frame_count: usize) -> Vec<u8> {
    let frames = mpeg_frames(frame_count);
    let mut bytes = id3v2_tag(title);
    bytes.extend_from_slice(&frames);
    bytes.extend_from_slice(&id3v1_tag(title));
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, bytes).unwrap();
    frames
}

pub fn write_file(path: &Path, content: &[u8]) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
    path.to_path_buf()
}

/// File names in `dir`, sorted.
pub fn names_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<TransferEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<TransferEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: TransferEvent) {
        self.events.lock().unwrap().push(event);
    }
}

pub fn progress_indices(events: &[TransferEvent]) -> Vec<usize> {
    events
        .iter()
        .filter_map(|event| match event {
            TransferEvent::Progress(progress) => Some(progress.index),
            _ => None,
        })
        .collect()
}

pub fn failed_paths(events: &[TransferEvent]) -> Vec<PathBuf> {
    events
        .iter()
        .filter_map(|event| match event {
            TransferEvent::EntryFailed { path, .. } => Some(path.clone()),
            _ => None,
        })
        .collect()
}

/// Raw copy that waits for a permit before each entry. Dropping the
/// sender releases every remaining entry.
pub struct GatedCopy {
    gate: Mutex<mpsc::Receiver<()>>,
}

impl GatedCopy {
    pub fn new() -> (Self, mpsc::Sender<()>) {
        let (tx, rx) = mpsc::channel();
        (
            Self {
                gate: Mutex::new(rx),
            },
            tx,
        )
    }
}

impl Transfer for GatedCopy {
    fn transfer(&self, source: &Path, dest: &Path) -> Result<(), TransferError> {
        let _ = self.gate.lock().unwrap().recv();
        RawCopy.transfer(source, dest)
    }
}

const EVENT_TIMEOUT: Duration = Duration::from_secs(10);

/// Next event from the engine, failing the test after a generous timeout.
pub fn next_event(engine: &mut TransferEngine) -> TransferEvent {
    let deadline = Instant::now() + EVENT_TIMEOUT;
    loop {
        if let Some(event) = engine.recv_timeout(Duration::from_millis(50)) {
            return event;
        }
        assert!(Instant::now() < deadline, "timed out waiting for engine event");
    }
}

/// Drain events until completion; returns everything seen and the summary.
pub fn drain_until_complete(engine: &mut TransferEngine) -> (Vec<TransferEvent>, RunSummary) {
    let mut seen = Vec::new();
    loop {
        let event = next_event(engine);
        if let TransferEvent::Completed(summary) = &event {
            let summary = summary.clone();
            seen.push(event);
            return (seen, summary);
        }
        seen.push(event);
    }
}
