//! Terminal and JSON-lines presentation of run messages.

use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressStyle};
use seq_core::{AppViewModel, Msg, RunStatus};
use seq_logging::seq_error;
use serde::Serialize;

const BAR_TEMPLATE: &str = "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}";

/// One machine-readable line per message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub(crate) enum JsonEvent {
    Progress {
        index: usize,
        total: usize,
        label: String,
    },
    EntryFailed {
        index: usize,
        path: PathBuf,
        message: String,
    },
    Finished {
        status: &'static str,
        processed: usize,
        total: usize,
        failed: usize,
    },
}

pub(crate) enum Renderer {
    Terminal(ProgressBar),
    Json,
}

impl Renderer {
    pub(crate) fn new(json: bool, total: usize) -> Self {
        if json {
            return Renderer::Json;
        }
        let bar = ProgressBar::new(total as u64);
        let style = ProgressStyle::with_template(BAR_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        bar.set_style(style);
        Renderer::Terminal(bar)
    }

    pub(crate) fn on_msg(&self, msg: &Msg) {
        match self {
            Renderer::Terminal(bar) => match msg {
                Msg::TransferProgress {
                    index,
                    total,
                    label,
                } => {
                    bar.set_length(*total as u64);
                    bar.set_position(*index as u64);
                    bar.set_message(label.clone());
                }
                Msg::EntryFailed { message, .. } => bar.println(format!("failed: {message}")),
                _ => {}
            },
            Renderer::Json => {
                if let Some(event) = json_event(msg) {
                    emit_json(&event);
                }
            }
        }
    }

    pub(crate) fn on_cancel_requested(&self) {
        if let Renderer::Terminal(bar) = self {
            bar.println("cancelling after the current file...");
        }
    }

    pub(crate) fn finish(&self, view: &AppViewModel) {
        let processed = view.progress.as_ref().map_or(0, |p| p.index);
        let total = view.progress.as_ref().map_or(view.rows.len(), |p| p.total);
        match self {
            Renderer::Terminal(bar) => {
                let summary = format!(
                    "{}: {processed}/{total} written in order, {} failed",
                    view.status_text,
                    view.failures.len()
                );
                if view.status == RunStatus::Completed {
                    bar.finish_with_message(summary);
                } else {
                    bar.abandon_with_message(summary);
                }
            }
            Renderer::Json => emit_json(&JsonEvent::Finished {
                status: status_name(view.status),
                processed,
                total,
                failed: view.failures.len(),
            }),
        }
    }
}

fn json_event(msg: &Msg) -> Option<JsonEvent> {
    match msg {
        Msg::TransferProgress {
            index,
            total,
            label,
        } => Some(JsonEvent::Progress {
            index: *index,
            total: *total,
            label: label.clone(),
        }),
        Msg::EntryFailed {
            index,
            path,
            message,
        } => Some(JsonEvent::EntryFailed {
            index: *index,
            path: path.clone(),
            message: message.clone(),
        }),
        _ => None,
    }
}

fn emit_json(event: &JsonEvent) {
    match serde_json::to_string(event) {
        Ok(line) => println!("{line}"),
        Err(err) => seq_error!("Failed to encode event {:?}: {}", event, err),
    }
}

fn status_name(status: RunStatus) -> &'static str {
    match status {
        RunStatus::Idle => "idle",
        RunStatus::Running => "running",
        RunStatus::Completed => "completed",
        RunStatus::Cancelled => "cancelled",
    }
}
