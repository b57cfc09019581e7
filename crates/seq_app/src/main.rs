mod cli;
mod effects;
mod render;
mod settings;

use std::process::ExitCode;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use seq_core::{update, AppState, Effect, Msg, RunStatus};
use seq_engine::{discover_sources, TransferEngine};
use seq_logging::{seq_info, seq_warn};

use crate::cli::Args;
use crate::effects::EffectRunner;
use crate::render::Renderer;
use crate::settings::load_settings;

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const EXIT_FAILURE: u8 = 1;
const EXIT_INTERRUPTED: u8 = 130;

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run(args: Args) -> anyhow::Result<ExitCode> {
    let loaded = load_settings(args.config.as_deref())?;
    let settings = loaded.settings;
    seq_logging::initialize(
        args.log.unwrap_or(settings.log_destination),
        args.log_level(),
        &settings.log_file,
    );
    if let Some(warning) = loaded.warning {
        seq_warn!("{}", warning);
    }

    let sources = discover_sources(&args.sources, &settings.extensions)?;
    seq_info!("Discovered {} audio files", sources.len());

    let mut state = AppState::new();
    let mut effects = Vec::new();
    for msg in [
        Msg::FilesAdded(sources),
        Msg::DestinationChosen(args.dest.clone()),
        Msg::StripTagsToggled(args.strip_tags_or(settings.strip_tags)),
        Msg::StartClicked,
    ] {
        let (next, produced) = update(state, msg);
        state = next;
        effects.extend(produced);
    }

    let mut runner = EffectRunner::new(TransferEngine::new());
    state = apply_effects(state, &mut runner, effects);
    if state.status() != RunStatus::Running {
        eprintln!("{}", state.view().status_text);
        return Ok(ExitCode::from(EXIT_FAILURE));
    }

    let (interrupt_tx, interrupt_rx) = mpsc::channel();
    ctrlc::set_handler(move || {
        let _ = interrupt_tx.send(());
    })
    .context("installing Ctrl-C handler")?;

    let renderer = Renderer::new(args.json, state.entries().len());
    let mut cancel_requested = false;
    while state.is_running() {
        if !cancel_requested && interrupt_rx.try_recv().is_ok() {
            cancel_requested = true;
            renderer.on_cancel_requested();
            let (next, produced) = update(state, Msg::CancelClicked);
            state = apply_effects(next, &mut runner, produced);
        }
        if let Some(msg) = runner.next_msg(POLL_INTERVAL) {
            renderer.on_msg(&msg);
            state = update(state, msg).0;
        }
    }

    let view = state.view();
    renderer.finish(&view);
    Ok(exit_code(view.status, view.failures.len()))
}

fn apply_effects(mut state: AppState, runner: &mut EffectRunner, effects: Vec<Effect>) -> AppState {
    for effect in effects {
        if let Some(follow_up) = runner.apply(effect) {
            state = update(state, follow_up).0;
        }
    }
    state
}

fn exit_code(status: RunStatus, failures: usize) -> ExitCode {
    match status {
        RunStatus::Cancelled => ExitCode::from(EXIT_INTERRUPTED),
        _ if failures > 0 => ExitCode::from(EXIT_FAILURE),
        _ => ExitCode::SUCCESS,
    }
}
