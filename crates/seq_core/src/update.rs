use crate::state::{STATUS_EMPTY_LIST, STATUS_NO_DESTINATION};
use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        // The list is frozen for the duration of a run.
        Msg::FilesAdded(_) | Msg::MoveUpClicked | Msg::MoveDownClicked | Msg::ClearClicked
            if state.is_running() =>
        {
            Vec::new()
        }
        Msg::FilesAdded(paths) => {
            state.append_entries(paths);
            Vec::new()
        }
        Msg::RowSelected(row) => {
            state.select(row);
            Vec::new()
        }
        Msg::MoveUpClicked => {
            state.move_selected_up();
            Vec::new()
        }
        Msg::MoveDownClicked => {
            state.move_selected_down();
            Vec::new()
        }
        Msg::ClearClicked => {
            state.clear_entries();
            Vec::new()
        }
        Msg::DestinationChosen(dir) => {
            if !state.is_running() {
                state.set_destination(dir);
            }
            Vec::new()
        }
        Msg::StripTagsToggled(strip) => {
            if !state.is_running() {
                state.set_strip_tags(strip);
            }
            Vec::new()
        }
        Msg::StartClicked => start_transfer(&mut state),
        Msg::CancelClicked => {
            if state.is_running() {
                vec![Effect::CancelTransfer]
            } else {
                Vec::new()
            }
        }
        Msg::StartRejected(reason) => {
            if state.is_running() {
                state.reject_run(reason);
            }
            Vec::new()
        }
        Msg::TransferProgress {
            index,
            total,
            label,
        } => {
            if state.is_running() {
                state.apply_progress(index, total, label);
            }
            Vec::new()
        }
        Msg::EntryFailed {
            index,
            path,
            message,
        } => {
            if state.is_running() {
                state.record_failure(index, path, message);
            }
            Vec::new()
        }
        Msg::TransferFinished { processed, total } => {
            if state.is_running() {
                state.finish_run(processed, total);
            }
            Vec::new()
        }
    };

    (state, effects)
}

fn start_transfer(state: &mut AppState) -> Vec<Effect> {
    if state.is_running() {
        return Vec::new();
    }
    let Some(destination) = state.destination().map(|dir| dir.to_path_buf()) else {
        state.set_status_text(STATUS_NO_DESTINATION);
        return Vec::new();
    };
    if state.entries().is_empty() {
        state.set_status_text(STATUS_EMPTY_LIST);
        return Vec::new();
    }

    state.begin_run();
    vec![Effect::StartTransfer {
        entries: state.entries().to_vec(),
        destination,
        strip_tags: state.strip_tags(),
    }]
}
