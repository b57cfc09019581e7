use std::path::PathBuf;

use pretty_assertions::assert_eq;
use seq_core::{update, AppState, Msg};

fn paths(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(PathBuf::from).collect()
}

fn with_files(names: &[&str]) -> AppState {
    let (state, _) = update(AppState::new(), Msg::FilesAdded(paths(names)));
    state
}

fn order(state: &AppState) -> Vec<String> {
    state.view().rows.into_iter().map(|row| row.file_name).collect()
}

#[test]
fn files_are_appended_in_order_and_duplicates_kept() {
    let state = with_files(&["a/1.mp3", "b/2.mp3"]);
    let (mut state, effects) = update(state, Msg::FilesAdded(paths(&["a/1.mp3"])));

    assert!(effects.is_empty());
    assert_eq!(order(&state), vec!["1.mp3", "2.mp3", "1.mp3"]);
    let positions: Vec<usize> = state.view().rows.iter().map(|row| row.position).collect();
    assert_eq!(positions, vec![1, 2, 3]);
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn move_up_swaps_with_previous_and_follows_selection() {
    let state = with_files(&["1.mp3", "2.mp3", "3.mp3"]);
    let (state, _) = update(state, Msg::RowSelected(2));
    let (state, _) = update(state, Msg::MoveUpClicked);

    assert_eq!(order(&state), vec!["1.mp3", "3.mp3", "2.mp3"]);
    let selected: Vec<bool> = state.view().rows.iter().map(|row| row.selected).collect();
    assert_eq!(selected, vec![false, true, false]);

    let (state, _) = update(state, Msg::MoveUpClicked);
    let (state, _) = update(state, Msg::MoveUpClicked);
    assert_eq!(order(&state), vec!["3.mp3", "1.mp3", "2.mp3"]);
}

#[test]
fn move_down_stops_at_the_last_row() {
    let state = with_files(&["1.mp3", "2.mp3"]);
    let (state, _) = update(state, Msg::RowSelected(0));
    let (state, _) = update(state, Msg::MoveDownClicked);
    assert_eq!(order(&state), vec!["2.mp3", "1.mp3"]);

    let (mut state, _) = update(state, Msg::MoveDownClicked);
    state.consume_dirty();
    let (mut state, _) = update(state, Msg::MoveDownClicked);
    assert_eq!(order(&state), vec!["2.mp3", "1.mp3"]);
    assert!(!state.consume_dirty());
}

#[test]
fn moves_without_selection_are_noops() {
    let mut state = with_files(&["1.mp3", "2.mp3"]);
    state.consume_dirty();
    let (state, _) = update(state, Msg::MoveUpClicked);
    let (mut state, _) = update(state, Msg::MoveDownClicked);
    assert_eq!(order(&state), vec!["1.mp3", "2.mp3"]);
    assert!(!state.consume_dirty());
}

#[test]
fn out_of_range_selection_is_ignored() {
    let state = with_files(&["1.mp3"]);
    let (state, _) = update(state, Msg::RowSelected(5));
    assert!(state.view().rows.iter().all(|row| !row.selected));
}

#[test]
fn clear_removes_entries_and_selection() {
    let state = with_files(&["1.mp3", "2.mp3"]);
    let (state, _) = update(state, Msg::RowSelected(1));
    let (state, _) = update(state, Msg::ClearClicked);
    assert!(state.view().rows.is_empty());

    let (state, _) = update(state, Msg::FilesAdded(paths(&["3.mp3"])));
    assert!(state.view().rows.iter().all(|row| !row.selected));
}

#[test]
fn destination_and_strip_flag_show_in_view() {
    let state = AppState::new();
    assert_eq!(state.view().destination_label, "(not selected)");

    let (state, _) = update(state, Msg::DestinationChosen(PathBuf::from("/media/usb")));
    let (state, _) = update(state, Msg::StripTagsToggled(true));
    let view = state.view();
    assert_eq!(view.destination_label, "/media/usb");
    assert!(view.strip_tags);
    assert!(view.start_enabled);
    assert!(!view.cancel_enabled);
}
