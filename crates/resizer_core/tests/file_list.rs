use std::path::PathBuf;

use resizer_core::{update, AppState, Effect, Msg, ScaleMode, ScaleSettings};

fn added(names: &[&str]) -> Msg {
    Msg::FilesAdded(names.iter().map(PathBuf::from).collect())
}

#[test]
fn only_supported_extensions_are_listed() {
    let (mut state, effects) = update(
        AppState::new(),
        added(&["a.PNG", "notes.txt", "b.jpeg", "c.Jpg", "d.gif"]),
    );

    assert!(effects.is_empty());
    assert_eq!(
        state.view().files,
        vec![
            PathBuf::from("a.PNG"),
            PathBuf::from("b.jpeg"),
            PathBuf::from("c.Jpg")
        ]
    );
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn remove_and_clear_edit_the_list() {
    let (state, _) = update(AppState::new(), added(&["0.png", "1.png", "2.png", "3.png"]));
    let (state, _) = update(state, Msg::FilesRemoved(vec![2, 0, 2, 17]));
    assert_eq!(
        state.files(),
        &[PathBuf::from("1.png"), PathBuf::from("3.png")]
    );

    let (state, _) = update(state, Msg::FilesCleared);
    assert!(state.files().is_empty());
}

#[test]
fn convert_clicked_uses_current_settings() {
    let settings = ScaleSettings {
        mode: ScaleMode::Absolute,
        absolute_width: 640,
        absolute_height: 480,
        ..ScaleSettings::default()
    };
    let (state, _) = update(AppState::new(), Msg::SettingsChanged(settings));
    let (state, _) = update(state, added(&["x.png", "y.jpg"]));
    let (state, effects) = update(state, Msg::ConvertClicked);

    assert_eq!(effects.len(), 1);
    let Effect::ConvertChunk { request, .. } = &effects[0] else {
        panic!("expected dispatch, got {effects:?}");
    };
    assert_eq!(request.mode, ScaleMode::Absolute);
    assert_eq!((request.v0, request.v1), (640, 480));
    assert_eq!(request.paths, state.files());
}

#[test]
fn convert_with_empty_list_does_nothing() {
    let (state, effects) = update(AppState::new(), Msg::ConvertClicked);
    assert!(effects.is_empty());
    assert!(!state.view().busy());
}

#[test]
fn auto_convert_submits_on_add() {
    let settings = ScaleSettings {
        auto_convert: true,
        ..ScaleSettings::default()
    };
    let state = AppState::new().with_settings(settings);
    let (state, effects) = update(state, added(&["dropped.png"]));

    assert_eq!(effects.len(), 1);
    assert!(state.is_running());
}

#[test]
fn list_is_frozen_while_running_and_cleared_on_completion() {
    let (state, _) = update(AppState::new(), added(&["a.png", "b.png"]));
    let (state, _) = update(state, Msg::ConvertClicked);

    let (state, effects) = update(state, added(&["late.png"]));
    assert!(effects.is_empty());
    let (state, _) = update(state, Msg::FilesCleared);
    let (state, _) = update(state, Msg::FilesRemoved(vec![0]));
    assert_eq!(state.files().len(), 2);

    let (state, effects) = update(
        state,
        Msg::ChunkDone {
            batch_id: 1,
            chunk_index: 0,
            converted: 2,
            failures: Vec::new(),
        },
    );
    assert!(matches!(effects.as_slice(), [Effect::BatchComplete(_)]));
    assert!(state.files().is_empty());
    assert!(!state.view().busy());
}
