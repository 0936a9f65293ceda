use resizer_logging::resizer_info;

use crate::{AppState, Effect, Msg, ResizeRequest};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FilesAdded(paths) => {
            // The list is frozen while a batch runs.
            if state.is_running() {
                return (state, Vec::new());
            }
            state.add_files(paths);
            if state.settings().auto_convert && !state.files().is_empty() {
                let request = state.request_from_files();
                submit(&mut state, request)
            } else {
                Vec::new()
            }
        }
        Msg::FilesRemoved(indices) => {
            if !state.is_running() {
                state.remove_files(indices);
            }
            Vec::new()
        }
        Msg::FilesCleared => {
            if !state.is_running() {
                state.clear_files();
            }
            Vec::new()
        }
        Msg::SettingsChanged(settings) => {
            state.set_settings(settings);
            Vec::new()
        }
        Msg::ConvertClicked => {
            let request = state.request_from_files();
            submit(&mut state, request)
        }
        Msg::SubmitBatch(request) => submit(&mut state, request),
        Msg::CancelClicked => match state.request_cancel() {
            Some(batch_id) => vec![Effect::CancelBatch { batch_id }],
            None => Vec::new(),
        },
        Msg::ChunkDone {
            batch_id,
            chunk_index,
            converted,
            failures,
        } => match state.record_chunk(batch_id, chunk_index, converted, failures) {
            Some(summary) => vec![Effect::BatchComplete(summary)],
            None => Vec::new(),
        },
    };

    (state, effects)
}

fn submit(state: &mut AppState, request: ResizeRequest) -> Vec<Effect> {
    match state.begin_batch(request) {
        Ok(effects) => effects,
        Err(rejection) => {
            resizer_info!("Batch not started: {}", rejection);
            Vec::new()
        }
    }
}
