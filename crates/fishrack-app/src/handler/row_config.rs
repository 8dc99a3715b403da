//! Row configuration dialog handlers

use fishrack_api::RowConfigRequest;
use fishrack_core::prelude::*;

use crate::input_key::InputKey;
use crate::row_config::RowConfigEditor;
use crate::state::AppState;

use super::{Task, UpdateResult};

pub fn handle_open(state: &mut AppState) -> UpdateResult {
    let Some(editor) = state.current_rack().map(RowConfigEditor::new) else {
        return UpdateResult::none();
    };
    if let Some(view) = state.view.as_mut() {
        if view.editor.is_none() {
            view.drag = None;
            view.row_config = Some(editor);
        }
    }
    UpdateResult::none()
}

pub fn handle_input(state: &mut AppState, key: InputKey) -> UpdateResult {
    if let Some(editor) = state.view.as_mut().and_then(|v| v.row_config.as_mut()) {
        editor.handle_key(key);
    }
    UpdateResult::none()
}

pub fn handle_close(state: &mut AppState) -> UpdateResult {
    if let Some(view) = state.view.as_mut() {
        view.row_config = None;
    }
    UpdateResult::none()
}

/// Sanitize the edited overrides and send them
pub fn handle_save(state: &mut AppState) -> UpdateResult {
    if !state.can_issue_requests() {
        return UpdateResult::none();
    }
    let Some(view) = state.view.as_mut() else {
        return UpdateResult::none();
    };
    if view.is_saving() {
        return UpdateResult::none();
    }
    let Some(editor) = view.row_config.as_ref() else {
        return UpdateResult::none();
    };

    let row_configs = editor.sanitized();
    debug!(
        "Saving {} row overrides for rack {}",
        row_configs.len(),
        view.rack_id
    );
    view.loading = true;
    UpdateResult::task(Task::UpdateRowConfig {
        generation: view.generation,
        rack_id: view.rack_id,
        request: RowConfigRequest { row_configs },
    })
}
