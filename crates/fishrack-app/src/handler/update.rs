//! Main update function - handles state transitions (TEA pattern)

use crate::message::Message;
use crate::state::{AppPhase, AppState};

use super::{grid, keys::handle_key, row_config, tank, tasks, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Key(key) => match handle_key(state, key) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        Message::Quit => {
            state.phase = AppPhase::Quitting;
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Rack List Messages
        // ─────────────────────────────────────────────────────────
        Message::Refresh => tasks::handle_refresh(state),
        Message::NextRack => {
            state.cycle_rack(true);
            UpdateResult::none()
        }
        Message::PreviousRack => {
            state.cycle_rack(false);
            UpdateResult::none()
        }
        Message::TankMoveRequested { tank_id, from, to } => {
            tasks::handle_move_requested(state, tank_id, from, to)
        }
        Message::TaskFinished {
            generation,
            kind,
            outcome,
        } => tasks::handle_task_finished(state, generation, kind, outcome),
        Message::AuthenticationFailed => tasks::handle_authentication_failed(state),

        // ─────────────────────────────────────────────────────────
        // Grid Messages
        // ─────────────────────────────────────────────────────────
        Message::MoveCursor(direction) => grid::handle_move_cursor(state, direction),
        Message::ActivateCell(pos) => grid::handle_activate_cell(state, pos),
        Message::DragStart(pos) => grid::handle_drag_start(state, pos),
        Message::Drop(pos) => grid::handle_drop(state, pos),
        Message::CancelDrag => grid::handle_cancel_drag(state),

        // ─────────────────────────────────────────────────────────
        // Tank Editor Messages
        // ─────────────────────────────────────────────────────────
        Message::EditorInput(key) => tank::handle_editor_input(state, key),
        Message::SaveTank => tank::handle_save(state),
        Message::DeleteTank => tank::handle_delete(state),
        Message::CloseEditor => tank::handle_close_editor(state),

        // ─────────────────────────────────────────────────────────
        // Row Config Messages
        // ─────────────────────────────────────────────────────────
        Message::OpenRowConfig => row_config::handle_open(state),
        Message::RowConfigInput(key) => row_config::handle_input(state, key),
        Message::SaveRowConfig => row_config::handle_save(state),
        Message::CloseRowConfig => row_config::handle_close(state),

        // ─────────────────────────────────────────────────────────
        // Confirm Dialog Messages
        // ─────────────────────────────────────────────────────────
        Message::ConfirmDelete {
            generation,
            tank_id,
        } => tank::handle_confirm_delete(state, generation, tank_id),
        Message::ConfirmSelectNext => {
            if let Some(dialog) = state.confirm_dialog.as_mut() {
                dialog.select_next();
            }
            UpdateResult::none()
        }
        Message::ConfirmSelectPrevious => {
            if let Some(dialog) = state.confirm_dialog.as_mut() {
                dialog.select_previous();
            }
            UpdateResult::none()
        }
        Message::ConfirmActivate => match state.confirm_dialog.take() {
            Some(dialog) => match dialog.selected_message() {
                Some(msg) => UpdateResult::message(msg),
                None => UpdateResult::none(),
            },
            None => UpdateResult::none(),
        },
        Message::CancelConfirm => {
            state.confirm_dialog = None;
            UpdateResult::none()
        }
    }
}
