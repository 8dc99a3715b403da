//! Tank editor handlers: input, save, delete

use fishrack_api::{NewTank, SwapRequest};
use fishrack_core::prelude::*;
use fishrack_core::{GridCell, Position, TankId, TankSize};

use crate::confirm_dialog::{ConfirmDialogState, GateDecision};
use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::AppState;
use crate::tank_editor::ValidDraft;

use super::{Task, UpdateResult};

pub fn handle_editor_input(state: &mut AppState, key: InputKey) -> UpdateResult {
    if let Some(view) = state.view.as_mut() {
        if view.is_saving() {
            return UpdateResult::none();
        }
        if let Some(editor) = view.editor.as_mut() {
            editor.handle_key(key);
        }
    }
    UpdateResult::none()
}

pub fn handle_close_editor(state: &mut AppState) -> UpdateResult {
    if let Some(view) = state.view.as_mut() {
        view.editor = None;
    }
    UpdateResult::none()
}

/// Validate the draft and issue create, update or swap
pub fn handle_save(state: &mut AppState) -> UpdateResult {
    let Some(view) = state.view.as_mut() else {
        return UpdateResult::none();
    };
    if view.is_saving() {
        return UpdateResult::none();
    }
    let Some(editor) = view.editor.as_mut() else {
        return UpdateResult::none();
    };

    let valid = match editor.draft.validate() {
        Ok(valid) => valid,
        Err(errors) => {
            debug!("Draft rejected: {:?}", errors);
            editor.errors = errors;
            return UpdateResult::none();
        }
    };
    editor.errors.clear();
    let id = editor.draft.id;
    let generation = view.generation;
    let rack_id = view.rack_id;

    if !state.can_issue_requests() {
        return UpdateResult::none();
    }

    let task = match (id, valid) {
        (
            Some(id),
            ValidDraft {
                replacement: Some(target),
                fields,
            },
        ) => match swap_request(state, id, fields.size, target) {
            Ok(request) => Task::SwapTanks {
                generation,
                request,
            },
            Err(err) => {
                warn!("Swap rejected: {}", err);
                if let Some(view) = state.view.as_mut() {
                    view.error = Some(err.to_string());
                }
                return UpdateResult::none();
            }
        },
        (None, valid) => Task::CreateTank {
            generation,
            tank: NewTank {
                rack_id,
                fields: valid.fields,
            },
        },
        (Some(id), valid) => Task::UpdateTank {
            generation,
            id,
            fields: valid.fields,
        },
    };

    if let Some(view) = state.view.as_mut() {
        view.loading = true;
    }
    UpdateResult::task(task)
}

/// Check a swap requested through the editor's replacement field against the
/// grid: bounds first, then occupancy, then the draft's size
fn swap_request(
    state: &AppState,
    id: TankId,
    draft_size: TankSize,
    target: Position,
) -> Result<SwapRequest> {
    let grid = state
        .grid()
        .ok_or_else(|| Error::out_of_bounds(target.encode()))?;
    let own_label = grid
        .find_tank(id)
        .map(|pos| pos.encode())
        .ok_or(Error::TankNotPlaced { id })?;

    if !grid.contains(target) {
        return Err(Error::out_of_bounds(target.encode()));
    }
    match grid.cell(target) {
        Some(GridCell::Occupied(other)) if other.size != draft_size => Err(Error::SizeMismatch {
            size: draft_size,
            target_size: other.size,
        }),
        Some(GridCell::Occupied(other)) => Ok(SwapRequest {
            tank1_id: id,
            tank2_id: other.id,
            position1: own_label,
            position2: target.encode(),
        }),
        _ => Err(Error::no_tank_at(target.encode())),
    }
}

/// Ask the confirmation gate before deleting the edited tank
pub fn handle_delete(state: &mut AppState) -> UpdateResult {
    let Some(view) = state.view.as_ref() else {
        return UpdateResult::none();
    };
    if view.is_saving() {
        return UpdateResult::none();
    }
    let Some(draft) = view.editor.as_ref().map(|e| &e.draft) else {
        return UpdateResult::none();
    };
    let Some(tank_id) = draft.id else {
        return UpdateResult::none();
    };
    let generation = view.generation;
    let prompt = format!("Delete the tank at {}?", draft.position);

    match state.gate.check(&prompt) {
        GateDecision::Approved => UpdateResult::message(Message::ConfirmDelete {
            generation,
            tank_id,
        }),
        GateDecision::Denied => {
            debug!("Delete of tank {} denied", tank_id);
            UpdateResult::none()
        }
        GateDecision::Deferred => {
            state.confirm_dialog = Some(ConfirmDialogState::new(
                "Delete tank",
                prompt,
                vec![
                    (
                        "Delete",
                        Message::ConfirmDelete {
                            generation,
                            tank_id,
                        },
                    ),
                    ("Cancel", Message::CancelConfirm),
                ],
            ));
            UpdateResult::none()
        }
    }
}

/// Deletion confirmed: issue the request if the view is still the one that
/// asked
pub fn handle_confirm_delete(state: &mut AppState, generation: u64, tank_id: TankId) -> UpdateResult {
    state.confirm_dialog = None;
    if !state.can_issue_requests() {
        return UpdateResult::none();
    }
    let Some(view) = state.view.as_mut() else {
        return UpdateResult::none();
    };
    if view.generation != generation || view.is_saving() {
        debug!("Stale delete confirmation for tank {} ignored", tank_id);
        return UpdateResult::none();
    }
    view.loading = true;
    UpdateResult::task(Task::DeleteTank {
        generation,
        id: tank_id,
    })
}
