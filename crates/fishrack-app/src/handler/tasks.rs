//! Background task completions

use fishrack_api::MoveRequest;
use fishrack_core::prelude::*;
use fishrack_core::TankId;

use crate::message::{Message, TaskKind, TaskOutcome};
use crate::state::AppState;

use super::{Task, UpdateResult};

pub fn handle_refresh(state: &mut AppState) -> UpdateResult {
    if !state.can_issue_requests() {
        return UpdateResult::none();
    }
    state.loading = true;
    UpdateResult::task(Task::LoadRacks {
        generation: state.current_generation(),
    })
}

/// Move a tank to an empty cell. Reached through the drop callback of the
/// grid; the rack list level owns this request.
pub fn handle_move_requested(
    state: &mut AppState,
    tank_id: TankId,
    from: String,
    to: String,
) -> UpdateResult {
    if !state.can_issue_requests() {
        return UpdateResult::none();
    }
    info!("Moving tank {} from {} to {}", tank_id, from, to);
    let generation = state.current_generation();
    if let Some(view) = state.view.as_mut() {
        view.loading = true;
    }
    UpdateResult::task(Task::MoveTank {
        generation,
        id: tank_id,
        request: MoveRequest { position: to },
    })
}

/// Apply a finished task.
///
/// The rack list is always replaced on a successful fetch. View state
/// (editor, dialogs, error slot, progress) is only touched when the task was
/// issued by the current view.
pub fn handle_task_finished(
    state: &mut AppState,
    generation: u64,
    kind: TaskKind,
    outcome: TaskOutcome,
) -> UpdateResult {
    if kind == TaskKind::LoadRacks {
        state.loading = false;
    }
    let current = state.current_generation() == generation;
    if !current {
        debug!(
            "{:?} finished for stale view generation {} (current {})",
            kind,
            generation,
            state.current_generation()
        );
    }

    match outcome {
        TaskOutcome::Refreshed(racks) => {
            if kind == TaskKind::LoadRacks {
                state.error = None;
            }
            state.set_racks(racks);
            if current {
                if let Some(view) = state.view.as_mut().filter(|v| v.generation == generation) {
                    view.loading = false;
                    view.error = None;
                    if kind.closes_editor() {
                        view.editor = None;
                    }
                    if kind == TaskKind::UpdateRowConfig {
                        view.row_config = None;
                    }
                }
            }
            UpdateResult::none()
        }

        TaskOutcome::RefreshFailed(message) => {
            warn!("{:?} succeeded but refetch failed: {}", kind, message);
            if let Some(view) = current_view(state, generation) {
                view.loading = false;
                view.error = Some(message);
                if kind.closes_editor() {
                    view.editor = None;
                }
                if kind == TaskKind::UpdateRowConfig {
                    view.row_config = None;
                }
            } else {
                state.error = Some(message);
            }
            UpdateResult::none()
        }

        TaskOutcome::Failed(message) => {
            error!("{:?} failed: {}", kind, message);
            if kind == TaskKind::LoadRacks {
                state.error = Some(message);
                if let Some(view) = current_view(state, generation) {
                    view.loading = false;
                }
            } else if let Some(view) = current_view(state, generation) {
                view.loading = false;
                view.error = Some(message);
            }
            UpdateResult::none()
        }

        TaskOutcome::AuthFailed => {
            if let Some(view) = current_view(state, generation) {
                view.loading = false;
            }
            UpdateResult::message(Message::AuthenticationFailed)
        }
    }
}

fn current_view(state: &mut AppState, generation: u64) -> Option<&mut crate::state::RackView> {
    state.view.as_mut().filter(|v| v.generation == generation)
}

/// Stop issuing requests and surface the re-authentication banner
pub fn handle_authentication_failed(state: &mut AppState) -> UpdateResult {
    warn!("Session rejected; requests suspended until re-authentication");
    state.auth_failed = true;
    state.loading = false;
    state.confirm_dialog = None;
    if let Some(view) = state.view.as_mut() {
        view.loading = false;
        view.drag = None;
    }
    UpdateResult::none()
}
