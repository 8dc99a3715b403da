//! Grid interaction: cursor, cell activation and drag/drop

use fishrack_api::SwapRequest;
use fishrack_core::prelude::*;
use fishrack_core::{GridCell, Position};

use crate::message::{Direction, Message};
use crate::state::{AppState, DragState};
use crate::tank_editor::{TankDraft, TankEditor};

use super::{Task, UpdateResult};

pub fn handle_move_cursor(state: &mut AppState, direction: Direction) -> UpdateResult {
    let Some(grid) = state.grid() else {
        return UpdateResult::none();
    };
    let Some(cursor) = state.view.as_ref().map(|v| v.cursor) else {
        return UpdateResult::none();
    };

    let rows = grid.row_count() as u32;
    let next = match direction {
        Direction::Up => Position::new(cursor.row.saturating_sub(1), cursor.col),
        Direction::Down if cursor.row + 1 < rows => Position::new(cursor.row + 1, cursor.col),
        Direction::Down => cursor,
        Direction::Left => Position::new(cursor.row, cursor.col.saturating_sub(1)),
        Direction::Right => cursor.right(),
    };
    let last_col = (grid.column_count(next.row) as u32).saturating_sub(1);
    let next = Position::new(next.row, next.col.min(last_col));

    if let Some(view) = state.view.as_mut() {
        view.cursor = next;
    }
    UpdateResult::none()
}

/// Open the editor for a cell: a fresh draft for an empty cell, the tank for
/// an occupied one, the anchor tank for the second half of a large tank
pub fn handle_activate_cell(state: &mut AppState, pos: Position) -> UpdateResult {
    let draft = {
        let Some(grid) = state.grid() else {
            return UpdateResult::none();
        };
        match grid.cell(pos) {
            None => return UpdateResult::none(),
            Some(GridCell::Empty) => TankDraft::empty(pos.encode()),
            Some(GridCell::Occupied(tank)) => TankDraft::from_tank(tank),
            Some(GridCell::Blocked { .. }) => match grid.anchor_of(pos) {
                Some((_, tank)) => TankDraft::from_tank(tank),
                None => return UpdateResult::none(),
            },
        }
    };

    if let Some(view) = state.view.as_mut() {
        if view.editor.is_some() {
            return UpdateResult::none();
        }
        debug!("Opening editor at {} (tank {:?})", pos, draft.id);
        view.cursor = pos;
        view.drag = None;
        view.editor = Some(TankEditor::new(draft));
    }
    UpdateResult::none()
}

/// Pick up the tank in an occupied cell; anything else is ignored
pub fn handle_drag_start(state: &mut AppState, pos: Position) -> UpdateResult {
    let drag = match state.grid().and_then(|g| g.cell(pos)) {
        Some(GridCell::Occupied(tank)) => DragState {
            tank_id: tank.id,
            source: pos,
            size: tank.size,
        },
        _ => return UpdateResult::none(),
    };
    if let Some(view) = state.view.as_mut() {
        view.drag = Some(drag);
    }
    UpdateResult::none()
}

pub fn handle_cancel_drag(state: &mut AppState) -> UpdateResult {
    if let Some(view) = state.view.as_mut() {
        view.drag = None;
    }
    UpdateResult::none()
}

/// Drop the carried tank.
///
/// - same cell or outside the grid: cancel
/// - empty cell: ask the rack list level to move the tank
/// - occupied cell: swap when sizes match
/// - second half of a large tank: rejected
pub fn handle_drop(state: &mut AppState, pos: Position) -> UpdateResult {
    let Some(view) = state.view.as_mut() else {
        return UpdateResult::none();
    };
    let Some(drag) = view.drag.take() else {
        return UpdateResult::none();
    };
    if view.is_saving() {
        debug!("Drop ignored while a request is in flight");
        return UpdateResult::none();
    }
    if pos == drag.source {
        return UpdateResult::none();
    }
    let generation = view.generation;

    let target = match state.grid().and_then(|g| g.cell(pos)) {
        None => {
            debug!("Drop outside the grid at {:?} ignored", pos);
            return UpdateResult::none();
        }
        Some(GridCell::Empty) => None,
        Some(GridCell::Occupied(tank)) => Some((tank.id, tank.size, tank.primary_label().to_string())),
        Some(GridCell::Blocked { anchor }) => {
            debug!("Drop on the second cell of tank {} rejected", anchor);
            return UpdateResult::none();
        }
    };

    let Some((target_id, target_size, target_label)) = target else {
        return UpdateResult::message(Message::TankMoveRequested {
            tank_id: drag.tank_id,
            from: drag.source.encode(),
            to: pos.encode(),
        });
    };

    if target_id == drag.tank_id {
        return UpdateResult::none();
    }
    if target_size != drag.size {
        let err = Error::SizeMismatch {
            size: drag.size,
            target_size,
        };
        warn!("Swap rejected: {}", err);
        if let Some(view) = state.view.as_mut() {
            view.error = Some(err.to_string());
        }
        return UpdateResult::none();
    }
    if !state.can_issue_requests() {
        return UpdateResult::none();
    }

    if let Some(view) = state.view.as_mut() {
        view.loading = true;
    }
    UpdateResult::task(Task::SwapTanks {
        generation,
        request: SwapRequest {
            tank1_id: drag.tank_id,
            tank2_id: target_id,
            position1: drag.source.encode(),
            position2: target_label,
        },
    })
}
