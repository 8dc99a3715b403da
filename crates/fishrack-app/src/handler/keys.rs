//! Key event handlers for UI modes

use crate::input_key::InputKey;
use crate::message::{Direction, Message};
use crate::state::AppState;

/// Map a key to a message for the innermost open layer: confirm dialog,
/// tank editor, row config dialog, then the grid
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    if matches!(key, InputKey::CharCtrl('c')) {
        return Some(Message::Quit);
    }

    if state.confirm_dialog.is_some() {
        return handle_key_confirm(key);
    }

    let view = state.view.as_ref();
    if view.is_some_and(|v| v.editor.is_some()) {
        return handle_key_editor(key);
    }
    if view.is_some_and(|v| v.row_config.is_some()) {
        return handle_key_row_config(key);
    }
    handle_key_grid(state, key)
}

fn handle_key_confirm(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Left | InputKey::BackTab | InputKey::Up => Some(Message::ConfirmSelectPrevious),
        InputKey::Right | InputKey::Tab | InputKey::Down => Some(Message::ConfirmSelectNext),
        InputKey::Enter => Some(Message::ConfirmActivate),
        InputKey::Esc | InputKey::Char('n') => Some(Message::CancelConfirm),
        _ => None,
    }
}

fn handle_key_editor(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc => Some(Message::CloseEditor),
        InputKey::Enter => Some(Message::SaveTank),
        InputKey::CharCtrl('d') => Some(Message::DeleteTank),
        other => Some(Message::EditorInput(other)),
    }
}

fn handle_key_row_config(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc => Some(Message::CloseRowConfig),
        InputKey::Enter => Some(Message::SaveRowConfig),
        other => Some(Message::RowConfigInput(other)),
    }
}

fn handle_key_grid(state: &AppState, key: InputKey) -> Option<Message> {
    let view = state.view.as_ref();
    match key {
        InputKey::Char('q') => Some(Message::Quit),
        InputKey::Char('r') => Some(Message::Refresh),
        InputKey::Char(']') => Some(Message::NextRack),
        InputKey::Char('[') => Some(Message::PreviousRack),

        InputKey::Up | InputKey::Char('k') => Some(Message::MoveCursor(Direction::Up)),
        InputKey::Down | InputKey::Char('j') => Some(Message::MoveCursor(Direction::Down)),
        InputKey::Left | InputKey::Char('h') => Some(Message::MoveCursor(Direction::Left)),
        InputKey::Right | InputKey::Char('l') => Some(Message::MoveCursor(Direction::Right)),

        InputKey::Enter => view.map(|v| Message::ActivateCell(v.cursor)),
        InputKey::Char('m') => view.map(|v| match v.drag {
            Some(_) => Message::Drop(v.cursor),
            None => Message::DragStart(v.cursor),
        }),
        InputKey::Esc => view.and_then(|v| v.drag.map(|_| Message::CancelDrag)),
        InputKey::Char('c') => view.map(|_| Message::OpenRowConfig),
        _ => None,
    }
}
