//! Message types for the application (TEA pattern)

use fishrack_core::{Position, Rack, TankId};

use crate::input_key::InputKey;

/// Cursor movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Kind of background task, used to route completions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    LoadRacks,
    CreateTank,
    UpdateTank,
    DeleteTank,
    SwapTanks,
    MoveTank,
    UpdateRowConfig,
}

impl TaskKind {
    /// Message shown when the service gives no reason for a failure
    pub fn fallback_message(&self) -> &'static str {
        match self {
            TaskKind::LoadRacks => "Failed to load racks",
            TaskKind::CreateTank => "Failed to create tank",
            TaskKind::UpdateTank => "Failed to update tank",
            TaskKind::DeleteTank => "Failed to delete tank",
            TaskKind::SwapTanks => "Failed to swap tanks",
            TaskKind::MoveTank => "Failed to move tank",
            TaskKind::UpdateRowConfig => "Failed to update row configurations",
        }
    }

    /// Whether success closes the tank editor
    pub fn closes_editor(&self) -> bool {
        matches!(
            self,
            TaskKind::CreateTank | TaskKind::UpdateTank | TaskKind::DeleteTank | TaskKind::SwapTanks
        )
    }
}

/// How a background task ended
#[derive(Debug, Clone)]
pub enum TaskOutcome {
    /// The mutation (if any) and the refetch both succeeded
    Refreshed(Vec<Rack>),
    /// The mutation succeeded but the refetch failed
    RefreshFailed(String),
    /// The request was rejected; the message is user-facing
    Failed(String),
    /// The service rejected the session
    AuthFailed,
}

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Quit immediately
    Quit,

    // ─────────────────────────────────────────────────────────
    // Rack List Messages
    // ─────────────────────────────────────────────────────────
    /// Refetch the rack list
    Refresh,
    NextRack,
    PreviousRack,

    /// A tank was dropped on an empty cell; the rack list level performs
    /// the move
    TankMoveRequested {
        tank_id: TankId,
        from: String,
        to: String,
    },

    /// A background task finished
    TaskFinished {
        generation: u64,
        kind: TaskKind,
        outcome: TaskOutcome,
    },

    /// The session was rejected; stop issuing requests
    AuthenticationFailed,

    // ─────────────────────────────────────────────────────────
    // Grid Messages
    // ─────────────────────────────────────────────────────────
    MoveCursor(Direction),
    /// Open the editor for the cell
    ActivateCell(Position),
    /// Pick up the tank in the cell
    DragStart(Position),
    /// Drop the carried tank on the cell
    Drop(Position),
    CancelDrag,

    // ─────────────────────────────────────────────────────────
    // Tank Editor Messages
    // ─────────────────────────────────────────────────────────
    EditorInput(InputKey),
    SaveTank,
    DeleteTank,
    CloseEditor,

    // ─────────────────────────────────────────────────────────
    // Row Config Messages
    // ─────────────────────────────────────────────────────────
    OpenRowConfig,
    RowConfigInput(InputKey),
    SaveRowConfig,
    CloseRowConfig,

    // ─────────────────────────────────────────────────────────
    // Confirm Dialog Messages
    // ─────────────────────────────────────────────────────────
    ConfirmDelete { generation: u64, tank_id: TankId },
    ConfirmSelectNext,
    ConfirmSelectPrevious,
    ConfirmActivate,
    CancelConfirm,
}
