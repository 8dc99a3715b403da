//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers per UI mode
//! - `grid`: Cursor, cell activation and drag/drop
//! - `tank`: Tank editor save/delete
//! - `row_config`: Row configuration dialog
//! - `tasks`: Background task completions

pub(crate) mod grid;
pub(crate) mod keys;
pub(crate) mod row_config;
pub(crate) mod tank;
pub(crate) mod tasks;
pub(crate) mod update;


use fishrack_api::{MoveRequest, NewTank, RowConfigRequest, SwapRequest, TankFields};
use fishrack_core::{RackId, TankId};

use crate::message::{Message, TaskKind};

pub use update::update;

#[cfg(test)]
pub(crate) use keys::handle_key;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone)]
pub enum UpdateAction {
    /// Spawn a background task
    SpawnTask(Task),
}

/// Background tasks to spawn.
///
/// Every task that changes data refetches the rack list afterwards. Tasks
/// carry the generation of the view that issued them.
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    LoadRacks {
        generation: u64,
    },
    CreateTank {
        generation: u64,
        tank: NewTank,
    },
    UpdateTank {
        generation: u64,
        id: TankId,
        fields: TankFields,
    },
    DeleteTank {
        generation: u64,
        id: TankId,
    },
    SwapTanks {
        generation: u64,
        request: SwapRequest,
    },
    MoveTank {
        generation: u64,
        id: TankId,
        request: MoveRequest,
    },
    UpdateRowConfig {
        generation: u64,
        rack_id: RackId,
        request: RowConfigRequest,
    },
}

impl Task {
    pub fn kind(&self) -> TaskKind {
        match self {
            Task::LoadRacks { .. } => TaskKind::LoadRacks,
            Task::CreateTank { .. } => TaskKind::CreateTank,
            Task::UpdateTank { .. } => TaskKind::UpdateTank,
            Task::DeleteTank { .. } => TaskKind::DeleteTank,
            Task::SwapTanks { .. } => TaskKind::SwapTanks,
            Task::MoveTank { .. } => TaskKind::MoveTank,
            Task::UpdateRowConfig { .. } => TaskKind::UpdateRowConfig,
        }
    }

    pub fn generation(&self) -> u64 {
        match self {
            Task::LoadRacks { generation }
            | Task::CreateTank { generation, .. }
            | Task::UpdateTank { generation, .. }
            | Task::DeleteTank { generation, .. }
            | Task::SwapTanks { generation, .. }
            | Task::MoveTank { generation, .. }
            | Task::UpdateRowConfig { generation, .. } => *generation,
        }
    }
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }

    pub fn task(task: Task) -> Self {
        Self::action(UpdateAction::SpawnTask(task))
    }
}
