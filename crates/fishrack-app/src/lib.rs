//! fishrack-app - Application state and orchestration for fishrack
//!
//! Implements the TEA (The Elm Architecture) pattern: [`AppState`] is the
//! model, [`Message`] the events, [`handler::update`] the pure transition
//! function. Requests run as background tasks (see [`actions`]) and report
//! back through messages.

pub mod actions;
pub mod config;
pub mod confirm_dialog;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod process;
pub mod row_config;
pub mod state;
pub mod tank_editor;

pub use handler::{Task, UpdateAction, UpdateResult};
pub use message::Message;
pub use state::AppState;
