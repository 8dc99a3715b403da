//! fishrack-tui - Terminal UI for fishrack
//!
//! This crate provides the ratatui-based terminal interface: it renders the
//! [`fishrack_app::AppState`] of the rack grid and feeds terminal key events
//! back into the TEA loop.

pub mod event;
pub mod layout;
pub mod render;
pub mod runner;
pub mod theme;
pub mod widgets;

#[cfg(test)]
pub mod test_utils;

pub use runner::run;
