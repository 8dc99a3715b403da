//! Screen layout definitions for the TUI

use ratatui::layout::{Constraint, Layout, Rect};

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Title, rack name and key hints
    pub header: Rect,

    /// The rack grid
    pub grid: Rect,

    /// Statistics, progress and errors
    pub status: Rect,
}

/// Split the screen into header, grid and status bar
pub fn create(area: Rect) -> ScreenAreas {
    let chunks = Layout::vertical([
        Constraint::Length(3), // Header (bordered)
        Constraint::Min(3),    // Grid
        Constraint::Length(2), // Status bar (top border + one line)
    ])
    .split(area);

    ScreenAreas {
        header: chunks[0],
        grid: chunks[1],
        status: chunks[2],
    }
}
