//! Main render/view function (View in TEA pattern)


use fishrack_app::AppState;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use super::{layout, widgets};
use crate::theme::{palette, styles};

/// Render the complete UI (View function in TEA)
///
/// Pure rendering: the state is only read.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    let bg_block = Block::default().style(Style::default().bg(palette::DEEPEST_BG));
    frame.render_widget(bg_block, area);

    let areas = layout::create(area);

    frame.render_widget(widgets::MainHeader::new(state), areas.header);

    // One column of padding around the grid
    let grid_area = Rect::new(
        areas.grid.x + 1,
        areas.grid.y,
        areas.grid.width.saturating_sub(2),
        areas.grid.height,
    );
    match (state.current_rack(), state.view.as_ref()) {
        (Some(rack), Some(view)) => {
            let layout = &state.settings.layout;
            let grid = widgets::RackGrid::new(rack)
                .cursor(view.cursor)
                .drag(view.drag)
                .cell_width(layout.base_cell_width, layout.terminal_cell_width);
            frame.render_widget(grid, grid_area);
        }
        _ => render_empty_state(frame, state, grid_area),
    }

    frame.render_widget(widgets::StatusBar::new(state), areas.status);

    // Modal overlays, innermost last
    if let Some(view) = state.view.as_ref() {
        if let Some(editor) = view.editor.as_ref() {
            let dialog = widgets::TankDialog::new(editor)
                .saving(view.is_saving())
                .error(view.error.as_deref());
            frame.render_widget(dialog, area);
        } else if let Some(row_config) = view.row_config.as_ref() {
            let dialog = widgets::RowConfigDialog::new(row_config).saving(view.is_saving());
            frame.render_widget(dialog, area);
        }
    }
    if let Some(dialog_state) = state.confirm_dialog.as_ref() {
        frame.render_widget(widgets::ConfirmDialog::new(dialog_state), area);
    }
}

/// Message shown in place of the grid when no rack is open
fn render_empty_state(frame: &mut Frame, state: &AppState, area: Rect) {
    let message = if state.loading {
        Span::styled("Loading racks…", styles::status_yellow())
    } else if let Some(error) = state.error.as_deref() {
        Span::styled(error.to_string(), styles::status_red())
    } else {
        Span::styled("No racks available. Press r to refresh.", styles::text_muted())
    };

    let y = area.y + area.height / 2;
    let line_area = Rect::new(area.x, y.min(area.y + area.height.saturating_sub(1)), area.width, 1);
    frame.render_widget(
        Paragraph::new(Line::from(message)).alignment(Alignment::Center),
        line_area,
    );
}
