//! Custom widget components

mod confirm_dialog;
mod header;
pub mod modal_overlay;
mod rack_grid;
mod row_config_dialog;
mod status_bar;
mod tank_dialog;

pub use confirm_dialog::ConfirmDialog;
pub use header::MainHeader;
pub use rack_grid::{row_cell_widths, RackGrid, CELL_HEIGHT};
pub use row_config_dialog::RowConfigDialog;
pub use status_bar::StatusBar;
pub use tank_dialog::TankDialog;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Shorten `text` to at most `width` terminal columns, marking the cut with
/// an ellipsis
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
