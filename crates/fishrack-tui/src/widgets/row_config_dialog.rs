//! Row configuration dialog
//!
//! One input per rack row for its column-count override. Blank rows use the
//! rack default.

use fishrack_app::row_config::RowConfigEditor;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::modal_overlay;
use crate::theme::styles;

const DIALOG_WIDTH: u16 = 48;
/// Rows listed at once; the list scrolls with the selection
const MAX_VISIBLE_ROWS: usize = 12;

pub struct RowConfigDialog<'a> {
    editor: &'a RowConfigEditor,
    saving: bool,
}

impl<'a> RowConfigDialog<'a> {
    pub fn new(editor: &'a RowConfigEditor) -> Self {
        Self {
            editor,
            saving: false,
        }
    }

    pub fn saving(mut self, saving: bool) -> Self {
        self.saving = saving;
        self
    }

    fn window(&self) -> std::ops::Range<usize> {
        let total = self.editor.rows.len();
        if total <= MAX_VISIBLE_ROWS {
            return 0..total;
        }
        let start = self
            .editor
            .selected
            .saturating_sub(MAX_VISIBLE_ROWS - 1)
            .min(total - MAX_VISIBLE_ROWS);
        start..start + MAX_VISIBLE_ROWS
    }

    fn build_lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from(Span::styled(
            format!(
                " Columns per row (blank = default {})",
                self.editor.default_columns
            ),
            styles::text_secondary(),
        ))];
        lines.push(Line::from(""));

        let window = self.window();
        for (row, (label, text)) in self.editor.labeled_rows().enumerate() {
            if !window.contains(&row) {
                continue;
            }
            let selected = row == self.editor.selected;
            let marker = if selected && !self.saving { "▸" } else { " " };
            let value = if text.is_empty() {
                Span::styled(format!("{:<6}", "-"), styles::text_muted())
            } else {
                Span::styled(format!("{:<6}", text), styles::input_field(selected))
            };
            lines.push(Line::from(vec![
                Span::styled(format!(" {} ", marker), styles::accent()),
                Span::styled(format!("Row {:<4}", label), styles::text_primary()),
                value,
            ]));
        }

        lines.push(Line::from(""));
        if self.saving {
            lines.push(Line::from(Span::styled(" ⟳ Saving…", styles::status_yellow())));
        } else {
            lines.push(Line::from(vec![
                Span::styled(" ↑↓", styles::keybinding()),
                Span::styled(" row  ", styles::text_muted()),
                Span::styled("Enter", styles::keybinding()),
                Span::styled(" save  ", styles::text_muted()),
                Span::styled("Esc", styles::keybinding()),
                Span::styled(" cancel", styles::text_muted()),
            ]));
        }
        lines
    }
}

impl Widget for RowConfigDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = self.build_lines();
        let modal = modal_overlay::centered_rect(DIALOG_WIDTH, lines.len() as u16 + 2, area);
        modal_overlay::prepare_modal(buf, area, modal);

        Paragraph::new(lines)
            .block(styles::modal_block("Row configuration"))
            .render(modal, buf);
    }
}
