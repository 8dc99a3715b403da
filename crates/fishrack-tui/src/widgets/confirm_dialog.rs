//! Confirmation dialog widget

use fishrack_app::confirm_dialog::ConfirmDialogState;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::modal_overlay;
use crate::theme::{palette, styles};

pub struct ConfirmDialog<'a> {
    state: &'a ConfirmDialogState,
}

impl<'a> ConfirmDialog<'a> {
    pub fn new(state: &'a ConfirmDialogState) -> Self {
        Self { state }
    }

    fn buttons(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for (i, (label, _)) in self.state.options.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("   "));
            }
            let style = if i == self.state.selected {
                Style::default()
                    .fg(palette::DEEPEST_BG)
                    .bg(palette::ACCENT)
            } else {
                styles::text_secondary()
            };
            spans.push(Span::styled(format!(" {} ", label), style));
        }
        Line::from(spans)
    }
}

impl Widget for ConfirmDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let modal = modal_overlay::centered_rect(44, 7, area);
        modal_overlay::prepare_modal(buf, area, modal);

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(self.state.message.clone(), styles::text_primary())),
            Line::from(""),
            self.buttons(),
        ];
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(styles::modal_block(&self.state.title))
            .render(modal, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use fishrack_app::Message;

    #[test]
    fn test_renders_title_message_and_options() {
        let state = ConfirmDialogState::new(
            "Delete tank",
            "Delete the tank at B1?",
            vec![("Delete", Message::Quit), ("Cancel", Message::CancelConfirm)],
        );
        let mut term = TestTerminal::new();
        term.render_widget(ConfirmDialog::new(&state), term.area());
        assert!(term.buffer_contains("Delete tank"));
        assert!(term.buffer_contains("Delete the tank at B1?"));
        assert!(term.buffer_contains(" Delete "));
        assert!(term.buffer_contains(" Cancel "));
    }

    #[test]
    fn test_selected_option_highlighted() {
        let mut state = ConfirmDialogState::new(
            "Delete tank",
            "Sure?",
            vec![("Delete", Message::Quit), ("Cancel", Message::CancelConfirm)],
        );
        state.select_next();
        let dialog = ConfirmDialog::new(&state);
        let buttons = dialog.buttons();
        assert_eq!(buttons.spans[2].content, " Cancel ");
        assert_eq!(buttons.spans[2].style.bg, Some(palette::ACCENT));
        assert_eq!(buttons.spans[0].style.bg, None);
    }
}
