//! Main header widget: app title, current rack and key hints

use fishrack_app::AppState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use crate::theme::{palette, styles};

const KEY_HINTS: [(&str, &str); 6] = [
    ("↵", "edit"),
    ("m", "move"),
    ("c", "rows"),
    ("[ ]", "racks"),
    ("r", "refresh"),
    ("q", "quit"),
];

/// Header showing the open rack and its position in the rack list
pub struct MainHeader<'a> {
    state: &'a AppState,
}

impl<'a> MainHeader<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn rack_spans(&self) -> Vec<Span<'static>> {
        let Some(rack) = self.state.current_rack() else {
            return vec![Span::styled("no rack", styles::text_muted())];
        };
        let index = self
            .state
            .racks
            .iter()
            .position(|r| r.id == rack.id)
            .map_or(0, |i| i + 1);

        let mut spans = vec![Span::styled(rack.name.clone(), styles::text_primary())];
        if let Some(lab) = rack.lab_id.as_deref() {
            spans.push(Span::styled(format!(" · {}", lab), styles::text_secondary()));
        }
        spans.push(Span::styled(
            format!(" ({}/{})", index, self.state.racks.len()),
            styles::text_muted(),
        ));
        spans
    }

    fn hint_spans() -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        for (key, label) in KEY_HINTS {
            spans.push(Span::styled(key, styles::keybinding()));
            spans.push(Span::styled(format!(" {}  ", label), styles::text_muted()));
        }
        spans
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(styles::border_inactive())
            .style(Style::default().bg(palette::DEEPEST_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut left = vec![Span::styled("fishrack ", styles::accent_bold())];
        left.extend(self.rack_spans());
        let left_width = left.iter().map(|s| s.width()).sum::<usize>() as u16;
        Paragraph::new(Line::from(left)).render(inner, buf);

        let hints = Line::from(Self::hint_spans());
        let hints_width = hints.width() as u16;
        // Hints only when they fit beside the rack name
        if inner.width > left_width + hints_width + 2 {
            let x = inner.x + inner.width - hints_width;
            Paragraph::new(hints).render(Rect::new(x, inner.y, hints_width, 1), buf);
        }
    }
}
