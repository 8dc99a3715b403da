//! Tank editor dialog
//!
//! Modal form over the grid showing the draft of the tank being created or
//! edited, with inline validation errors. While a request is in flight the
//! form is read-only and the key hints are replaced by a progress line.

use fishrack_app::tank_editor::{gender_label, DraftField, TankEditor};
use fishrack_core::format_range;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::modal_overlay;
use crate::theme::{palette, styles};

const DIALOG_WIDTH: u16 = 60;
const LABEL_WIDTH: usize = 15;

/// Tank create/edit modal
pub struct TankDialog<'a> {
    editor: &'a TankEditor,
    saving: bool,
    error: Option<&'a str>,
}

impl<'a> TankDialog<'a> {
    pub fn new(editor: &'a TankEditor) -> Self {
        Self {
            editor,
            saving: false,
            error: None,
        }
    }

    pub fn saving(mut self, saving: bool) -> Self {
        self.saving = saving;
        self
    }

    /// Request-level error shown under the form
    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }

    fn title(&self) -> String {
        let draft = &self.editor.draft;
        let label = format_range(&draft.position, draft.size);
        match draft.id {
            Some(_) => format!("Tank {}", label),
            None => format!("New tank at {}", label),
        }
    }

    fn fields(&self) -> impl Iterator<Item = DraftField> + '_ {
        DraftField::ALL
            .into_iter()
            .filter(|f| *f != DraftField::Replacement || !self.editor.draft.is_new())
    }

    fn field_value(&self, field: DraftField, focused: bool) -> Vec<Span<'static>> {
        let draft = &self.editor.draft;
        let input = styles::input_field(focused && !self.saving);
        let text = |value: &str, placeholder: &str| {
            if value.is_empty() {
                Span::styled(placeholder.to_string(), styles::text_muted())
            } else {
                Span::styled(value.to_string(), input)
            }
        };

        match field {
            DraftField::Line => vec![text(&draft.line, "line name")],
            DraftField::Dob => vec![text(&draft.dob, "YYYY-MM-DD")],
            DraftField::Replacement => vec![text(&draft.replacement, "position, e.g. B4")],
            DraftField::Size => vec![Span::styled(format!("‹ {} ›", draft.size), input)],
            DraftField::Color => {
                let mut spans = Vec::new();
                if let Some(color) = palette::hex_color(&draft.color) {
                    spans.push(Span::styled("  ", Style::default().bg(color)));
                    spans.push(Span::raw(" "));
                }
                spans.push(text(&draft.color, "#RRGGBB"));
                if let Some(name) = self.editor.color_name() {
                    spans.push(Span::styled(format!(" ({})", name), styles::text_secondary()));
                }
                spans
            }
            DraftField::Subdivisions => {
                let summary = TankEditor::subdivision_summary(&draft.subdivisions);
                vec![text(&summary, "none")]
            }
        }
    }

    /// One line per subdivision, shown while the fish list is focused
    fn subdivision_lines(&self) -> Vec<Line<'static>> {
        let indent = " ".repeat(LABEL_WIDTH + 2);
        let mut lines: Vec<Line<'static>> = self
            .editor
            .draft
            .subdivisions
            .iter()
            .enumerate()
            .map(|(i, sub)| {
                let selected = i == self.editor.selected_subdivision;
                let marker = if selected { "▸ " } else { "  " };
                let style = if selected {
                    styles::accent_bold()
                } else {
                    styles::text_secondary()
                };
                Line::from(vec![
                    Span::raw(indent.clone()),
                    Span::styled(
                        format!("{}{:<9}{:>5}", marker, gender_label(sub.gender), sub.count),
                        style,
                    ),
                ])
            })
            .collect();
        lines.push(Line::from(vec![
            Span::raw(indent),
            Span::styled("a add  x remove  g gender  ←/→ count", styles::text_muted()),
        ]));
        lines
    }

    fn build_lines(&self) -> Vec<Line<'static>> {
        let mut lines = vec![Line::from("")];

        for field in self.fields() {
            let focused = field == self.editor.focus;
            let marker = if focused && !self.saving { "▸" } else { " " };
            let label_style = if focused {
                styles::accent_bold()
            } else {
                styles::text_secondary()
            };

            let mut spans = vec![
                Span::styled(format!("{} ", marker), styles::accent()),
                Span::styled(format!("{:<width$}", field.label(), width = LABEL_WIDTH), label_style),
            ];
            spans.extend(self.field_value(field, focused));
            lines.push(Line::from(spans));

            if focused && field == DraftField::Subdivisions && !self.saving {
                lines.extend(self.subdivision_lines());
            }
            if let Some(message) = self.editor.errors.get(&field) {
                lines.push(Line::from(Span::styled(
                    format!("{}✗ {}", " ".repeat(LABEL_WIDTH + 2), message),
                    styles::status_red(),
                )));
            }
        }

        lines.push(Line::from(""));
        if let Some(error) = self.error {
            lines.push(Line::from(Span::styled(
                format!(" ✗ {}", error),
                styles::status_red().add_modifier(Modifier::BOLD),
            )));
        }
        lines.push(self.footer());
        lines
    }

    fn footer(&self) -> Line<'static> {
        if self.saving {
            return Line::from(Span::styled(" ⟳ Saving…", styles::status_yellow()));
        }
        let mut hints = vec![
            ("Tab", "next field"),
            ("Enter", "save"),
        ];
        if !self.editor.draft.is_new() {
            hints.push(("Ctrl+d", "delete"));
        }
        hints.push(("Esc", "close"));

        let mut spans = vec![Span::raw(" ")];
        for (key, label) in hints {
            spans.push(Span::styled(key, styles::keybinding()));
            spans.push(Span::styled(format!(" {}  ", label), styles::text_muted()));
        }
        Line::from(spans)
    }
}

impl Widget for TankDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = self.build_lines();
        let height = lines.len() as u16 + 2;
        let modal = modal_overlay::centered_rect(DIALOG_WIDTH, height, area);
        modal_overlay::prepare_modal(buf, area, modal);

        let title = self.title();
        Paragraph::new(lines)
            .block(styles::modal_block(&title))
            .wrap(Wrap { trim: false })
            .render(modal, buf);
    }
}
