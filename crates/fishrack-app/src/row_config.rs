//! Row configuration editor
//!
//! One text field per rack row holding that row's column-count override.
//! Blank means "use the rack default". Text is sanitized only on save.

use fishrack_core::{row_label, sanitize_row_overrides, Rack, RowOverrides};

use crate::input_key::InputKey;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowConfigEditor {
    /// Raw override text per row
    pub rows: Vec<String>,
    pub selected: usize,
    pub default_columns: u32,
}

impl RowConfigEditor {
    pub fn new(rack: &Rack) -> Self {
        let rows = (0..rack.row_count)
            .map(|row| {
                rack.row_overrides
                    .get(row)
                    .map(|c| c.to_string())
                    .unwrap_or_default()
            })
            .collect();
        Self {
            rows,
            selected: 0,
            default_columns: rack.default_column_count,
        }
    }

    pub fn handle_key(&mut self, key: InputKey) {
        match key {
            InputKey::Up | InputKey::BackTab => {
                self.selected = self.selected.saturating_sub(1);
            }
            InputKey::Down | InputKey::Tab => {
                if self.selected + 1 < self.rows.len() {
                    self.selected += 1;
                }
            }
            InputKey::Char(c) => {
                if let Some(text) = self.rows.get_mut(self.selected) {
                    text.push(c);
                }
            }
            InputKey::Backspace => {
                if let Some(text) = self.rows.get_mut(self.selected) {
                    text.pop();
                }
            }
            InputKey::Delete => {
                if let Some(text) = self.rows.get_mut(self.selected) {
                    text.clear();
                }
            }
            _ => {}
        }
    }

    /// Non-blank entries as `(row, text)`
    pub fn candidate(&self) -> impl Iterator<Item = (u32, &str)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, text)| !text.trim().is_empty())
            .map(|(row, text)| (row as u32, text.as_str()))
    }

    /// Overrides to send: positive integers for existing rows only
    pub fn sanitized(&self) -> RowOverrides {
        sanitize_row_overrides(self.candidate(), self.rows.len() as u32)
    }

    /// `(row label, text)` for display
    pub fn labeled_rows(&self) -> impl Iterator<Item = (String, &str)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .map(|(row, text)| (row_label(row as u32), text.as_str()))
    }
}
