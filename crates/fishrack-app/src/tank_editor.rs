//! Tank editor state
//!
//! A [`TankDraft`] is the editable copy of a tank (or of an empty cell). It is
//! validated into request payloads only on save; until then every field is
//! raw user text.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use fishrack_api::TankFields;
use fishrack_core::{Gender, Position, Subdivision, Tank, TankId, TankSize};

use crate::input_key::InputKey;

/// Preset tank colors `(hex, name)`; the first is the default
pub const PRESET_COLORS: [(&str, &str); 6] = [
    ("#bbdefb", "Blue"),
    ("#ffcdd2", "Red"),
    ("#c8e6c9", "Green"),
    ("#fff9c4", "Yellow"),
    ("#e1bee7", "Purple"),
    ("#ffe0b2", "Orange"),
];

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("hex color regex is valid"));

static CELL_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]+[0-9]+$").expect("cell label regex is valid"));

/// Whether `text` is a `#RRGGBB` color
pub fn is_hex_color(text: &str) -> bool {
    HEX_COLOR.is_match(text)
}

/// Editable fields, in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DraftField {
    Line,
    Size,
    Dob,
    Color,
    Subdivisions,
    Replacement,
}

impl DraftField {
    pub const ALL: [DraftField; 6] = [
        DraftField::Line,
        DraftField::Size,
        DraftField::Dob,
        DraftField::Color,
        DraftField::Subdivisions,
        DraftField::Replacement,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DraftField::Line => "Line",
            DraftField::Size => "Size",
            DraftField::Dob => "Date of birth",
            DraftField::Color => "Color",
            DraftField::Subdivisions => "Fish",
            DraftField::Replacement => "Swap with",
        }
    }
}

/// Per-field validation messages
pub type FieldErrors = BTreeMap<DraftField, String>;

/// Editable copy of a tank
#[derive(Debug, Clone, PartialEq)]
pub struct TankDraft {
    /// `None` for a tank that does not exist yet
    pub id: Option<TankId>,
    /// Label of the anchor cell
    pub position: String,
    pub size: TankSize,
    pub line: String,
    pub dob: String,
    pub color: String,
    pub subdivisions: Vec<Subdivision>,
    /// Label of a tank to swap positions with; empty for none
    pub replacement: String,
}

/// A draft that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidDraft {
    pub fields: TankFields,
    pub replacement: Option<Position>,
}

impl TankDraft {
    /// Fresh draft for an empty cell
    pub fn empty(label: impl Into<String>) -> Self {
        Self {
            id: None,
            position: label.into(),
            size: TankSize::Regular,
            line: String::new(),
            dob: String::new(),
            color: PRESET_COLORS[0].0.to_string(),
            subdivisions: vec![Subdivision::default()],
            replacement: String::new(),
        }
    }

    /// Draft initialized from an existing tank
    pub fn from_tank(tank: &Tank) -> Self {
        Self {
            id: Some(tank.id),
            position: tank.primary_label().to_string(),
            size: tank.size,
            line: tank.line.clone().unwrap_or_default(),
            dob: tank
                .dob
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            color: tank.color.clone().unwrap_or_default(),
            subdivisions: tank.subdivisions.clone(),
            replacement: String::new(),
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Check every field and build the request payload.
    ///
    /// Grid-dependent checks on the replacement (bounds, occupancy, size)
    /// are left to the caller.
    pub fn validate(&self) -> Result<ValidDraft, FieldErrors> {
        let mut errors = FieldErrors::new();

        let dob = match self.dob.trim() {
            "" => None,
            text => match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.insert(DraftField::Dob, "Use the format YYYY-MM-DD".to_string());
                    None
                }
            },
        };

        let color = match self.color.trim() {
            "" => None,
            text if is_hex_color(text) => Some(text.to_ascii_lowercase()),
            _ => {
                errors.insert(DraftField::Color, "Use a color like #bbdefb".to_string());
                None
            }
        };

        let replacement = match self.replacement.trim() {
            "" => None,
            text => self.check_replacement(text, &mut errors),
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        let line = self.line.trim();
        Ok(ValidDraft {
            fields: TankFields {
                position: self.position.clone(),
                size: self.size,
                line: (!line.is_empty()).then(|| line.to_string()),
                dob,
                color,
                subdivisions: self.subdivisions.clone(),
            },
            replacement,
        })
    }

    fn check_replacement(&self, text: &str, errors: &mut FieldErrors) -> Option<Position> {
        let decoded = CELL_LABEL
            .is_match(text)
            .then(|| Position::decode(text).ok())
            .flatten();
        let Some(target) = decoded else {
            errors.insert(
                DraftField::Replacement,
                "Invalid position format. Use format like A1, B2, etc.".to_string(),
            );
            return None;
        };
        if self.id.is_none() {
            errors.insert(
                DraftField::Replacement,
                "Save the tank before swapping it".to_string(),
            );
            return None;
        }
        if Position::decode(&self.position).ok() == Some(target) {
            errors.insert(
                DraftField::Replacement,
                "Choose a position other than the tank's own".to_string(),
            );
            return None;
        }
        Some(target)
    }
}

/// Modal editor wrapping a draft
#[derive(Debug, Clone, PartialEq)]
pub struct TankEditor {
    pub draft: TankDraft,
    pub errors: FieldErrors,
    pub focus: DraftField,
    /// Highlighted subdivision when the fish list is focused
    pub selected_subdivision: usize,
}

impl TankEditor {
    pub fn new(draft: TankDraft) -> Self {
        Self {
            draft,
            errors: FieldErrors::new(),
            focus: DraftField::Line,
            selected_subdivision: 0,
        }
    }

    fn focusable(&self) -> Vec<DraftField> {
        DraftField::ALL
            .into_iter()
            .filter(|f| *f != DraftField::Replacement || !self.draft.is_new())
            .collect()
    }

    pub fn focus_next(&mut self) {
        let fields = self.focusable();
        let idx = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(idx + 1) % fields.len()];
    }

    pub fn focus_previous(&mut self) {
        let fields = self.focusable();
        let idx = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(idx + fields.len() - 1) % fields.len()];
    }

    /// Edit the focused field
    pub fn handle_key(&mut self, key: InputKey) {
        match key {
            InputKey::Tab => return self.focus_next(),
            InputKey::BackTab => return self.focus_previous(),
            _ => {}
        }

        let changed = match self.focus {
            DraftField::Line => edit_text(&mut self.draft.line, key),
            DraftField::Dob => edit_text(&mut self.draft.dob, key),
            DraftField::Replacement => edit_text(&mut self.draft.replacement, key),
            DraftField::Color => match key {
                InputKey::Right => {
                    self.cycle_color(1);
                    true
                }
                InputKey::Left => {
                    self.cycle_color(PRESET_COLORS.len() - 1);
                    true
                }
                _ => edit_text(&mut self.draft.color, key),
            },
            DraftField::Size => match key {
                InputKey::Right | InputKey::Char(' ') => {
                    self.draft.size = self.draft.size.next();
                    true
                }
                InputKey::Left => {
                    self.draft.size = self.draft.size.next().next();
                    true
                }
                _ => false,
            },
            DraftField::Subdivisions => self.edit_subdivisions(key),
        };

        if changed {
            self.errors.remove(&self.focus);
        }
    }

    /// Move to another preset color, starting from the first preset when the
    /// current color is custom
    fn cycle_color(&mut self, step: usize) {
        let current = PRESET_COLORS
            .iter()
            .position(|(hex, _)| hex.eq_ignore_ascii_case(self.draft.color.trim()));
        let next = match current {
            Some(idx) => (idx + step) % PRESET_COLORS.len(),
            None => 0,
        };
        self.draft.color = PRESET_COLORS[next].0.to_string();
    }

    /// Name of the current color if it is a preset
    pub fn color_name(&self) -> Option<&'static str> {
        PRESET_COLORS
            .iter()
            .find(|(hex, _)| hex.eq_ignore_ascii_case(self.draft.color.trim()))
            .map(|(_, name)| *name)
    }

    fn edit_subdivisions(&mut self, key: InputKey) -> bool {
        let subs = &mut self.draft.subdivisions;
        match key {
            InputKey::Char('a') => {
                subs.push(Subdivision::default());
                self.selected_subdivision = subs.len() - 1;
            }
            InputKey::Char('x') | InputKey::Delete => {
                if self.selected_subdivision < subs.len() {
                    subs.remove(self.selected_subdivision);
                    self.selected_subdivision = self.selected_subdivision.min(subs.len().saturating_sub(1));
                }
            }
            InputKey::Up => {
                self.selected_subdivision = self.selected_subdivision.saturating_sub(1);
            }
            InputKey::Down => {
                if self.selected_subdivision + 1 < subs.len() {
                    self.selected_subdivision += 1;
                }
            }
            key => {
                let Some(sub) = subs.get_mut(self.selected_subdivision) else {
                    return false;
                };
                match key {
                    InputKey::Char('g') => sub.gender = sub.gender.next(),
                    InputKey::Right | InputKey::Char('+') => {
                        sub.count = sub.count.saturating_add(1)
                    }
                    InputKey::Left | InputKey::Char('-') => {
                        sub.count = sub.count.saturating_sub(1)
                    }
                    InputKey::Char(c) if c.is_ascii_digit() => {
                        let digit = c.to_digit(10).unwrap_or(0);
                        sub.count = sub.count.saturating_mul(10).saturating_add(digit);
                    }
                    InputKey::Backspace => sub.count /= 10,
                    _ => return false,
                }
            }
        }
        true
    }

    /// Short fish summary such as `M: 3, F: 5`
    pub fn subdivision_summary(subdivisions: &[Subdivision]) -> String {
        subdivisions
            .iter()
            .map(|s| format!("{}: {}", s.gender.initial(), s.count))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn edit_text(text: &mut String, key: InputKey) -> bool {
    match key {
        InputKey::Char(c) => {
            text.push(c);
            true
        }
        InputKey::Backspace => text.pop().is_some(),
        _ => false,
    }
}

/// Gender of a subdivision row for display
pub fn gender_label(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "Male",
        Gender::Female => "Female",
        Gender::Larvae => "Larvae",
        Gender::Juvenile => "Juvenile",
    }
}
