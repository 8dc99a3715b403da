//! Application state (Model in TEA pattern)

use fishrack_core::{OccupancyGrid, Position, Rack, RackId, TankId, TankSize};

use crate::config::Settings;
use crate::confirm_dialog::{AutoApprove, ConfirmDialogState, ConfirmationGate, ModalGate};
use crate::row_config::RowConfigEditor;
use crate::tank_editor::TankEditor;

/// Application lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

/// Interaction phase of a rack view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    Idle,
    /// Tank editor open, no request in flight
    Editing,
    /// A request for this view is in flight
    Saving,
}

/// A tank picked up for a move or swap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragState {
    pub tank_id: TankId,
    pub source: Position,
    pub size: TankSize,
}

/// Interaction state for the rack on screen
#[derive(Debug, Clone)]
pub struct RackView {
    pub rack_id: RackId,
    /// Distinguishes this view from earlier ones so late completions can be
    /// recognized
    pub generation: u64,
    pub cursor: Position,
    pub editor: Option<TankEditor>,
    pub row_config: Option<RowConfigEditor>,
    pub drag: Option<DragState>,
    /// A request for this view is in flight
    pub loading: bool,
    /// Most recent failure; cleared on the next success
    pub error: Option<String>,
}

impl RackView {
    pub fn new(rack_id: RackId, generation: u64) -> Self {
        Self {
            rack_id,
            generation,
            cursor: Position::default(),
            editor: None,
            row_config: None,
            drag: None,
            loading: false,
            error: None,
        }
    }

    pub fn phase(&self) -> ViewPhase {
        if self.loading {
            ViewPhase::Saving
        } else if self.editor.is_some() {
            ViewPhase::Editing
        } else {
            ViewPhase::Idle
        }
    }

    pub fn is_saving(&self) -> bool {
        self.phase() == ViewPhase::Saving
    }
}

/// Complete application state
#[derive(Debug)]
pub struct AppState {
    pub phase: AppPhase,
    pub settings: Settings,
    pub racks: Vec<Rack>,
    pub view: Option<RackView>,
    /// Rack list fetch in flight
    pub loading: bool,
    /// Rack list level failure
    pub error: Option<String>,
    /// The session was rejected; no further requests are issued
    pub auth_failed: bool,
    pub confirm_dialog: Option<ConfirmDialogState>,
    pub gate: Box<dyn ConfirmationGate>,
    /// Rack to open once the list arrives
    pub preferred_rack: Option<RackId>,
    next_generation: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let gate: Box<dyn ConfirmationGate> = if settings.behavior.confirm_delete {
            Box::new(ModalGate)
        } else {
            Box::new(AutoApprove)
        };
        Self {
            phase: AppPhase::Running,
            settings,
            racks: Vec::new(),
            view: None,
            loading: false,
            error: None,
            auth_failed: false,
            confirm_dialog: None,
            gate,
            preferred_rack: None,
            next_generation: 1,
        }
    }

    /// State with racks already loaded and the first (or preferred) rack open
    pub fn with_racks(settings: Settings, racks: Vec<Rack>) -> Self {
        let mut state = Self::new(settings);
        state.set_racks(racks);
        state
    }

    pub fn with_gate(mut self, gate: Box<dyn ConfirmationGate>) -> Self {
        self.gate = gate;
        self
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    /// Generation of the current view, 0 when none is open
    pub fn current_generation(&self) -> u64 {
        self.view.as_ref().map_or(0, |v| v.generation)
    }

    pub fn current_rack(&self) -> Option<&Rack> {
        let view = self.view.as_ref()?;
        self.racks.iter().find(|r| r.id == view.rack_id)
    }

    fn current_index(&self) -> Option<usize> {
        let view = self.view.as_ref()?;
        self.racks.iter().position(|r| r.id == view.rack_id)
    }

    /// Occupancy grid of the current rack, rebuilt from the rack data
    pub fn grid(&self) -> Option<OccupancyGrid<'_>> {
        self.current_rack().map(OccupancyGrid::build)
    }

    /// Open a fresh view on `rack_id`
    pub fn open_rack(&mut self, rack_id: RackId) {
        let generation = self.next_generation;
        self.next_generation += 1;
        self.view = Some(RackView::new(rack_id, generation));
        self.confirm_dialog = None;
    }

    /// Replace the rack list, keeping the current view when its rack still
    /// exists
    pub fn set_racks(&mut self, racks: Vec<Rack>) {
        self.racks = racks;

        let keep = self
            .view
            .as_ref()
            .is_some_and(|v| self.racks.iter().any(|r| r.id == v.rack_id));
        if keep {
            self.clamp_cursor();
            return;
        }

        let target = self
            .preferred_rack
            .filter(|id| self.racks.iter().any(|r| r.id == *id))
            .or_else(|| self.racks.first().map(|r| r.id));
        match target {
            Some(id) => self.open_rack(id),
            None => self.view = None,
        }
    }

    /// Switch to the next or previous rack, wrapping around
    pub fn cycle_rack(&mut self, forward: bool) {
        if self.racks.is_empty() {
            return;
        }
        let len = self.racks.len();
        let next = match self.current_index() {
            Some(idx) if forward => (idx + 1) % len,
            Some(idx) => (idx + len - 1) % len,
            None => 0,
        };
        let id = self.racks[next].id;
        self.open_rack(id);
    }

    /// Keep the cursor inside the current grid
    pub fn clamp_cursor(&mut self) {
        let Some(rack) = self.current_rack() else {
            return;
        };
        let rows = rack.row_count;
        let cursor = self.view.as_ref().map(|v| v.cursor).unwrap_or_default();
        let row = cursor.row.min(rows.saturating_sub(1));
        let cols = fishrack_core::effective_column_count(rack, row);
        let col = cursor.col.min(cols.saturating_sub(1));
        if let Some(view) = self.view.as_mut() {
            view.cursor = Position::new(row, col);
        }
    }

    /// Whether a request may be issued for the current view
    pub fn can_issue_requests(&self) -> bool {
        !self.auth_failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn racks() -> Vec<Rack> {
        vec![
            Rack::new(RackId(10), "Rack A", 2, 3),
            Rack::new(RackId(20), "Rack B", 4, 2),
        ]
    }

    #[test]
    fn test_with_racks_opens_first() {
        let state = AppState::with_racks(Settings::default(), racks());
        assert_eq!(state.current_rack().unwrap().id, RackId(10));
        assert_eq!(state.view.as_ref().unwrap().phase(), ViewPhase::Idle);
    }

    #[test]
    fn test_preferred_rack() {
        let mut state = AppState::new(Settings::default());
        state.preferred_rack = Some(RackId(20));
        state.set_racks(racks());
        assert_eq!(state.current_rack().unwrap().name, "Rack B");
    }

    #[test]
    fn test_cycle_rack_bumps_generation() {
        let mut state = AppState::with_racks(Settings::default(), racks());
        let first = state.current_generation();
        state.cycle_rack(true);
        assert_eq!(state.current_rack().unwrap().id, RackId(20));
        assert!(state.current_generation() > first);
        state.cycle_rack(true);
        assert_eq!(state.current_rack().unwrap().id, RackId(10));
        state.cycle_rack(false);
        assert_eq!(state.current_rack().unwrap().id, RackId(20));
    }

    #[test]
    fn test_set_racks_keeps_view() {
        let mut state = AppState::with_racks(Settings::default(), racks());
        let generation = state.current_generation();
        state.set_racks(racks());
        assert_eq!(state.current_generation(), generation);
    }

    #[test]
    fn test_set_racks_replaces_missing_view() {
        let mut state = AppState::with_racks(Settings::default(), racks());
        state.set_racks(vec![Rack::new(RackId(20), "Rack B", 1, 1)]);
        assert_eq!(state.current_rack().unwrap().id, RackId(20));
        state.set_racks(Vec::new());
        assert!(state.view.is_none());
    }

    #[test]
    fn test_clamp_cursor_after_shrink() {
        let mut state = AppState::with_racks(Settings::default(), racks());
        state.view.as_mut().unwrap().cursor = Position::new(1, 2);
        state.set_racks(vec![Rack::new(RackId(10), "Rack A", 1, 2)]);
        assert_eq!(state.view.unwrap().cursor, Position::new(0, 1));
    }

    #[test]
    fn test_view_phase() {
        let mut view = RackView::new(RackId(1), 1);
        assert_eq!(view.phase(), ViewPhase::Idle);
        view.editor = Some(TankEditor::new(crate::tank_editor::TankDraft::empty("A1")));
        assert_eq!(view.phase(), ViewPhase::Editing);
        view.loading = true;
        assert_eq!(view.phase(), ViewPhase::Saving);
    }
}
