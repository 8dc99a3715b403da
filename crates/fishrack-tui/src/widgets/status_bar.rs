//! Status bar widget
//!
//! Displays the session banner, request progress, the most recent error,
//! rack statistics and placement diagnostics.

use fishrack_app::AppState;
use fishrack_core::{Gender, OccupancyGrid, RackStats};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::theme::{palette, styles};

/// Status bar widget showing application state
pub struct StatusBar<'a> {
    state: &'a AppState,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn progress(&self) -> Option<Span<'static>> {
        let saving = self.state.view.as_ref().is_some_and(|v| v.is_saving());
        let label = if saving {
            "⟳ Saving…"
        } else if self.state.loading {
            "⟳ Loading racks…"
        } else {
            return None;
        };
        Some(Span::styled(label, styles::status_yellow()))
    }

    fn error(&self) -> Option<Span<'static>> {
        let message = self
            .state
            .view
            .as_ref()
            .and_then(|v| v.error.as_deref())
            .or(self.state.error.as_deref())?;
        Some(Span::styled(
            format!("✗ {}", message),
            styles::status_red().add_modifier(Modifier::BOLD),
        ))
    }

    fn stats(&self) -> Option<Vec<Span<'static>>> {
        let rack = self.state.current_rack()?;
        let stats = RackStats::of(rack);

        let mut spans = vec![
            Span::styled(format!("{} tanks", stats.total_tanks), styles::text_primary()),
            Span::styled(" · ", styles::text_muted()),
            Span::styled(format!("{} fish", stats.total_fish), styles::text_primary()),
        ];
        if stats.total_fish > 0 {
            let by_gender = Gender::ALL
                .iter()
                .map(|g| format!("{} {}", g.initial(), stats.fish(*g)))
                .collect::<Vec<_>>()
                .join(" ");
            spans.push(Span::styled(format!(" ({})", by_gender), styles::text_secondary()));
        }
        Some(spans)
    }

    fn diagnostics(&self) -> Option<Span<'static>> {
        let rack = self.state.current_rack()?;
        let count = OccupancyGrid::build(rack).diagnostics().len();
        match count {
            0 => None,
            1 => Some(Span::styled("⚠ 1 placement issue", styles::status_yellow())),
            n => Some(Span::styled(
                format!("⚠ {} placement issues", n),
                styles::status_yellow(),
            )),
        }
    }

    fn drag(&self) -> Option<Span<'static>> {
        let drag = self.state.view.as_ref()?.drag?;
        Some(Span::styled(
            format!("Moving {}: m to drop, Esc to cancel", drag.source),
            Style::default().fg(palette::DRAG_SOURCE),
        ))
    }

    /// Build all segments with separators
    fn build_segments(&self) -> Vec<Span<'static>> {
        if self.state.auth_failed {
            return vec![
                Span::raw(" "),
                Span::styled(
                    "⚠ Session rejected. Sign in again and restart fishrack.",
                    styles::status_red().add_modifier(Modifier::BOLD),
                ),
            ];
        }

        let separator = Span::styled(" │ ", styles::text_muted());
        let mut groups: Vec<Vec<Span<'static>>> = Vec::new();

        if let Some(progress) = self.progress() {
            groups.push(vec![progress]);
        }
        if let Some(error) = self.error() {
            groups.push(vec![error]);
        }
        if let Some(drag) = self.drag() {
            groups.push(vec![drag]);
        }
        if let Some(stats) = self.stats() {
            groups.push(stats);
        }
        if let Some(diagnostics) = self.diagnostics() {
            groups.push(vec![diagnostics]);
        }
        if groups.is_empty() {
            groups.push(vec![Span::styled("✓ Ready", styles::status_green())]);
        }

        let mut segments = vec![Span::raw(" ")];
        for (i, group) in groups.into_iter().enumerate() {
            if i > 0 {
                segments.push(separator.clone());
            }
            segments.extend(group);
        }
        segments
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Top border doubles as a separator from the grid
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(styles::border_inactive());
        let inner = block.inner(area);
        block.render(area, buf);

        Paragraph::new(Line::from(self.build_segments())).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use fishrack_app::config::Settings;
    use fishrack_core::{Rack, RackId, Subdivision, Tank, TankId, TankSize};

    fn state_with_tank() -> AppState {
        let tank = Tank {
            id: TankId(1),
            position: "A1".into(),
            size: TankSize::Regular,
            line: None,
            dob: None,
            color: None,
            rack_id: Some(RackId(1)),
            subdivisions: vec![
                Subdivision::new(Gender::Male, 4),
                Subdivision::new(Gender::Female, 6),
            ],
        };
        let rack = Rack::new(RackId(1), "R", 2, 2).with_tank(tank);
        AppState::with_racks(Settings::default(), vec![rack])
    }

    fn render(state: &AppState) -> TestTerminal {
        let mut term = TestTerminal::with_size(100, 2);
        term.render_widget(StatusBar::new(state), term.area());
        term
    }

    #[test]
    fn test_shows_stats() {
        let term = render(&state_with_tank());
        assert!(term.buffer_contains("1 tanks"));
        assert!(term.buffer_contains("10 fish"));
        assert!(term.buffer_contains("(M 4 F 6 L 0 J 0)"));
    }

    #[test]
    fn test_shows_view_error() {
        let mut state = state_with_tank();
        state.view.as_mut().unwrap().error = Some("Failed to swap tanks".into());
        let term = render(&state);
        assert!(term.buffer_contains("✗ Failed to swap tanks"));
    }

    #[test]
    fn test_shows_progress_while_saving() {
        let mut state = state_with_tank();
        state.view.as_mut().unwrap().loading = true;
        assert!(render(&state).buffer_contains("Saving"));
    }

    #[test]
    fn test_auth_banner_replaces_everything() {
        let mut state = state_with_tank();
        state.auth_failed = true;
        state.error = Some("boom".into());
        let term = render(&state);
        assert!(term.buffer_contains("Session rejected"));
        assert!(!term.buffer_contains("boom"));
        assert!(!term.buffer_contains("tanks"));
        assert!(!term.buffer_contains(" fish ("));
    }

    #[test]
    fn test_counts_placement_issues() {
        let mut state = state_with_tank();
        state.racks[0].tanks[0].position = "Z9".into();
        assert!(render(&state).buffer_contains("⚠ 1 placement issue"));
    }

    #[test]
    fn test_ready_without_racks() {
        let state = AppState::default();
        assert!(render(&state).buffer_contains("Ready"));
    }
}
