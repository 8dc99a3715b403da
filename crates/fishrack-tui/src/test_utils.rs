//! Test utilities for TUI rendering verification
//!
//! Widgets and full frames are rendered into ratatui's `TestBackend` and
//! checked by searching the resulting buffer text.

use fishrack_app::config::Settings;
use fishrack_app::AppState;
use fishrack_core::{Gender, Rack, RackId, Subdivision, Tank, TankId, TankSize};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use ratatui::Frame;
use ratatui::Terminal;

/// Standard test terminal size (matches common terminal dimensions)
pub const TEST_WIDTH: u16 = 80;
pub const TEST_HEIGHT: u16 = 24;

/// Test utility wrapper around ratatui's TestBackend terminal
pub struct TestTerminal {
    pub terminal: Terminal<TestBackend>,
}

impl TestTerminal {
    /// Create a new test terminal with standard dimensions (80x24)
    pub fn new() -> Self {
        Self::with_size(TEST_WIDTH, TEST_HEIGHT)
    }

    /// Create a new test terminal with custom dimensions
    pub fn with_size(width: u16, height: u16) -> Self {
        let backend = TestBackend::new(width, height);
        let terminal = Terminal::new(backend).expect("Failed to create test terminal");
        Self { terminal }
    }

    /// Get the full terminal area
    pub fn area(&self) -> Rect {
        let size = self.terminal.size().expect("Failed to get terminal size");
        Rect::new(0, 0, size.width, size.height)
    }

    /// Render a widget to the terminal
    pub fn render_widget<W: Widget>(&mut self, widget: W, area: Rect) {
        self.terminal
            .draw(|frame| frame.render_widget(widget, area))
            .expect("Failed to render widget");
    }

    /// Draws a frame using a custom rendering function
    pub fn draw_with<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(f).expect("Failed to draw frame");
    }

    /// Get the underlying buffer for assertions
    pub fn buffer(&self) -> &Buffer {
        self.terminal.backend().buffer()
    }

    /// Check if the buffer contains a string anywhere
    pub fn buffer_contains(&self, text: &str) -> bool {
        buffer_to_string(self.buffer()).contains(text)
    }

    /// Get all content as a string (for debugging)
    pub fn content(&self) -> String {
        buffer_to_string(self.buffer())
    }
}

impl Default for TestTerminal {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert buffer to string representation
fn buffer_to_string(buffer: &Buffer) -> String {
    let mut result = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            result.push_str(buffer[(x, y)].symbol());
        }
        result.push('\n');
    }
    result
}

/// Tank fixture with one subdivision
pub fn test_tank(id: u64, position: &str, size: TankSize) -> Tank {
    Tank {
        id: TankId(id),
        position: position.to_string(),
        size,
        line: Some(format!("line-{}", id)),
        dob: None,
        color: Some("#bbdefb".into()),
        rack_id: Some(RackId(1)),
        subdivisions: vec![Subdivision::new(Gender::Female, 2)],
    }
}

/// State with a 2x3 rack: regular tank at A1, large tank at A2-A3
pub fn create_test_state() -> AppState {
    let rack = Rack::new(RackId(1), "Rack 1", 2, 3)
        .with_tank(test_tank(1, "A1", TankSize::Regular))
        .with_tank(test_tank(2, "A2", TankSize::Large));
    AppState::with_racks(Settings::default(), vec![rack])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_dimensions() {
        let term = TestTerminal::new();
        assert_eq!(term.area(), Rect::new(0, 0, 80, 24));
    }

    #[test]
    fn test_buffer_contains_rendered_text() {
        let mut term = TestTerminal::with_size(20, 1);
        term.render_widget(ratatui::widgets::Paragraph::new("hello fish"), term.area());
        assert!(term.buffer_contains("hello fish"));
        assert!(!term.buffer_contains("goodbye"));
    }
}
