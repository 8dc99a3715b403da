//! Rack grid widget
//!
//! Draws the occupancy grid of one rack, one bordered box per cell. Rows with
//! fewer columns get proportionally wider cells so every row spans the width
//! of the widest row. A large tank is drawn as a single box across both of
//! its cells.

use fishrack_app::state::DragState;
use fishrack_app::tank_editor::TankEditor;
use fishrack_core::{
    row_label, GridCell, OccupancyGrid, Position, Rack, RackShape, Tank, DEFAULT_BASE_CELL_WIDTH,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

use super::truncate;
use crate::theme::{palette, styles};

/// Terminal rows per grid row: border, two text lines, border
pub const CELL_HEIGHT: u16 = 4;

/// Width of the row label gutter
const LABEL_WIDTH: u16 = 4;

const MIN_CELL_WIDTH: u16 = 5;

/// Terminal width of a single cell in each row.
///
/// `terminal_cell_width` is the width of a cell in the widest row; other rows
/// scale by the ratio the row shape resolver gives for `base_width`.
pub fn row_cell_widths(rack: &Rack, base_width: f64, terminal_cell_width: u16) -> Vec<u16> {
    let base = if base_width > 0.0 {
        base_width
    } else {
        DEFAULT_BASE_CELL_WIDTH
    };
    RackShape::of(rack)
        .row_widths(base)
        .into_iter()
        .map(|w| (w / base * f64::from(terminal_cell_width)).round() as u16)
        .map(|w| w.max(MIN_CELL_WIDTH))
        .collect()
}

/// First grid row to draw so the cursor row stays visible
fn first_visible_row(cursor_row: u32, visible: u32, total: u32) -> u32 {
    if visible == 0 || total <= visible {
        return 0;
    }
    cursor_row.saturating_sub(visible - 1).min(total - visible)
}

/// Widget rendering a rack's occupancy grid
pub struct RackGrid<'a> {
    grid: OccupancyGrid<'a>,
    rack: &'a Rack,
    cursor: Option<Position>,
    drag: Option<DragState>,
    base_width: f64,
    terminal_cell_width: u16,
}

impl<'a> RackGrid<'a> {
    pub fn new(rack: &'a Rack) -> Self {
        Self {
            grid: OccupancyGrid::build(rack),
            rack,
            cursor: None,
            drag: None,
            base_width: DEFAULT_BASE_CELL_WIDTH,
            terminal_cell_width: 12,
        }
    }

    pub fn cursor(mut self, cursor: Position) -> Self {
        self.cursor = Some(cursor);
        self
    }

    pub fn drag(mut self, drag: Option<DragState>) -> Self {
        self.drag = drag;
        self
    }

    pub fn cell_width(mut self, base_width: f64, terminal_cell_width: u16) -> Self {
        self.base_width = base_width;
        self.terminal_cell_width = terminal_cell_width;
        self
    }

    /// Number of cells a box starting at `col` covers: two for a large tank
    /// whose second cell is still its own
    fn span(cells: &[GridCell<'_>], col: usize) -> usize {
        match (cells.get(col), cells.get(col + 1)) {
            (Some(GridCell::Occupied(tank)), Some(GridCell::Blocked { anchor }))
                if tank.size.is_large() && *anchor == tank.id =>
            {
                2
            }
            _ => 1,
        }
    }

    fn render_row(&self, row: u32, cell_width: u16, area: Rect, buf: &mut Buffer) {
        let label_area = Rect::new(area.x, area.y + 1, LABEL_WIDTH.min(area.width), 1);
        Paragraph::new(row_label(row))
            .style(styles::accent_bold())
            .render(label_area, buf);

        let Some(cells) = self.grid.row(row) else {
            return;
        };
        let x_end = u32::from(area.x) + u32::from(area.width);

        let mut col = 0;
        while col < cells.len() {
            let span = Self::span(cells, col);
            let x = u32::from(area.x) + u32::from(LABEL_WIDTH) + col as u32 * u32::from(cell_width);
            if x >= x_end {
                break;
            }
            let width = (span as u32 * u32::from(cell_width)).min(x_end - x);
            let rect = Rect::new(x as u16, area.y, width as u16, area.height);
            self.render_cell(Position::new(row, col as u32), span as u32, cells[col], rect, buf);
            col += span;
        }
    }

    fn render_cell(&self, pos: Position, span: u32, cell: GridCell<'_>, area: Rect, buf: &mut Buffer) {
        let covers = |p: Position| p.row == pos.row && p.col >= pos.col && p.col < pos.col + span;
        let is_cursor = self.cursor.is_some_and(covers);
        let is_drag_source = self.drag.is_some_and(|d| covers(d.source));

        let (border_type, border_style) = if is_cursor {
            (BorderType::Thick, styles::accent_bold())
        } else if is_drag_source {
            (
                BorderType::Double,
                Style::default()
                    .fg(palette::DRAG_SOURCE)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            (BorderType::Plain, styles::border_inactive())
        };

        let inner_width = area.width.saturating_sub(2) as usize;
        let (title, lines, style) = match cell {
            GridCell::Empty => (
                pos.encode(),
                vec![Line::from(""), Line::from("+")],
                styles::text_muted(),
            ),
            GridCell::Occupied(tank) => (
                tank.display_label(),
                tank_lines(tank, inner_width),
                match tank.color.as_deref().and_then(palette::hex_color) {
                    Some(color) => Style::default().fg(palette::TEXT_ON_TANK).bg(color),
                    None => styles::text_primary(),
                },
            ),
            // Covered by a large tank drawn elsewhere
            GridCell::Blocked { .. } => (
                pos.encode(),
                Vec::new(),
                Style::default().bg(palette::BLOCKED_BG),
            ),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(border_type)
            .border_style(border_style)
            .title(Span::styled(truncate(&title, inner_width), border_style))
            .style(style);

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block)
            .render(area, buf);
    }
}

/// Line name and fish summary of a tank box
fn tank_lines(tank: &Tank, width: usize) -> Vec<Line<'static>> {
    let line = match tank.line.as_deref().map(str::trim) {
        Some(line) if !line.is_empty() => {
            Line::from(Span::styled(truncate(line, width), Style::default().add_modifier(Modifier::BOLD)))
        }
        _ => Line::from("no line"),
    };
    let summary = TankEditor::subdivision_summary(&tank.subdivisions);
    vec![line, Line::from(truncate(&summary, width))]
}

impl Widget for RackGrid<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width <= LABEL_WIDTH || area.height < CELL_HEIGHT {
            return;
        }

        let widths = row_cell_widths(self.rack, self.base_width, self.terminal_cell_width);
        let total = self.grid.row_count() as u32;
        let visible = u32::from(area.height / CELL_HEIGHT);
        let first = first_visible_row(self.cursor.map_or(0, |c| c.row), visible, total);

        for (i, row) in (first..total).take(visible as usize).enumerate() {
            let Some(&cell_width) = widths.get(row as usize) else {
                break;
            };
            let y = area.y + i as u16 * CELL_HEIGHT;
            let row_area = Rect::new(area.x, y, area.width, CELL_HEIGHT);
            self.render_row(row, cell_width, row_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use fishrack_core::{Gender, RackId, Subdivision, TankId, TankSize};

    fn tank(id: u64, position: &str, size: TankSize) -> Tank {
        Tank {
            id: TankId(id),
            position: position.to_string(),
            size,
            line: None,
            dob: None,
            color: None,
            rack_id: Some(RackId(1)),
            subdivisions: Vec::new(),
        }
    }

    fn sample_rack() -> Rack {
        let mut a1 = tank(1, "A1", TankSize::Regular);
        a1.line = Some("casper".into());
        a1.color = Some("#ffcdd2".into());
        a1.subdivisions = vec![Subdivision::new(Gender::Male, 3), Subdivision::new(Gender::Female, 5)];
        Rack::new(RackId(1), "Rack 1", 2, 3)
            .with_tank(a1)
            .with_tank(tank(2, "A2", TankSize::Large))
    }

    #[test]
    fn test_row_cell_widths_scale_narrow_rows() {
        let rack = Rack::new(RackId(1), "R", 3, 4).with_override(1, 2);
        assert_eq!(row_cell_widths(&rack, 90.0, 12), vec![12, 24, 12]);
    }

    #[test]
    fn test_row_cell_widths_with_wider_override() {
        let rack = Rack::new(RackId(1), "R", 2, 3).with_override(0, 6);
        assert_eq!(row_cell_widths(&rack, 90.0, 10), vec![10, 20]);
    }

    #[test]
    fn test_row_cell_widths_minimum_and_bad_base() {
        let rack = Rack::new(RackId(1), "R", 1, 2);
        assert_eq!(row_cell_widths(&rack, 0.0, 1), vec![MIN_CELL_WIDTH]);
    }

    #[test]
    fn test_first_visible_row_follows_cursor() {
        assert_eq!(first_visible_row(0, 3, 10), 0);
        assert_eq!(first_visible_row(2, 3, 10), 0);
        assert_eq!(first_visible_row(5, 3, 10), 3);
        assert_eq!(first_visible_row(9, 3, 10), 7);
        assert_eq!(first_visible_row(9, 20, 10), 0);
    }

    #[test]
    fn test_render_shows_rows_tanks_and_empty_cells() {
        let rack = sample_rack();
        let mut term = TestTerminal::with_size(60, 10);
        term.render_widget(RackGrid::new(&rack).cursor(Position::new(1, 0)), term.area());

        assert!(term.buffer_contains("A"));
        assert!(term.buffer_contains("B"));
        assert!(term.buffer_contains("casper"));
        assert!(term.buffer_contains("M: 3, F: 5"));
        assert!(term.buffer_contains("A2-A3"));
        assert!(term.buffer_contains("+"));
        // The covered cell is drawn as part of the large tank
        assert!(!term.buffer_contains("┌A3"));
    }

    #[test]
    fn test_render_uses_tank_color() {
        let rack = sample_rack();
        let mut term = TestTerminal::with_size(60, 10);
        term.render_widget(RackGrid::new(&rack), term.area());

        // Inside of the A1 box: label gutter (4) + border (1)
        let cell = &term.buffer()[(LABEL_WIDTH + 1, 1)];
        assert_eq!(cell.bg, ratatui::style::Color::Rgb(0xff, 0xcd, 0xd2));
    }

    #[test]
    fn test_render_tiny_area_does_not_panic() {
        let rack = sample_rack();
        let mut term = TestTerminal::with_size(3, 2);
        term.render_widget(RackGrid::new(&rack), term.area());
    }

    #[test]
    fn test_render_scrolls_to_cursor_row() {
        let rack = Rack::new(RackId(1), "R", 30, 2);
        let mut term = TestTerminal::with_size(40, 8);
        term.render_widget(RackGrid::new(&rack).cursor(Position::new(27, 0)), term.area());
        assert!(term.buffer_contains("AB1"));
        assert!(!term.buffer_contains("┌A1"));
    }

    #[test]
    fn test_span_of_large_tank() {
        let rack = sample_rack();
        let grid = OccupancyGrid::build(&rack);
        let row = grid.row(0).unwrap();
        assert_eq!(RackGrid::span(row, 0), 1);
        assert_eq!(RackGrid::span(row, 1), 2);
    }
}
