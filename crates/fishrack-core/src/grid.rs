//! Occupancy grid builder
//!
//! Projects a rack and its tanks onto a jagged 2D grid. The grid is a pure
//! function of its input and is rebuilt whenever the rack data changes; it is
//! never patched in place.
//!
//! Placement rules:
//! - Tanks are placed in list order; a later tank decoding to the same cell
//!   replaces the earlier one (last write wins).
//! - A tank whose label does not decode, or decodes outside the row's
//!   column count, is skipped with a diagnostic.
//! - A `Large` tank also blocks the cell to its right when that cell exists;
//!   otherwise a diagnostic is recorded and the primary placement kept.
//! - Only the tank's `size` decides whether it is large. A dash range stored
//!   in `position` is a display artifact and is never used for placement.

use std::fmt;

use tracing::{debug, warn};

use crate::position::{self, Position};
use crate::shape::effective_column_count;
use crate::types::{Rack, Tank, TankId, TankSize};

/// One cell of the occupancy grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GridCell<'a> {
    Empty,
    Occupied(&'a Tank),
    /// Second half of a large tank
    Blocked { anchor: TankId },
}

impl<'a> GridCell<'a> {
    pub fn is_empty(&self) -> bool {
        matches!(self, GridCell::Empty)
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, GridCell::Blocked { .. })
    }

    pub fn tank(&self) -> Option<&'a Tank> {
        match self {
            GridCell::Occupied(tank) => Some(tank),
            _ => None,
        }
    }
}

/// Why a tank could not be (fully) placed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// The position label did not decode
    InvalidPositionFormat,
    /// The decoded cell is outside the rack
    OutOfBounds { row: u32, col: u32 },
    /// A large tank's second cell would fall outside its row
    SecondaryOutOfBounds { row: u32, col: u32 },
    /// An earlier tank at the same cell was replaced
    Overwritten { previous: TankId },
    /// The stored position is a range but the tank is not large
    RangeWithoutLargeSize { size: TankSize },
}

/// A non-fatal placement problem for one tank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementDiagnostic {
    pub tank_id: TankId,
    pub position: String,
    pub kind: DiagnosticKind,
}

impl fmt::Display for PlacementDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::InvalidPositionFormat => write!(
                f,
                "Tank {} has an invalid position '{}'",
                self.tank_id, self.position
            ),
            DiagnosticKind::OutOfBounds { .. } => write!(
                f,
                "Tank {} at position {} is outside grid boundaries",
                self.tank_id, self.position
            ),
            DiagnosticKind::SecondaryOutOfBounds { .. } => write!(
                f,
                "Large tank {} at position {} would extend beyond grid boundaries",
                self.tank_id, self.position
            ),
            DiagnosticKind::Overwritten { previous } => write!(
                f,
                "Tank {} at position {} replaces tank {}",
                self.tank_id, self.position, previous
            ),
            DiagnosticKind::RangeWithoutLargeSize { size } => write!(
                f,
                "Tank {} stores range '{}' but is {}",
                self.tank_id, self.position, size
            ),
        }
    }
}

/// The rack projected onto a jagged grid of cells
#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyGrid<'a> {
    rows: Vec<Vec<GridCell<'a>>>,
    diagnostics: Vec<PlacementDiagnostic>,
}

impl<'a> OccupancyGrid<'a> {
    /// Build the grid for `rack` from its tank list
    pub fn build(rack: &'a Rack) -> Self {
        let rows = (0..rack.row_count)
            .map(|row| vec![GridCell::Empty; effective_column_count(rack, row) as usize])
            .collect();
        let mut grid = Self {
            rows,
            diagnostics: Vec::new(),
        };

        for tank in &rack.tanks {
            grid.place(tank);
        }

        debug!(
            "Built grid for rack {}: {} rows, {} tanks, {} diagnostics",
            rack.id,
            grid.rows.len(),
            rack.tanks.len(),
            grid.diagnostics.len()
        );
        grid
    }

    fn place(&mut self, tank: &'a Tank) {
        let label = tank.primary_label();

        if position::is_range(&tank.position) && !tank.size.is_large() {
            self.diagnose(tank, DiagnosticKind::RangeWithoutLargeSize { size: tank.size });
        }

        let pos = match Position::decode(label) {
            Ok(pos) => pos,
            Err(_) => {
                self.diagnose(tank, DiagnosticKind::InvalidPositionFormat);
                return;
            }
        };

        if !self.contains(pos) {
            self.diagnose(
                tank,
                DiagnosticKind::OutOfBounds {
                    row: pos.row,
                    col: pos.col,
                },
            );
            return;
        }

        self.set(pos, GridCell::Occupied(tank), tank);

        if tank.size.is_large() {
            let second = pos.right();
            if self.contains(second) {
                self.set(second, GridCell::Blocked { anchor: tank.id }, tank);
            } else {
                self.diagnose(
                    tank,
                    DiagnosticKind::SecondaryOutOfBounds {
                        row: second.row,
                        col: second.col,
                    },
                );
            }
        }
    }

    fn set(&mut self, pos: Position, cell: GridCell<'a>, tank: &Tank) {
        let slot = &mut self.rows[pos.row as usize][pos.col as usize];
        let previous = match *slot {
            GridCell::Occupied(prev) if prev.id != tank.id => Some(prev.id),
            GridCell::Blocked { anchor } if anchor != tank.id => Some(anchor),
            _ => None,
        };
        *slot = cell;
        if let Some(previous) = previous {
            self.diagnose(tank, DiagnosticKind::Overwritten { previous });
        }
    }

    fn diagnose(&mut self, tank: &Tank, kind: DiagnosticKind) {
        let diagnostic = PlacementDiagnostic {
            tank_id: tank.id,
            position: tank.position.clone(),
            kind,
        };
        match diagnostic.kind {
            DiagnosticKind::Overwritten { .. } | DiagnosticKind::RangeWithoutLargeSize { .. } => {
                debug!("{}", diagnostic)
            }
            _ => warn!("{}", diagnostic),
        }
        self.diagnostics.push(diagnostic);
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of cells in `row` (0 for rows outside the grid)
    pub fn column_count(&self, row: u32) -> usize {
        self.rows.get(row as usize).map_or(0, Vec::len)
    }

    pub fn contains(&self, pos: Position) -> bool {
        (pos.col as usize) < self.column_count(pos.row)
    }

    /// Cell at `pos`, or `None` when outside the grid
    pub fn cell(&self, pos: Position) -> Option<GridCell<'a>> {
        self.rows
            .get(pos.row as usize)
            .and_then(|row| row.get(pos.col as usize))
            .copied()
    }

    /// Cell addressed by a label; `None` when the label does not decode or
    /// is out of bounds
    pub fn cell_at_label(&self, label: &str) -> Option<GridCell<'a>> {
        Position::decode(label).ok().and_then(|pos| self.cell(pos))
    }

    pub fn row(&self, row: u32) -> Option<&[GridCell<'a>]> {
        self.rows.get(row as usize).map(Vec::as_slice)
    }

    pub fn rows(&self) -> &[Vec<GridCell<'a>>] {
        &self.rows
    }

    pub fn diagnostics(&self) -> &[PlacementDiagnostic] {
        &self.diagnostics
    }

    /// Where `id` ended up, if it was placed
    pub fn find_tank(&self, id: TankId) -> Option<Position> {
        self.occupied_positions().find(|(_, t)| t.id == id).map(|(pos, _)| pos)
    }

    /// Every placed tank with its anchor cell, in row-major order
    pub fn occupied_positions(&self) -> impl Iterator<Item = (Position, &'a Tank)> + '_ {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter().enumerate().filter_map(move |(c, cell)| {
                cell.tank()
                    .map(|tank| (Position::new(r as u32, c as u32), tank))
            })
        })
    }

    /// Resolve a cell to the anchor cell of the tank covering it.
    ///
    /// Occupied cells resolve to themselves, blocked cells to the cell on
    /// their left, empty cells to `None`.
    pub fn anchor_of(&self, pos: Position) -> Option<(Position, &'a Tank)> {
        match self.cell(pos)? {
            GridCell::Empty => None,
            GridCell::Occupied(tank) => Some((pos, tank)),
            GridCell::Blocked { anchor } => {
                let left = Position::new(pos.row, pos.col.checked_sub(1)?);
                match self.cell(left)? {
                    GridCell::Occupied(tank) if tank.id == anchor => Some((left, tank)),
                    _ => None,
                }
            }
        }
    }
}
