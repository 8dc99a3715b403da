//! Row shape resolution
//!
//! A rack has a default column count and optional per-row overrides. Rows
//! with fewer columns are drawn with proportionally wider cells so every row
//! spans the same total width.

use crate::types::{Rack, RowOverrides};

/// Reference cell width used when no layout setting overrides it
pub const DEFAULT_BASE_CELL_WIDTH: f64 = 90.0;

/// Column count for `row`: its override when present and positive,
/// otherwise the rack default.
pub fn effective_column_count(rack: &Rack, row: u32) -> u32 {
    match rack.row_overrides.get(row) {
        Some(columns) if columns > 0 => columns,
        _ => rack.default_column_count,
    }
}

/// Widest row of the rack: the default and every override value
pub fn max_column_count(rack: &Rack) -> u32 {
    rack.row_overrides
        .values()
        .fold(rack.default_column_count, u32::max)
}

/// Width of one cell in `row` so that all rows share the same total width.
///
/// `base_width * max_column_count / effective_column_count(row)`; rows with
/// no columns get `base_width`.
pub fn cell_width(rack: &Rack, row: u32, base_width: f64) -> f64 {
    let columns = effective_column_count(rack, row);
    if columns == 0 {
        return base_width;
    }
    base_width * f64::from(max_column_count(rack)) / f64::from(columns)
}

/// Borrowed view over a rack's shape
#[derive(Debug, Clone, Copy)]
pub struct RackShape<'a> {
    rack: &'a Rack,
}

impl<'a> RackShape<'a> {
    pub fn of(rack: &'a Rack) -> Self {
        Self { rack }
    }

    pub fn row_count(&self) -> u32 {
        self.rack.row_count
    }

    pub fn columns(&self, row: u32) -> u32 {
        effective_column_count(self.rack, row)
    }

    pub fn max_columns(&self) -> u32 {
        max_column_count(self.rack)
    }

    pub fn cell_width(&self, row: u32, base_width: f64) -> f64 {
        cell_width(self.rack, row, base_width)
    }

    /// Cell width of every row, in row order
    pub fn row_widths(&self, base_width: f64) -> Vec<f64> {
        (0..self.rack.row_count)
            .map(|row| self.cell_width(row, base_width))
            .collect()
    }

    /// Width of the layout container holding the widest row
    pub fn container_width(&self, base_width: f64) -> f64 {
        f64::from(self.max_columns()) * base_width
    }
}

/// Keep only candidate overrides that are positive integers for rows that
/// exist in the rack. Values are raw user input.
pub fn sanitize_row_overrides<'a, I>(candidate: I, row_count: u32) -> RowOverrides
where
    I: IntoIterator<Item = (u32, &'a str)>,
{
    candidate
        .into_iter()
        .filter(|(row, _)| *row < row_count)
        .filter_map(|(row, raw)| {
            let columns = raw.trim().parse::<u32>().ok().filter(|c| *c > 0);
            if columns.is_none() {
                tracing::debug!("Discarding row override {} => {:?}", row, raw);
            }
            columns.map(|c| (row, c))
        })
        .collect()
}
