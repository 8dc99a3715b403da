//! # fishrack-core - Rack Grid Engine
//!
//! Foundation crate for fishrack. Provides the domain types, the cell label
//! codec, row shape resolution, the occupancy grid builder and rack
//! statistics, plus the shared error type and logging setup.
//!
//! This crate has **zero internal dependencies** and performs no I/O apart
//! from [`logging::init`].
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`Rack`], [`Tank`], [`Subdivision`] - records as served by the REST service
//! - [`TankSize`] - closed size enum; the single place size text is interpreted
//! - [`RowOverrides`] - per-row column counts
//!
//! ### Grid (`position`, `shape`, `grid`)
//! - [`Position`] - `A1`-style label codec
//! - [`RackShape`] - per-row column counts and proportional cell widths
//! - [`OccupancyGrid`] - rack projected onto cells, with placement diagnostics
//!
//! ### Statistics (`stats`)
//! - [`RackStats`] - fish per gender and age distribution
//!
//! ## Prelude
//!
//! ```rust
//! use fishrack_core::prelude::*;
//! ```

pub mod error;
pub mod grid;
pub mod logging;
pub mod position;
pub mod shape;
pub mod stats;
pub mod types;

/// Prelude for common imports used throughout all fishrack crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

pub use error::{Error, Result, ResultExt};
pub use grid::{DiagnosticKind, GridCell, OccupancyGrid, PlacementDiagnostic};
pub use position::{format_range, primary_label, row_label, Position};
pub use shape::{
    cell_width, effective_column_count, max_column_count, sanitize_row_overrides, RackShape,
    DEFAULT_BASE_CELL_WIDTH,
};
pub use stats::{AgeDistribution, RackStats};
pub use types::{Gender, Rack, RackId, RowOverrides, Subdivision, Tank, TankId, TankSize};
