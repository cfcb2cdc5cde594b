// print-sheet: grid dimensioning

use crate::cells::{Cell, CellStats};
use crate::error::{LayoutError, Result};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Largest grid the engine will lay out. Far beyond any physical sheet;
/// keeps the occupancy matrix of a bad request from exhausting memory.
pub const MAX_GRID_SLOTS: usize = 1 << 20;

/// Column and row count of a sheet's layout grid. Both are at least 1 and
/// `cols * rows` is at most [`MAX_GRID_SLOTS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDimensions {
    pub cols: u32,
    pub rows: u32,
}

impl GridDimensions {
    pub fn new(cols: u32, rows: u32) -> Result<Self> {
        let dims = GridDimensions { cols, rows };
        dims.validate()?;
        Ok(dims)
    }

    pub fn validate(&self) -> Result<()> {
        if self.cols == 0 || self.rows == 0 {
            return Err(LayoutError::invalid(format!(
                "grid must have at least one column and row, got {}x{}",
                self.cols, self.rows
            )));
        }
        match (self.cols as usize).checked_mul(self.rows as usize) {
            Some(slots) if slots <= MAX_GRID_SLOTS => Ok(()),
            _ => Err(LayoutError::invalid(format!(
                "grid of {}x{} exceeds the {} slot limit",
                self.cols, self.rows, MAX_GRID_SLOTS
            ))),
        }
    }

    /// Number of 1x1 slots in the grid.
    pub fn capacity(&self) -> usize {
        self.cols as usize * self.rows as usize
    }
}

/// Manual per-axis override. An unset axis is computed automatically.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridOverride {
    pub cols: Option<u32>,
    pub rows: Option<u32>,
}

impl GridOverride {
    pub fn new(cols: Option<u32>, rows: Option<u32>) -> Self {
        GridOverride { cols, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.cols.is_none() && self.rows.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if self.cols == Some(0) {
            return Err(LayoutError::invalid("column override must be at least 1"));
        }
        if self.rows == Some(0) {
            return Err(LayoutError::invalid("row override must be at least 1"));
        }
        Ok(())
    }
}

/// Pick the grid size for a list of cells.
///
/// Overrides replace the matching automatic axis unconditionally, even when
/// that leaves fewer slots than cells. The placer then drops the excess.
pub fn dimension_grid(cells: &[Cell], overrides: &GridOverride) -> Result<GridDimensions> {
    dimension_grid_for(&CellStats::from_cells(cells), overrides)
}

/// [`dimension_grid`] from precomputed cell statistics.
pub fn dimension_grid_for(stats: &CellStats, overrides: &GridOverride) -> Result<GridDimensions> {
    overrides.validate()?;
    let auto = auto_dimensions_for(stats);
    let dims = GridDimensions {
        cols: overrides.cols.unwrap_or(auto.cols),
        rows: overrides.rows.unwrap_or(auto.rows),
    };
    trace!(
        auto_cols = auto.cols,
        auto_rows = auto.rows,
        cols = dims.cols,
        rows = dims.rows,
        "dimensioned grid"
    );
    dims.validate()?;
    Ok(dims)
}

/// Automatic dimensions: roughly square, large enough for the widest and
/// tallest span, and with room for every cell.
pub fn auto_dimensions(cells: &[Cell]) -> GridDimensions {
    auto_dimensions_for(&CellStats::from_cells(cells))
}

/// [`auto_dimensions`] from precomputed cell statistics. Not bounded by
/// [`MAX_GRID_SLOTS`]; [`dimension_grid_for`] checks the final grid.
pub fn auto_dimensions_for(stats: &CellStats) -> GridDimensions {
    match stats.count {
        0 => GridDimensions { cols: 1, rows: 1 },
        // With one cell the maxima are that cell's spans
        1 => GridDimensions {
            cols: stats.max_span_cols.max(1),
            rows: stats.max_span_rows.max(1),
        },
        n => {
            let base = ceil_sqrt(n);
            let cols = base.max(stats.max_span_cols);
            let rows = base.max(stats.max_span_rows);
            let (cols, rows) = grow_to_fit(cols, rows, n);
            GridDimensions { cols, rows }
        }
    }
}

/// Grow the smaller axis, columns on ties, until `cols * rows >= n`.
///
/// Starting from a `ceil_sqrt(n)` base this never has to grow; it only
/// matters for callers that start below the base.
fn grow_to_fit(mut cols: u32, mut rows: u32, n: usize) -> (u32, u32) {
    while (cols as usize).saturating_mul(rows as usize) < n {
        if cols <= rows {
            cols = cols.saturating_add(1);
        } else {
            rows = rows.saturating_add(1);
        }
    }
    (cols, rows)
}

/// Smallest `b` with `b * b >= n`, without going through floats.
fn ceil_sqrt(n: usize) -> u32 {
    let mut b = (n as f64).sqrt() as usize;
    while b.saturating_mul(b) < n {
        b += 1;
    }
    while b > 1 && (b - 1) * (b - 1) >= n {
        b -= 1;
    }
    u32::try_from(b.max(1)).unwrap_or(u32::MAX)
}
