// print-sheet: row-major grid placement

use crate::cells::Cell;
use crate::error::Result;
use crate::grid::GridDimensions;
use serde::Serialize;
use tracing::trace;

/// A cell assigned to a grid slot, in slot units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridPlacement {
    pub cell: Cell,
    pub row: u32,
    pub col: u32,
    /// Effective span; 1 when degraded
    pub span_cols: u32,
    pub span_rows: u32,
    /// Full span did not fit at the anchor, placed as 1x1 instead
    pub degraded: bool,
}

impl GridPlacement {
    /// Every (row, col) slot this placement covers.
    pub fn slots(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (self.row..self.row + self.span_rows)
            .flat_map(move |r| (self.col..self.col + self.span_cols).map(move |c| (r, c)))
    }
}

/// Result of one placement pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub placements: Vec<GridPlacement>,
    /// Cells left in the queue when the grid ran out
    pub dropped: usize,
}

/// Occupancy matrix local to one placement pass.
struct Occupancy {
    cols: usize,
    rows: usize,
    slots: Vec<bool>,
}

impl Occupancy {
    fn new(grid: &GridDimensions) -> Self {
        let cols = grid.cols as usize;
        let rows = grid.rows as usize;
        Occupancy {
            cols,
            rows,
            slots: vec![false; cols * rows],
        }
    }

    fn is_taken(&self, row: usize, col: usize) -> bool {
        self.slots[row * self.cols + col]
    }

    fn take(&mut self, row: usize, col: usize) {
        self.slots[row * self.cols + col] = true;
    }

    /// Footprint anchored at (row, col) is in bounds and entirely free.
    fn fits(&self, row: usize, col: usize, span_rows: usize, span_cols: usize) -> bool {
        if row + span_rows > self.rows || col + span_cols > self.cols {
            return false;
        }
        (row..row + span_rows).all(|r| (col..col + span_cols).all(|c| !self.is_taken(r, c)))
    }

    fn take_span(&mut self, row: usize, col: usize, span_rows: usize, span_cols: usize) {
        for r in row..row + span_rows {
            for c in col..col + span_cols {
                self.take(r, c);
            }
        }
    }
}

/// Place cells into the grid in row-major order.
///
/// Each free slot takes the next cell from the queue. If the cell's span does
/// not fit at that slot it is placed there as 1x1 and never retried. Slots
/// already covered by an earlier span are skipped without consuming a cell.
/// Cells still queued when the grid is exhausted are dropped; they are
/// counted, never pulled from the queue.
pub fn place_cells<I>(cells: I, grid: &GridDimensions) -> Result<Placement>
where
    I: IntoIterator<Item = Cell>,
    I::IntoIter: ExactSizeIterator,
{
    grid.validate()?;
    let mut occupancy = Occupancy::new(grid);
    let mut queue = cells.into_iter();
    let mut placements = Vec::with_capacity(queue.len().min(grid.capacity()));
    let mut next = queue.next();

    'scan: for row in 0..occupancy.rows {
        for col in 0..occupancy.cols {
            let Some(cell) = next else {
                break 'scan;
            };
            if occupancy.is_taken(row, col) {
                continue;
            }

            let span_rows = cell.span_rows as usize;
            let span_cols = cell.span_cols as usize;
            let placement = if occupancy.fits(row, col, span_rows, span_cols) {
                occupancy.take_span(row, col, span_rows, span_cols);
                GridPlacement {
                    cell,
                    row: row as u32,
                    col: col as u32,
                    span_cols: cell.span_cols,
                    span_rows: cell.span_rows,
                    degraded: false,
                }
            } else {
                occupancy.take(row, col);
                GridPlacement {
                    cell,
                    row: row as u32,
                    col: col as u32,
                    span_cols: 1,
                    span_rows: 1,
                    degraded: true,
                }
            };
            trace!(
                item = cell.item_index,
                row,
                col,
                span_cols = placement.span_cols,
                span_rows = placement.span_rows,
                degraded = placement.degraded,
                "placed cell"
            );
            placements.push(placement);
            next = queue.next();
        }
    }

    let dropped = next.map_or(0, |_| 1 + queue.len());
    Ok(Placement { placements, dropped })
}
