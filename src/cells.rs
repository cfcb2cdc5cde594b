// print-sheet: expand item settings into placement requests

use crate::settings::SheetItem;
use serde::Serialize;

/// One placement request: a single repetition of one source item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cell {
    /// Index of the source item in the request
    pub item_index: usize,
    pub span_cols: u32,
    pub span_rows: u32,
}

/// Flatten items into cells, one per repetition.
///
/// All copies of item 0 come before all copies of item 1, and so on. The
/// placer consumes cells in this order, so earlier items get first pick of
/// the grid.
pub fn expand_cells(items: &[SheetItem]) -> Vec<Cell> {
    iter_cells(items).collect()
}

/// Same order as [`expand_cells`], produced on demand so a grid that fills
/// up early never materializes the cells it would drop.
pub fn iter_cells(items: &[SheetItem]) -> CellIter<'_> {
    CellIter {
        items,
        index: 0,
        left_in_item: items.first().map_or(0, |i| i.settings.repeat_count),
        remaining: total_cells(items),
    }
}

/// Sum of repeat counts across all items.
pub fn total_cells(items: &[SheetItem]) -> usize {
    items.iter().map(|i| i.settings.repeat_count as usize).sum()
}

/// Lazy cell sequence over a slice of items.
#[derive(Debug, Clone)]
pub struct CellIter<'a> {
    items: &'a [SheetItem],
    index: usize,
    left_in_item: u32,
    remaining: usize,
}

impl Iterator for CellIter<'_> {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        while self.left_in_item == 0 {
            self.index += 1;
            self.left_in_item = self.items.get(self.index)?.settings.repeat_count;
        }
        let s = &self.items[self.index].settings;
        self.left_in_item -= 1;
        self.remaining -= 1;
        Some(Cell {
            item_index: self.index,
            span_cols: s.span_cols,
            span_rows: s.span_rows,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for CellIter<'_> {}

/// What grid dimensioning needs to know about a cell sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellStats {
    pub count: usize,
    pub max_span_cols: u32,
    pub max_span_rows: u32,
}

impl CellStats {
    pub fn from_cells(cells: &[Cell]) -> Self {
        CellStats {
            count: cells.len(),
            max_span_cols: cells.iter().map(|c| c.span_cols).max().unwrap_or(0),
            max_span_rows: cells.iter().map(|c| c.span_rows).max().unwrap_or(0),
        }
    }

    /// Computed per item, without expanding repetitions.
    pub fn from_items(items: &[SheetItem]) -> Self {
        let repeated = || items.iter().map(|i| &i.settings).filter(|s| s.repeat_count > 0);
        CellStats {
            count: total_cells(items),
            max_span_cols: repeated().map(|s| s.span_cols).max().unwrap_or(0),
            max_span_rows: repeated().map(|s| s.span_rows).max().unwrap_or(0),
        }
    }
}
