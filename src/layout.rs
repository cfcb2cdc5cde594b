// print-sheet: layout pipeline

use crate::cells::{iter_cells, Cell, CellStats};
use crate::error::{LayoutError, Result};
use crate::geometry::{CellMetrics, CellSize, Rect, SheetGeometry};
use crate::grid::{dimension_grid_for, GridDimensions, GridOverride};
use crate::placer::place_cells;
use crate::settings::{FitMode, ItemId, SheetItem};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Everything one layout computation needs.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LayoutRequest {
    /// Source items in placement priority order
    pub items: Vec<SheetItem>,
    pub overrides: GridOverride,
    pub geometry: SheetGeometry,
}

impl LayoutRequest {
    pub fn new(items: Vec<SheetItem>, overrides: GridOverride, geometry: SheetGeometry) -> Self {
        LayoutRequest {
            items,
            overrides,
            geometry,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.geometry.validate()?;
        self.overrides.validate()?;

        let mut seen = HashSet::with_capacity(self.items.len());
        for item in &self.items {
            item.settings
                .validate()
                .map_err(|e| e.context(format_args!("item '{}'", item.id)))?;
            if !seen.insert(&item.id) {
                return Err(LayoutError::invalid(format!("duplicate item id '{}'", item.id)));
            }
        }
        Ok(())
    }
}

/// A cell placed on the sheet, with its pixel rectangle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedCell {
    pub item_id: ItemId,
    pub cell: Cell,
    pub row: u32,
    pub col: u32,
    pub span_cols: u32,
    pub span_rows: u32,
    pub degraded: bool,
    pub fit_mode: FitMode,
    pub rect: Rect,
}

/// Output of one layout computation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult {
    pub grid: GridDimensions,
    pub cell_size: CellSize,
    /// One entry per placed cell, in queue order
    pub placements: Vec<PlacedCell>,
    pub total_cells: usize,
    /// Cells that did not fit in the grid
    pub dropped_cells: usize,
}

impl LayoutResult {
    pub fn placed_cells(&self) -> usize {
        self.placements.len()
    }

    pub fn degraded_cells(&self) -> usize {
        self.placements.iter().filter(|p| p.degraded).count()
    }
}

/// Run the full pipeline: expand, dimension, place, map.
///
/// Pure: the same request always yields the same result.
pub fn compute_layout(request: &LayoutRequest) -> Result<LayoutResult> {
    request.validate()?;

    let stats = CellStats::from_items(&request.items);
    let grid = dimension_grid_for(&stats, &request.overrides)?;
    debug!(
        items = request.items.len(),
        cells = stats.count,
        cols = grid.cols,
        rows = grid.rows,
        "computing sheet layout"
    );

    // Cells past the grid's capacity are counted, never built
    let placement = place_cells(iter_cells(&request.items), &grid)?;
    if placement.dropped > 0 {
        warn!(
            dropped = placement.dropped,
            capacity = grid.capacity(),
            cells = stats.count,
            "grid too small, dropping cells"
        );
    }

    let metrics = CellMetrics::new(&request.geometry, &grid);
    let placements = placement
        .placements
        .iter()
        .map(|p| {
            let item = &request.items[p.cell.item_index];
            PlacedCell {
                item_id: item.id.clone(),
                cell: p.cell,
                row: p.row,
                col: p.col,
                span_cols: p.span_cols,
                span_rows: p.span_rows,
                degraded: p.degraded,
                fit_mode: item.settings.fit_mode,
                rect: metrics.rect(p.row, p.col, p.span_cols, p.span_rows),
            }
        })
        .collect();

    Ok(LayoutResult {
        grid,
        cell_size: metrics.cell,
        placements,
        total_cells: stats.count,
        dropped_cells: placement.dropped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ItemSettings;

    #[test]
    fn test_empty_request() {
        let result = compute_layout(&LayoutRequest::default()).unwrap();
        assert_eq!(result.grid, GridDimensions { cols: 1, rows: 1 });
        assert!(result.placements.is_empty());
        assert_eq!(result.total_cells, 0);
    }

    #[test]
    fn test_carries_item_identity_and_fit_mode() {
        let items = vec![
            SheetItem::new("a.png", ItemSettings::new(2, 1, 1, FitMode::Cover).unwrap()),
            SheetItem::single("b.png"),
        ];
        let result = compute_layout(&LayoutRequest::new(items, GridOverride::default(), SheetGeometry::default())).unwrap();
        let ids: Vec<&str> = result.placements.iter().map(|p| p.item_id.as_str()).collect();
        assert_eq!(ids, vec!["a.png", "a.png", "b.png"]);
        assert_eq!(result.placements[0].fit_mode, FitMode::Cover);
        assert_eq!(result.placements[2].fit_mode, FitMode::Contain);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let items = vec![SheetItem::single("x"), SheetItem::single("x")];
        let err = compute_layout(&LayoutRequest::new(items, GridOverride::default(), SheetGeometry::default()))
            .unwrap_err();
        assert!(matches!(err, LayoutError::InvalidInput(ref m) if m.contains("duplicate")));
    }

    #[test]
    fn test_zero_span_in_struct_literal_rejected() {
        let settings = ItemSettings {
            repeat_count: 1,
            span_cols: 0,
            span_rows: 1,
            fit_mode: FitMode::Contain,
        };
        let items = vec![SheetItem::new("bad", settings)];
        let err = compute_layout(&LayoutRequest::new(items, GridOverride::default(), SheetGeometry::default()))
            .unwrap_err();
        assert!(matches!(err, LayoutError::InvalidInput(ref m) if m.contains("item 'bad'")));
    }

    #[test]
    fn test_truncation_is_counted() {
        let items = vec![SheetItem::new("a", ItemSettings::new(6, 1, 1, FitMode::Contain).unwrap())];
        let request = LayoutRequest::new(items, GridOverride::new(Some(2), Some(2)), SheetGeometry::default());
        let result = compute_layout(&request).unwrap();
        assert_eq!(result.placed_cells(), 4);
        assert_eq!(result.dropped_cells, 2);
        assert_eq!(result.total_cells, 6);
    }

    fn request(items: Vec<SheetItem>, overrides: GridOverride) -> LayoutRequest {
        LayoutRequest::new(items, overrides, SheetGeometry::default())
    }

    #[test]
    fn test_huge_override_rejected() {
        let items = vec![SheetItem::single("a")];
        let err = compute_layout(&request(items, GridOverride::new(Some(u32::MAX), Some(u32::MAX))))
            .unwrap_err();
        assert!(matches!(err, LayoutError::InvalidInput(ref m) if m.contains("slot limit")));
    }

    #[test]
    fn test_huge_span_rejected_without_override() {
        let items = vec![SheetItem::new("wide", ItemSettings::new(1, u32::MAX, 1, FitMode::Contain).unwrap())];
        let err = compute_layout(&request(items, GridOverride::default())).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidInput(_)));
    }

    #[test]
    fn test_huge_repeat_count_on_small_grid() {
        let items = vec![SheetItem::new("a", ItemSettings::new(4_000_000_000, 1, 1, FitMode::Contain).unwrap())];
        let result = compute_layout(&request(items, GridOverride::new(Some(2), Some(2)))).unwrap();
        assert_eq!(result.placed_cells(), 4);
        assert_eq!(result.total_cells, 4_000_000_000);
        assert_eq!(result.dropped_cells, 4_000_000_000 - 4);
    }
}
