//! print-sheet: grid layout for print sheets
//!
//! Takes a list of source items, each repeated some number of times with a
//! column/row footprint, and works out a grid, a placement for every copy and
//! the pixel rectangle each copy occupies on the page.
//!
//! The pipeline runs strictly forward and holds no state between calls:
//!
//! 1. [`expand_cells`] - one cell per repetition, in item order
//! 2. [`dimension_grid`] - column and row count, with optional overrides
//! 3. [`place_cells`] - row-major placement, degrading spans that don't fit
//! 4. [`CellMetrics`] - slot to pixel rectangle mapping
//!
//! [`compute_layout`] runs all four.
//!
//! ```
//! use print_sheet::{compute_layout, FitMode, GridOverride, ItemSettings, LayoutRequest, SheetGeometry, SheetItem};
//!
//! let items = vec![
//!     SheetItem::new("poster.png", ItemSettings::new(1, 2, 2, FitMode::Cover).unwrap()),
//!     SheetItem::new("badge.png", ItemSettings::new(5, 1, 1, FitMode::Contain).unwrap()),
//! ];
//! let request = LayoutRequest::new(items, GridOverride::default(), SheetGeometry::default());
//! let layout = compute_layout(&request).unwrap();
//!
//! assert_eq!((layout.grid.cols, layout.grid.rows), (3, 3));
//! assert_eq!(layout.placements.len(), 6);
//! assert_eq!(layout.dropped_cells, 0);
//! ```

pub mod cells;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod job;
pub mod layout;
pub mod placer;
pub mod settings;

pub use cells::{expand_cells, iter_cells, total_cells, Cell, CellIter, CellStats};
pub use error::{LayoutError, Result};
pub use geometry::{fit_content, CellMetrics, CellSize, FitBox, PagePreset, Rect, SheetGeometry};
pub use grid::{
    auto_dimensions, auto_dimensions_for, dimension_grid, dimension_grid_for, GridDimensions, GridOverride,
    MAX_GRID_SLOTS,
};
pub use job::SheetJob;
pub use layout::{compute_layout, LayoutRequest, LayoutResult, PlacedCell};
pub use placer::{place_cells, GridPlacement, Placement};
pub use settings::{FitMode, ItemId, ItemSettings, SheetItem};
