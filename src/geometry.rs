// print-sheet: sheet geometry and slot-to-pixel mapping

use crate::error::{LayoutError, Result};
use crate::grid::GridDimensions;
use crate::settings::FitMode;
use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// US Letter dimensions in mm
pub const LETTER_WIDTH_MM: f32 = 215.9;
pub const LETTER_HEIGHT_MM: f32 = 279.4;

/// ISO A4 dimensions in mm
pub const A4_WIDTH_MM: f32 = 210.0;
pub const A4_HEIGHT_MM: f32 = 297.0;

/// US Legal dimensions in mm
pub const LEGAL_WIDTH_MM: f32 = 215.9;
pub const LEGAL_HEIGHT_MM: f32 = 355.6;

pub const DEFAULT_MARGIN_MM: f32 = 5.0;
pub const DEFAULT_GAP_MM: f32 = 2.0;

/// Screen preview scale
pub const DEFAULT_SCALE_PX_PER_MM: f32 = 3.5;

// ============================================================================
// Sheet Geometry
// ============================================================================

/// Standard page sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PagePreset {
    #[default]
    Letter,
    A4,
    Legal,
}

impl PagePreset {
    /// (width, height) in mm, portrait.
    pub fn size_mm(self) -> (f32, f32) {
        match self {
            PagePreset::Letter => (LETTER_WIDTH_MM, LETTER_HEIGHT_MM),
            PagePreset::A4 => (A4_WIDTH_MM, A4_HEIGHT_MM),
            PagePreset::Legal => (LEGAL_WIDTH_MM, LEGAL_HEIGHT_MM),
        }
    }
}

/// Physical sheet parameters used to turn grid slots into rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetGeometry {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_mm: f32,
    pub gap_mm: f32,
    pub scale_px_per_mm: f32,
}

impl Default for SheetGeometry {
    fn default() -> Self {
        SheetGeometry::for_page(PagePreset::Letter)
    }
}

impl SheetGeometry {
    /// Preset page with the default margin, gap and scale.
    pub fn for_page(page: PagePreset) -> Self {
        let (page_width_mm, page_height_mm) = page.size_mm();
        SheetGeometry {
            page_width_mm,
            page_height_mm,
            margin_mm: DEFAULT_MARGIN_MM,
            gap_mm: DEFAULT_GAP_MM,
            scale_px_per_mm: DEFAULT_SCALE_PX_PER_MM,
        }
    }

    /// Reject values no sheet can have. Margins wider than the page are
    /// allowed and simply produce negative cell sizes.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("pageWidthMm", self.page_width_mm),
            ("pageHeightMm", self.page_height_mm),
            ("marginMm", self.margin_mm),
            ("gapMm", self.gap_mm),
            ("scalePxPerMm", self.scale_px_per_mm),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(LayoutError::invalid(format!("{} must be finite", name)));
            }
            if value < 0.0 {
                return Err(LayoutError::invalid(format!("{} must not be negative, got {}", name, value)));
            }
        }
        if self.page_width_mm == 0.0 || self.page_height_mm == 0.0 {
            return Err(LayoutError::invalid("page size must be positive"));
        }
        if self.scale_px_per_mm == 0.0 {
            return Err(LayoutError::invalid("scalePxPerMm must be positive"));
        }
        Ok(())
    }

    pub fn page_width_px(&self) -> f32 {
        self.page_width_mm * self.scale_px_per_mm
    }

    pub fn page_height_px(&self) -> f32 {
        self.page_height_mm * self.scale_px_per_mm
    }
}

// ============================================================================
// Rectangles
// ============================================================================

/// Axis-aligned rectangle, origin at the top-left of the page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Rect { left, top, width, height }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Same rectangle in mm, for a pixel rect at the given scale.
    pub fn to_mm(&self, scale_px_per_mm: f32) -> Rect {
        Rect {
            left: self.left / scale_px_per_mm,
            top: self.top / scale_px_per_mm,
            width: self.width / scale_px_per_mm,
            height: self.height / scale_px_per_mm,
        }
    }

    /// Strict interior overlap; shared edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }

    /// Shared area of two rectangles, `None` when they only touch or miss.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        (right > left && bottom > top).then(|| Rect::new(left, top, right - left, bottom - top))
    }
}

// ============================================================================
// Coordinate Mapping
// ============================================================================

/// Base cell size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellSize {
    pub width: f32,
    pub height: f32,
}

/// Pixel metrics for one grid on one sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub margin_px: f32,
    pub gap_px: f32,
    pub usable_width: f32,
    pub usable_height: f32,
    pub cell: CellSize,
}

impl CellMetrics {
    pub fn new(geometry: &SheetGeometry, grid: &GridDimensions) -> Self {
        let scale = geometry.scale_px_per_mm;
        let margin_px = geometry.margin_mm * scale;
        let gap_px = geometry.gap_mm * scale;
        let usable_width = geometry.page_width_mm * scale - 2.0 * margin_px;
        let usable_height = geometry.page_height_mm * scale - 2.0 * margin_px;

        let cols = grid.cols as f32;
        let rows = grid.rows as f32;
        let cell = CellSize {
            width: (usable_width - gap_px * (cols - 1.0)) / cols,
            height: (usable_height - gap_px * (rows - 1.0)) / rows,
        };

        CellMetrics {
            margin_px,
            gap_px,
            usable_width,
            usable_height,
            cell,
        }
    }

    /// Rectangle for a placement anchored at (row, col).
    pub fn rect(&self, row: u32, col: u32, span_cols: u32, span_rows: u32) -> Rect {
        let CellSize { width: cell_w, height: cell_h } = self.cell;
        let gap = self.gap_px;
        Rect {
            left: self.margin_px + col as f32 * (cell_w + gap),
            top: self.margin_px + row as f32 * (cell_h + gap),
            width: cell_w * span_cols as f32 + gap * (span_cols as f32 - 1.0),
            height: cell_h * span_rows as f32 + gap * (span_rows as f32 - 1.0),
        }
    }
}

// ============================================================================
// Content Fitting
// ============================================================================

/// Where to draw content inside a placement rect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitBox {
    /// Draw area; may extend past `clip` for cover
    pub draw: Rect,
    /// Region the drawing must be clipped to
    pub clip: Rect,
}

/// Fit content of the given intrinsic size into `rect`.
///
/// Content with a zero or non-finite dimension has no aspect ratio, so it
/// fills the rect.
pub fn fit_content(content_width: f32, content_height: f32, rect: Rect, mode: FitMode) -> FitBox {
    let valid = content_width.is_finite()
        && content_height.is_finite()
        && content_width > 0.0
        && content_height > 0.0;
    if !valid || mode == FitMode::Stretch || rect.width <= 0.0 || rect.height <= 0.0 {
        return FitBox { draw: rect, clip: rect };
    }

    let aspect_ratio = content_width / content_height;
    let rect_ratio = rect.width / rect.height;
    let (width, height) = match mode {
        // Height-constrained when the rect is wider than the content
        FitMode::Contain if rect_ratio > aspect_ratio => (rect.height * aspect_ratio, rect.height),
        FitMode::Contain => (rect.width, rect.width / aspect_ratio),
        FitMode::Cover if rect_ratio > aspect_ratio => (rect.width, rect.width / aspect_ratio),
        FitMode::Cover => (rect.height * aspect_ratio, rect.height),
        FitMode::Stretch => (rect.width, rect.height),
    };

    let draw = Rect {
        left: rect.left + (rect.width - width) / 2.0,
        top: rect.top + (rect.height - height) / 2.0,
        width,
        height,
    };
    FitBox { draw, clip: rect }
}
