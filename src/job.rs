// print-sheet: JSON job files
//
// Jobs arrive from the console UI as loosely typed JSON, so numbers are read
// as f64 and checked here before they become engine settings.

use crate::error::{LayoutError, Result};
use crate::geometry::{PagePreset, SheetGeometry};
use crate::grid::GridOverride;
use crate::layout::LayoutRequest;
use crate::settings::{FitMode, ItemId, ItemSettings, SheetItem};
use serde::Deserialize;
use std::collections::HashMap;

/// A print job as read from disk.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetJob {
    pub title: Option<String>,
    pub page: Option<PagePreset>,
    #[serde(default)]
    pub geometry: GeometrySpec,
    pub cols: Option<f64>,
    pub rows: Option<f64>,
    #[serde(default)]
    pub items: Vec<ItemSpec>,
}

/// Geometry fields; each one overrides the page preset's default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometrySpec {
    pub page_width_mm: Option<f32>,
    pub page_height_mm: Option<f32>,
    pub margin_mm: Option<f32>,
    pub gap_mm: Option<f32>,
    pub scale_px_per_mm: Option<f32>,
}

/// One item entry in a job file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSpec {
    pub id: Option<String>,
    pub repeat_count: Option<f64>,
    pub span_cols: Option<f64>,
    pub span_rows: Option<f64>,
    pub fit_mode: Option<FitMode>,
    /// Intrinsic artwork size, any unit; only the aspect ratio matters
    pub content_width: Option<f32>,
    pub content_height: Option<f32>,
}

impl SheetJob {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn geometry(&self) -> SheetGeometry {
        let base = SheetGeometry::for_page(self.page.unwrap_or_default());
        let g = &self.geometry;
        SheetGeometry {
            page_width_mm: g.page_width_mm.unwrap_or(base.page_width_mm),
            page_height_mm: g.page_height_mm.unwrap_or(base.page_height_mm),
            margin_mm: g.margin_mm.unwrap_or(base.margin_mm),
            gap_mm: g.gap_mm.unwrap_or(base.gap_mm),
            scale_px_per_mm: g.scale_px_per_mm.unwrap_or(base.scale_px_per_mm),
        }
    }

    pub fn overrides(&self) -> Result<GridOverride> {
        let cols = self.cols.map(|v| whole_number("cols", v)).transpose()?;
        let rows = self.rows.map(|v| whole_number("rows", v)).transpose()?;
        let overrides = GridOverride::new(cols, rows);
        overrides.validate()?;
        Ok(overrides)
    }

    pub fn items(&self) -> Result<Vec<SheetItem>> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, spec)| spec.to_item(index))
            .collect()
    }

    /// Artwork sizes for items that declare both dimensions, keyed by the
    /// same ids [`SheetJob::items`] assigns.
    pub fn content_sizes(&self) -> HashMap<ItemId, (f32, f32)> {
        self.items
            .iter()
            .enumerate()
            .filter_map(|(index, spec)| {
                let size = (spec.content_width?, spec.content_height?);
                Some((ItemId::new(spec.item_id(index)), size))
            })
            .collect()
    }

    pub fn to_request(&self) -> Result<LayoutRequest> {
        Ok(LayoutRequest::new(self.items()?, self.overrides()?, self.geometry()))
    }
}

impl ItemSpec {
    fn item_id(&self, index: usize) -> String {
        self.id.clone().unwrap_or_else(|| format!("item-{}", index))
    }

    fn to_item(&self, index: usize) -> Result<SheetItem> {
        let id = self.item_id(index);
        let defaults = ItemSettings::default();
        let field = |name: &str, value: Option<f64>, default: u32| -> Result<u32> {
            match value {
                Some(v) => whole_number(name, v).map_err(|e| e.context(format_args!("item '{}'", id))),
                None => Ok(default),
            }
        };

        let repeat_count = field("repeatCount", self.repeat_count, defaults.repeat_count)?;
        let span_cols = field("spanCols", self.span_cols, defaults.span_cols)?;
        let span_rows = field("spanRows", self.span_rows, defaults.span_rows)?;
        let settings = ItemSettings::new(
            repeat_count,
            span_cols,
            span_rows,
            self.fit_mode.unwrap_or(defaults.fit_mode),
        )
        .map_err(|e| e.context(format_args!("item '{}'", id)))?;

        Ok(SheetItem::new(id, settings))
    }
}

/// Accept only finite, non-negative integers that fit in a u32.
fn whole_number(name: &str, value: f64) -> Result<u32> {
    if !value.is_finite() {
        return Err(LayoutError::invalid(format!("{} must be a finite number", name)));
    }
    if value < 0.0 {
        return Err(LayoutError::invalid(format!("{} must not be negative, got {}", name, value)));
    }
    if value.fract() != 0.0 {
        return Err(LayoutError::invalid(format!("{} must be a whole number, got {}", name, value)));
    }
    if value > u32::MAX as f64 {
        return Err(LayoutError::invalid(format!("{} is too large: {}", name, value)));
    }
    Ok(value as u32)
}
