// print-sheet: per-item layout settings

use crate::error::{LayoutError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller-chosen identity of a source item (file name, upload key, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        ItemId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId(s.to_string())
    }
}

/// How the rendering layer fits an item's content into its rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// Preserve aspect ratio inside the rect
    #[default]
    Contain,
    /// Fill the rect, cropping the overflow
    Cover,
    /// Fill the rect, distorting aspect ratio
    Stretch,
}

impl FitMode {
    pub fn label(self) -> &'static str {
        match self {
            FitMode::Contain => "contain",
            FitMode::Cover => "cover",
            FitMode::Stretch => "stretch",
        }
    }
}

/// Repeat count, footprint and fit mode for one source item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSettings {
    pub repeat_count: u32,
    pub span_cols: u32,
    pub span_rows: u32,
    pub fit_mode: FitMode,
}

impl Default for ItemSettings {
    fn default() -> Self {
        ItemSettings {
            repeat_count: 1,
            span_cols: 1,
            span_rows: 1,
            fit_mode: FitMode::Contain,
        }
    }
}

impl ItemSettings {
    /// Build settings, rejecting zero spans.
    pub fn new(repeat_count: u32, span_cols: u32, span_rows: u32, fit_mode: FitMode) -> Result<Self> {
        let settings = ItemSettings {
            repeat_count,
            span_cols,
            span_rows,
            fit_mode,
        };
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.span_cols == 0 {
            return Err(LayoutError::invalid("spanCols must be at least 1"));
        }
        if self.span_rows == 0 {
            return Err(LayoutError::invalid("spanRows must be at least 1"));
        }
        Ok(())
    }
}

/// A source item together with its settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetItem {
    pub id: ItemId,
    pub settings: ItemSettings,
}

impl SheetItem {
    pub fn new(id: impl Into<String>, settings: ItemSettings) -> Self {
        SheetItem {
            id: ItemId::new(id),
            settings,
        }
    }

    /// One copy, 1x1, contain.
    pub fn single(id: impl Into<String>) -> Self {
        SheetItem::new(id, ItemSettings::default())
    }
}
