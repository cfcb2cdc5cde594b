// print-sheet: proof PDF export
//
// Draws one outlined frame per placement so a sheet can be checked before
// the real artwork is rendered into it. Items with a known artwork size also
// get the visible part of their fitted content outlined inside the frame.

use crate::{AppError, SheetConfig};
use print_sheet::{fit_content, ItemId, LayoutRequest, LayoutResult, PlacedCell, Rect, SheetGeometry};
use printpdf::*;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufWriter;
use tracing::debug;

/// Font sizes in points
const LABEL_FONT_SIZE: f32 = 7.0;
const FOOTER_FONT_SIZE: f32 = 6.0;

/// Frames shorter than this get no label
const MIN_LABEL_HEIGHT_MM: f32 = 6.0;

/// Label inset from the frame's top-left corner
const LABEL_INSET_MM: f32 = 1.5;

/// Drop from the inset line to the first label baseline
const LABEL_ASCENT_MM: f32 = 2.5;

/// Baseline distance between label lines
const LABEL_LINE_HEIGHT_MM: f32 = 3.0;

/// Footer baseline above the page bottom
const FOOTER_Y_MM: f32 = 1.5;

pub fn generate_pdf(
    config: &SheetConfig,
    request: &LayoutRequest,
    layout: &LayoutResult,
    content_sizes: &HashMap<ItemId, (f32, f32)>,
    output_path: &str,
) -> Result<(), AppError> {
    let geometry = &request.geometry;
    let (doc, page1, layer1) = PdfDocument::new(
        config.title.as_str(),
        Mm(geometry.page_width_mm),
        Mm(geometry.page_height_mm),
        "Layer 1",
    );
    let layer = doc.get_page(page1).get_layer(layer1);

    let font_regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AppError::PdfError(e.to_string()))?;

    for placed in &layout.placements {
        if let Some(&(width, height)) = content_sizes.get(&placed.item_id) {
            draw_content_box(&layer, geometry, placed, width, height);
        }
        draw_frame(&layer, geometry, placed);
        if config.labels {
            draw_label(&layer, &font_regular, geometry, placed);
        }
    }
    debug!(frames = layout.placements.len(), "drew placement frames");

    draw_footer(&layer, &font_regular, geometry, config, layout);

    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    doc.save(&mut writer)
        .map_err(|e| AppError::PdfError(e.to_string()))?;

    Ok(())
}

// ============================================================================
// Frames
// ============================================================================

/// Page-space frame in mm: (x, y) is the bottom-left corner, PDF style.
struct Frame {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl Frame {
    fn from_px(geometry: &SheetGeometry, rect: &Rect) -> Self {
        let rect = rect.to_mm(geometry.scale_px_per_mm);
        Frame {
            x: rect.left,
            y: geometry.page_height_mm - rect.bottom(),
            width: rect.width,
            height: rect.height,
        }
    }
}

fn frame_for(geometry: &SheetGeometry, placed: &PlacedCell) -> Frame {
    Frame::from_px(geometry, &placed.rect)
}

fn draw_frame(layer: &PdfLayerReference, geometry: &SheetGeometry, placed: &PlacedCell) {
    let frame = frame_for(geometry, placed);

    // Degraded placements stand out in red
    let line_color = if placed.degraded {
        Color::Rgb(Rgb::new(0.8, 0.1, 0.1, None))
    } else {
        Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
    };
    layer.set_outline_color(line_color);
    layer.set_outline_thickness(0.5);

    draw_rect(layer, frame.x, frame.y, frame.width, frame.height);
}

/// Outline the part of the fitted artwork that survives clipping: letterbox
/// for contain, the full frame for cover and stretch.
fn draw_content_box(
    layer: &PdfLayerReference,
    geometry: &SheetGeometry,
    placed: &PlacedCell,
    content_width: f32,
    content_height: f32,
) {
    let fit = fit_content(content_width, content_height, placed.rect, placed.fit_mode);
    let Some(visible) = fit.draw.intersect(&fit.clip) else {
        return;
    };
    let frame = Frame::from_px(geometry, &visible);

    layer.set_outline_color(Color::Rgb(Rgb::new(0.6, 0.6, 0.6, None)));
    layer.set_outline_thickness(0.3);
    draw_rect(layer, frame.x, frame.y, frame.width, frame.height);
}

fn draw_label(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    geometry: &SheetGeometry,
    placed: &PlacedCell,
) {
    let frame = frame_for(geometry, placed);
    if frame.height < MIN_LABEL_HEIGHT_MM {
        return;
    }

    let text_x = frame.x + LABEL_INSET_MM;
    let text_y = frame.y + frame.height - LABEL_INSET_MM - LABEL_ASCENT_MM;
    layer.use_text(placed.item_id.as_str(), LABEL_FONT_SIZE, Mm(text_x), Mm(text_y), font);

    let mut detail = placed.fit_mode.label().to_string();
    if placed.degraded {
        detail.push_str(&format!(
            " (1x1, wanted {}x{})",
            placed.cell.span_cols, placed.cell.span_rows
        ));
    }
    layer.use_text(&detail, LABEL_FONT_SIZE, Mm(text_x), Mm(text_y - LABEL_LINE_HEIGHT_MM), font);
}

// ============================================================================
// Footer
// ============================================================================

fn draw_footer(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    geometry: &SheetGeometry,
    config: &SheetConfig,
    layout: &LayoutResult,
) {
    let footer = format!(
        "{}  |  {}  |  {} x {} grid  |  ID: {}",
        config.title,
        config.date.format("%Y-%m-%d"),
        layout.grid.cols,
        layout.grid.rows,
        config.sheet_id
    );
    layer.use_text(
        &footer,
        FOOTER_FONT_SIZE,
        Mm(geometry.margin_mm),
        Mm(FOOTER_Y_MM),
        font,
    );
}

// ============================================================================
// Drawing Utilities
// ============================================================================

fn draw_rect(layer: &PdfLayerReference, x: f32, y: f32, width: f32, height: f32) {
    let points = vec![
        (Point::new(Mm(x), Mm(y)), false),
        (Point::new(Mm(x + width), Mm(y)), false),
        (Point::new(Mm(x + width), Mm(y + height)), false),
        (Point::new(Mm(x), Mm(y + height)), false),
    ];
    let line = Line {
        points,
        is_closed: true,
    };
    layer.add_line(line);
}
