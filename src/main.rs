// print-sheet: Lay out repeated images on a print sheet and export a proof PDF

mod pdf;

use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};
use print_sheet::{compute_layout, LayoutError, LayoutRequest, LayoutResult, PagePreset, SheetJob};
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

const DEFAULT_TITLE: &str = "Print Sheet";

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to create PDF: {0}")]
    PdfError(String),
    #[error("Failed to read job file: {0}")]
    JobError(String),
    #[error("Invalid date format: {0}")]
    DateError(String),
    #[error(transparent)]
    LayoutError(#[from] LayoutError),
    #[error("Failed to write layout JSON: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

// ============================================================================
// Data Structures
// ============================================================================

/// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Lay out repeated images on a print sheet")]
struct Args {
    /// Job file (JSON with items, optional geometry and grid overrides)
    #[arg(short, long)]
    job: String,

    /// Force the number of grid columns
    #[arg(long)]
    cols: Option<u32>,

    /// Force the number of grid rows
    #[arg(long)]
    rows: Option<u32>,

    /// Page size preset
    #[arg(short, long, value_enum)]
    page: Option<PageArg>,

    /// Page margin in mm
    #[arg(long)]
    margin: Option<f32>,

    /// Gap between cells in mm
    #[arg(long)]
    gap: Option<f32>,

    /// Pixels per mm for the layout coordinates
    #[arg(long)]
    scale: Option<f32>,

    /// Sheet title (defaults to the job title)
    #[arg(short, long)]
    title: Option<String>,

    /// Date (YYYY-MM-DD format, defaults to today)
    #[arg(short, long)]
    date: Option<String>,

    /// Output filename (defaults to sheet-{date}-{title}.pdf)
    #[arg(short, long)]
    output: Option<String>,

    /// Print the computed layout as JSON instead of writing a PDF
    #[arg(long)]
    json: bool,

    /// Draw frames without item labels
    #[arg(long)]
    no_labels: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum PageArg {
    Letter,
    A4,
    Legal,
}

impl From<PageArg> for PagePreset {
    fn from(page: PageArg) -> Self {
        match page {
            PageArg::Letter => PagePreset::Letter,
            PageArg::A4 => PagePreset::A4,
            PageArg::Legal => PagePreset::Legal,
        }
    }
}

/// Proof sheet configuration
pub struct SheetConfig {
    pub title: String,
    pub date: NaiveDate,
    pub sheet_id: String,
    pub labels: bool,
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let args = Args::parse();

    let job = load_job(&args.job)?;
    let request = build_request(&job, &args)?;
    let layout = compute_layout(&request)?;
    info!(
        cols = layout.grid.cols,
        rows = layout.grid.rows,
        placed = layout.placed_cells(),
        dropped = layout.dropped_cells,
        "layout computed"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&layout)?);
        return Ok(());
    }

    let config = SheetConfig {
        title: args
            .title
            .clone()
            .or_else(|| job.title.clone())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        date: parse_date(&args.date)?,
        sheet_id: generate_short_id(),
        labels: !args.no_labels,
    };

    let output_file = args.output.clone().unwrap_or_else(|| {
        format!("sheet-{}-{}.pdf", config.date.format("%Y-%m-%d"), slugify(&config.title))
    });

    pdf::generate_pdf(&config, &request, &layout, &job.content_sizes(), &output_file)?;

    print_summary(&config, &layout, &output_file);
    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

fn load_job(path: &str) -> Result<SheetJob, AppError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| AppError::JobError(format!("{}: {}", path, e)))?;
    let job = SheetJob::from_json(&content)
        .map_err(|e| AppError::JobError(format!("Invalid JSON: {}", e)))?;
    debug!(path, items = job.items.len(), "loaded job");
    Ok(job)
}

/// Job file settings with command-line overrides applied on top.
fn build_request(job: &SheetJob, args: &Args) -> Result<LayoutRequest, AppError> {
    let mut request = job.to_request()?;

    if let Some(page) = args.page {
        let (width, height) = PagePreset::from(page).size_mm();
        request.geometry.page_width_mm = width;
        request.geometry.page_height_mm = height;
    }
    if let Some(margin) = args.margin {
        request.geometry.margin_mm = margin;
    }
    if let Some(gap) = args.gap {
        request.geometry.gap_mm = gap;
    }
    if let Some(scale) = args.scale {
        request.geometry.scale_px_per_mm = scale;
    }
    if args.cols.is_some() {
        request.overrides.cols = args.cols;
    }
    if args.rows.is_some() {
        request.overrides.rows = args.rows;
    }

    Ok(request)
}

fn parse_date(date_str: &Option<String>) -> Result<NaiveDate, AppError> {
    match date_str {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| AppError::DateError(s.clone())),
        None => Ok(Local::now().date_naive()),
    }
}

fn generate_short_id() -> String {
    let uuid = Uuid::new_v4();
    let hex = format!("{:x}", uuid);
    hex[..8].to_uppercase()
}

fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .replace(' ', "-")
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-')
        .collect()
}

fn print_summary(config: &SheetConfig, layout: &LayoutResult, output_file: &str) {
    println!("✓ Generated: {}", output_file);
    println!("  Sheet: {}", config.title);
    println!("  Grid: {} x {}", layout.grid.cols, layout.grid.rows);
    println!(
        "  Placed: {} of {} ({} degraded)",
        layout.placed_cells(),
        layout.total_cells,
        layout.degraded_cells()
    );
    if layout.dropped_cells > 0 {
        println!("  Dropped: {} (grid too small)", layout.dropped_cells);
    }
    println!("  Sheet ID: {}", config.sheet_id);
}
