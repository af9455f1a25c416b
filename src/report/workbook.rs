//! XLSX serialization of a `ReportDocument`.
//!
//! The workbook is assembled and serialized fully in memory, then written to
//! a temporary file beside the destination and renamed into place. A failed
//! run never leaves a partial workbook at the output path.

use std::io::Write;
use std::path::Path;

use rust_xlsxwriter::{Format, FormatAlign, Image, Workbook, Worksheet, XlsxError};
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::plot::ChartArtifact;
use crate::report::sheet::{CellValue, ImageSheet, ReportDocument, Sheet, SheetTable};
use crate::report::style::{HeaderStyle, plan_sheet_style};

/// Excel number format for monetary cells.
pub const CURRENCY_FORMAT: &str = "\"$\"#,##0.00";
pub const DATE_FORMAT: &str = "yyyy-mm-dd";

/// Charts are placed every this many rows, starting at B2.
pub const CHART_ROW_STRIDE: u32 = 20;

/// Default row height in pixels; used to fit a chart inside its stride.
const ROW_HEIGHT_PX: f64 = 20.0;

/// Excel rejects longer strings in a single cell.
pub const MAX_CELL_CHARS: usize = 32_767;

/// What the writer had to adjust or leave out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteOutcome {
    pub embedded: Vec<String>,
    pub skipped: Vec<String>,
    /// Text cells cut down to `MAX_CELL_CHARS`.
    pub truncated_cells: usize,
}

struct ReportFormats {
    date: Format,
    currency: Format,
}

impl ReportFormats {
    fn new() -> Self {
        Self {
            date: Format::new().set_num_format(DATE_FORMAT),
            currency: Format::new().set_num_format(CURRENCY_FORMAT),
        }
    }
}

fn header_format(style: &HeaderStyle) -> Format {
    let mut format = Format::new().set_background_color(style.fill);
    if style.bold {
        format = format.set_bold();
    }
    if style.centered {
        format = format.set_align(FormatAlign::Center);
    }
    format
}

/// Serialize `document` and write it atomically to `output`.
pub fn write_report(document: ReportDocument, output: &Path) -> Result<WriteOutcome, AppError> {
    let (buffer, outcome) = render_workbook(document)?;
    save_atomic(&buffer, output)?;
    info!(path = %output.display(), bytes = buffer.len(), "workbook saved");
    Ok(outcome)
}

/// Build the workbook bytes. Chart images are deleted as they are embedded.
pub fn render_workbook(document: ReportDocument) -> Result<(Vec<u8>, WriteOutcome), AppError> {
    let formats = ReportFormats::new();
    let mut workbook = Workbook::new();
    let mut outcome = WriteOutcome::default();

    for sheet in document.sheets {
        match sheet {
            Sheet::Table(table) => write_table_sheet(&mut workbook, &table, &formats, &mut outcome)
                .map_err(|e| AppError::save(format!("sheet '{}': {e}", table.name)))?,
            Sheet::Images(images) => write_image_sheet(&mut workbook, images, &mut outcome)?,
        }
    }

    let buffer = workbook.save_to_buffer().map_err(AppError::save)?;
    Ok((buffer, outcome))
}

fn write_table_sheet(
    workbook: &mut Workbook,
    table: &SheetTable,
    formats: &ReportFormats,
    outcome: &mut WriteOutcome,
) -> Result<(), XlsxError> {
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&table.name)?;

    let style = plan_sheet_style(table);
    let header = header_format(&style.header);

    for (col, name) in table.headers.iter().enumerate().take(style.header_cells) {
        let name = fit_cell_text(name, &table.name, 0, col, outcome);
        worksheet.write_string_with_format(0, col as u16, name, &header)?;
    }

    for (idx, row) in table.rows.iter().enumerate() {
        let row_num = idx as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            if let CellValue::Text(s) = cell {
                let text = fit_cell_text(s, &table.name, row_num, col, outcome);
                worksheet.write_string(row_num, col as u16, text)?;
            } else {
                write_cell(worksheet, row_num, col as u16, cell, formats)?;
            }
        }
    }

    for (col, width) in style.column_widths.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    debug!(sheet = %table.name, rows = table.rows.len(), "sheet written");
    Ok(())
}

/// Cut `text` to `MAX_CELL_CHARS` characters, counting each cut.
fn fit_cell_text<'a>(text: &'a str, sheet: &str, row: u32, col: usize, outcome: &mut WriteOutcome) -> &'a str {
    match text.char_indices().nth(MAX_CELL_CHARS) {
        None => text,
        Some((end, _)) => {
            warn!(sheet, row, col, chars = text.chars().count(), "truncating text cell to {MAX_CELL_CHARS} characters");
            outcome.truncated_cells += 1;
            &text[..end]
        }
    }
}

/// Write a non-text cell with its number format.
fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &CellValue,
    formats: &ReportFormats,
) -> Result<(), XlsxError> {
    match cell {
        // Text goes through `fit_cell_text` in the caller.
        CellValue::Empty | CellValue::Text(_) => {}
        CellValue::Number(v) => {
            worksheet.write_number(row, col, *v)?;
        }
        CellValue::Integer(i) => {
            worksheet.write_number(row, col, *i as f64)?;
        }
        CellValue::Date(d) => {
            worksheet.write_with_format(row, col, d, &formats.date)?;
        }
        CellValue::Currency(v) => {
            worksheet.write_number_with_format(row, col, *v, &formats.currency)?;
        }
    }
    Ok(())
}

fn write_image_sheet(
    workbook: &mut Workbook,
    sheet: ImageSheet,
    outcome: &mut WriteOutcome,
) -> Result<(), AppError> {
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(&sheet.name)
        .map_err(|e| AppError::save(format!("sheet '{}': {e}", sheet.name)))?;

    for (idx, chart) in sheet.charts.into_iter().enumerate() {
        let row = idx as u32 * CHART_ROW_STRIDE + 1;
        let title = chart.title().to_string();

        match embed_chart(worksheet, row, &chart) {
            Ok(()) => outcome.embedded.push(title),
            Err(e) => {
                warn!(chart = %title, "Failed to add chart {idx}: {e}");
                outcome.skipped.push(title);
            }
        }

        // The image bytes now live in the workbook; the scratch file can go.
        if let Err(e) = chart.close() {
            warn!(error = %e, "failed to delete temporary chart image");
        }
    }

    Ok(())
}

fn embed_chart(worksheet: &mut Worksheet, row: u32, chart: &ChartArtifact) -> Result<(), XlsxError> {
    let (_, height) = chart.size();
    // Leave one row of space between stacked charts.
    let scale = f64::from(CHART_ROW_STRIDE - 1) * ROW_HEIGHT_PX / f64::from(height.max(1));

    let image = Image::new(chart.path())?
        .set_scale_width(scale)
        .set_scale_height(scale);
    worksheet.insert_image(row, 1, &image)?;
    Ok(())
}

/// Write `buffer` beside `output`, then rename over it.
fn save_atomic(buffer: &[u8], output: &Path) -> Result<(), AppError> {
    let dir = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = tempfile::Builder::new()
        .prefix(".sales-report-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| AppError::save(format!("cannot create a temporary file in '{}': {e}", dir.display())))?;

    tmp.write_all(buffer)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| AppError::save(format!("cannot write '{}': {e}", tmp.path().display())))?;

    tmp.persist(output)
        .map_err(|e| AppError::save(format!("cannot write '{}': {}", output.display(), e.error)))?;
    Ok(())
}
