//! The report pipeline behind the CLI.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! CSV load -> aggregates -> charts -> sheets -> atomic workbook write
//!
//! Front-ends only pick paths and options and present the `ReportSummary`.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{info, info_span};

use crate::aggregate::{category_totals, daily_category_matrix, daily_totals, summary_stats};
use crate::domain::{ReportOptions, SummaryStats};
use crate::error::AppError;
use crate::io::ingest::load_sales_table;
use crate::plot::render_charts;
use crate::report::{
    ReportDocument, Sheet, category_sales_sheet, charts_sheet, daily_sales_sheet, raw_data_sheet,
    summary_stats_sheet, write_report,
};

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct ReportSummary {
    /// Final output path, including the `.xlsx` extension.
    pub output: PathBuf,
    pub sheets: Vec<String>,
    pub encoding: &'static str,
    pub rows_read: usize,
    pub rows_kept: usize,
    /// Lines skipped or rows dropped while loading.
    pub warnings: usize,
    /// Titles of charts that could not be embedded.
    pub skipped_charts: Vec<String>,
    /// Text cells shortened to fit Excel's per-cell limit.
    pub truncated_cells: usize,
    pub stats: Option<SummaryStats>,
}

/// Generate a report, using the system temp dir for chart images.
pub fn generate_report(input: &Path, output: &Path, options: &ReportOptions) -> Result<ReportSummary, AppError> {
    generate_report_in(input, output, options, &std::env::temp_dir())
}

/// Generate a report with chart images written under `scratch_dir`.
///
/// Concurrent calls targeting the same output path are not coordinated.
pub fn generate_report_in(
    input: &Path,
    output: &Path,
    options: &ReportOptions,
    scratch_dir: &Path,
) -> Result<ReportSummary, AppError> {
    let _span = info_span!("generate_report", input = %input.display()).entered();

    ensure_csv_extension(input)?;
    let output = with_xlsx_extension(output);

    let table = load_sales_table(input)?;
    let totals = category_totals(&table);

    let mut document = ReportDocument::default();
    document.push(Sheet::Table(raw_data_sheet(&table)));

    if options.include_pivot {
        document.push(Sheet::Table(category_sales_sheet(&totals)));
        document.push(Sheet::Table(daily_sales_sheet(&daily_category_matrix(&table))));
    }

    if options.include_charts {
        let charts = render_charts(&totals, &daily_totals(&table), scratch_dir)?;
        document.push(Sheet::Images(charts_sheet(charts)));
    }

    let stats = if options.include_stats {
        let stats = summary_stats(&table).ok_or_else(AppError::empty_dataset)?;
        document.push(Sheet::Table(summary_stats_sheet(&stats)));
        Some(stats)
    } else {
        None
    };

    let sheets = document.sheet_names();
    let outcome = write_report(document, &output)?;

    info!(output = %output.display(), sheets = sheets.len(), "report generated");

    Ok(ReportSummary {
        output,
        sheets,
        encoding: table.encoding,
        rows_read: table.rows_read,
        rows_kept: table.len(),
        warnings: table.warnings.len(),
        skipped_charts: outcome.skipped,
        truncated_cells: outcome.truncated_cells,
        stats,
    })
}

fn ensure_csv_extension(input: &Path) -> Result<(), AppError> {
    let is_csv = input
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if is_csv {
        Ok(())
    } else {
        Err(AppError::input(format!(
            "Input file must be a CSV file: '{}'",
            input.display()
        )))
    }
}

/// Append `.xlsx` unless the path already ends with it (any case).
pub fn with_xlsx_extension(output: &Path) -> PathBuf {
    let has_ext = output
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("xlsx"));
    if has_ext {
        return output.to_path_buf();
    }
    let mut name = OsString::from(output.as_os_str());
    name.push(".xlsx");
    PathBuf::from(name)
}
