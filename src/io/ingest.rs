//! CSV ingest and cleaning.
//!
//! This module is responsible for turning a sales CSV of unknown encoding into
//! a typed `SalesTable` that is safe to aggregate.
//!
//! Design goals:
//! - **Strict schema** for the five required columns (clear errors)
//! - **Row-level validation** (drop bad rows, but record what happened)
//! - **Deterministic behavior** (input order is preserved)
//! - **Separation of concerns**: no aggregation or rendering here

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use tracing::{debug, info, warn};

use crate::domain::{ColumnSource, LoadWarning, REQUIRED_COLUMNS, SalesRecord, SalesTable};
use crate::error::AppError;
use crate::io::encoding::{DEFAULT_ENCODINGS, TextEncoding};

/// Load and clean a sales CSV using the default encoding order.
pub fn load_sales_table(path: &Path) -> Result<SalesTable, AppError> {
    load_sales_table_with(path, &DEFAULT_ENCODINGS)
}

/// Load and clean a sales CSV, trying `encodings` in order.
pub fn load_sales_table_with(path: &Path, encodings: &[TextEncoding]) -> Result<SalesTable, AppError> {
    let bytes = fs::read(path)
        .map_err(|e| AppError::input(format!("Failed to open CSV '{}': {e}", path.display())))?;

    let (encoding, text) = decode_csv(&bytes, encodings)?;
    info!(path = %path.display(), %encoding, "decoded input");

    parse_sales_csv(&text, encoding)
}

/// Pick the first encoding that decodes `bytes` into CSV text with a header row.
fn decode_csv(bytes: &[u8], encodings: &[TextEncoding]) -> Result<(TextEncoding, String), AppError> {
    let mut last_error = String::from("no encodings were tried");

    for &encoding in encodings {
        let text = match encoding.decode(bytes) {
            Ok(text) => text,
            Err(e) => {
                debug!(%encoding, error = %e, "decode attempt failed");
                last_error = e;
                continue;
            }
        };

        match read_headers(&text) {
            Ok(_) => return Ok((encoding, text)),
            Err(e) => {
                debug!(%encoding, error = %e, "header parse failed");
                last_error = e;
            }
        }
    }

    Err(AppError::encoding(last_error))
}

fn csv_reader(text: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .delimiter(b',')
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes())
}

fn read_headers(text: &str) -> Result<Vec<String>, String> {
    let mut reader = csv_reader(text);
    let headers = reader
        .headers()
        .map_err(|e| format!("Failed to read CSV headers: {e}"))?;

    let names: Vec<String> = headers.iter().map(normalize_header_name).collect();
    if names.iter().all(|n| n.is_empty()) {
        return Err("No columns to parse from file".to_string());
    }
    Ok(names)
}

fn normalize_header_name(name: &str) -> String {
    // Excel likes to prefix UTF-8 exports with a BOM, which then sticks to the
    // first header name.
    name.trim().trim_start_matches('\u{feff}').to_string()
}

/// Parse already-decoded CSV text into a cleaned table.
pub(crate) fn parse_sales_csv(text: &str, encoding: TextEncoding) -> Result<SalesTable, AppError> {
    let headers = read_headers(text).map_err(AppError::encoding)?;
    let columns = resolve_columns(&headers)?;

    let mut reader = csv_reader(text);
    let mut records = Vec::new();
    let mut warnings = Vec::new();
    let mut rows_read = 0usize;

    for (idx, result) in reader.records().enumerate() {
        rows_read += 1;
        // Fallback when the reader has no position: header is line 1.
        let fallback_line = idx as u64 + 2;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(fallback_line);
                warn!(line, error = %e, "skipping malformed line");
                warnings.push(LoadWarning {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or(fallback_line);

        if record.len() > headers.len() {
            let message = format!("Expected {} fields, saw {}", headers.len(), record.len());
            warn!(line, "skipping malformed line: {message}");
            warnings.push(LoadWarning { line, message });
            continue;
        }

        match parse_record(&record, &headers, &columns) {
            Ok(r) => records.push(r),
            Err(message) => {
                debug!(line, "dropping row: {message}");
                warnings.push(LoadWarning { line, message });
            }
        }
    }

    let dropped = rows_read - records.len();
    if dropped > 0 {
        warn!(dropped, rows_read, "rows skipped during cleaning");
    }

    if records.is_empty() {
        return Err(AppError::empty_dataset());
    }

    info!(rows_read, rows_kept = records.len(), "loaded sales table");

    Ok(SalesTable {
        headers,
        columns,
        records,
        encoding: encoding.label(),
        rows_read,
        warnings,
    })
}

/// Map every header to its value source, failing on missing required columns.
fn resolve_columns(headers: &[String]) -> Result<Vec<ColumnSource>, AppError> {
    let mut header_map: HashMap<&str, usize> = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        header_map.entry(name.as_str()).or_insert(idx);
    }

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|name| !header_map.contains_key(*name))
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(AppError::missing_columns(missing));
    }

    let required_source = |idx: usize| -> Option<ColumnSource> {
        let source = match headers[idx].as_str() {
            "Date" => ColumnSource::Date,
            "Category" => ColumnSource::Category,
            "Product" => ColumnSource::Product,
            "Sales" => ColumnSource::Sales,
            "Quantity" => ColumnSource::Quantity,
            _ => return None,
        };
        // Only the first occurrence of a duplicated name is the typed column.
        (header_map.get(headers[idx].as_str()) == Some(&idx)).then_some(source)
    };

    let mut extra = 0usize;
    let columns = (0..headers.len())
        .map(|idx| {
            required_source(idx).unwrap_or_else(|| {
                extra += 1;
                ColumnSource::Extra(extra - 1)
            })
        })
        .collect();

    Ok(columns)
}

fn parse_record(
    record: &StringRecord,
    headers: &[String],
    columns: &[ColumnSource],
) -> Result<SalesRecord, String> {
    let mut date = None;
    let mut category = None;
    let mut product = None;
    let mut sales = None;
    let mut quantity = None;
    let mut extras = Vec::new();

    for (idx, source) in columns.iter().enumerate() {
        let name = &headers[idx];
        let value = record
            .get(idx)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| format!("Missing value for `{name}`"))?;

        match source {
            ColumnSource::Date => date = Some(parse_date(value)?),
            ColumnSource::Category => category = Some(value.to_string()),
            ColumnSource::Product => product = Some(value.to_string()),
            ColumnSource::Sales => sales = Some(parse_sales(value)?),
            ColumnSource::Quantity => quantity = Some(parse_quantity(value)?),
            ColumnSource::Extra(_) => extras.push(value.to_string()),
        }
    }

    // `resolve_columns` guarantees every required source is present once.
    match (date, category, product, sales, quantity) {
        (Some(date), Some(category), Some(product), Some(sales), Some(quantity)) => Ok(SalesRecord {
            date,
            category,
            product,
            sales,
            quantity,
            extras,
        }),
        _ => Err("Row is missing a required column".to_string()),
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    // ISO dates are the norm, but exports from point-of-sale tools also use
    // US-style or dotted dates, sometimes with a time component.
    const DATE_FMTS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y", "%d.%m.%Y"];
    const DATETIME_FMTS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

    for fmt in DATE_FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d);
        }
    }
    for fmt in DATETIME_FMTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }
    Err(format!("Invalid date '{s}'"))
}

fn parse_sales(s: &str) -> Result<f64, String> {
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(format!("Invalid Sales value '{s}'")),
    }
}

fn parse_quantity(s: &str) -> Result<i64, String> {
    if let Ok(v) = s.parse::<i64>() {
        return Ok(v);
    }
    // "3.0" is a whole number written by a tool that only knows floats.
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 => Ok(v as i64),
        _ => Err(format!("Invalid Quantity value '{s}'")),
    }
}
