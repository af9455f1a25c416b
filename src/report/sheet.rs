//! Library-independent report model.
//!
//! A `ReportDocument` is a list of sheets built from the table and its
//! aggregates. Nothing here knows about the xlsx writer; `workbook` turns the
//! document into bytes.

use chrono::NaiveDate;

use crate::domain::{CategoryTotals, ColumnSource, DailyCategoryMatrix, SalesTable, SummaryStats};
use crate::plot::ChartArtifact;
use crate::report::format::format_currency;

pub const RAW_DATA_SHEET: &str = "Raw Data";
pub const CATEGORY_SALES_SHEET: &str = "Category Sales";
pub const DAILY_SALES_SHEET: &str = "Daily Sales";
pub const CHARTS_SHEET: &str = "Charts";
pub const SUMMARY_STATS_SHEET: &str = "Summary Stats";

/// One cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Integer(i128),
    Date(NaiveDate),
    /// A monetary amount, shown with a currency number format.
    Currency(f64),
}

impl CellValue {
    /// Type a passed-through text value: numbers become numeric cells.
    pub fn infer(raw: &str) -> Self {
        if let Ok(i) = raw.parse::<i128>() {
            return CellValue::Integer(i);
        }
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() => CellValue::Number(v),
            _ => CellValue::Text(raw.to_string()),
        }
    }

    /// The value as it reads once rendered; used for column sizing.
    pub fn display(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(v) => v.to_string(),
            CellValue::Integer(i) => i.to_string(),
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            CellValue::Currency(v) => format_currency(*v),
        }
    }
}

/// A tabular sheet: one header row, then data rows.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetTable {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl SheetTable {
    /// Number of columns across the header and every row.
    pub fn width(&self) -> usize {
        self.rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(self.headers.len()))
            .max()
            .unwrap_or(0)
    }
}

/// A sheet holding chart images stacked vertically.
#[derive(Debug)]
pub struct ImageSheet {
    pub name: String,
    pub charts: Vec<ChartArtifact>,
}

#[derive(Debug)]
pub enum Sheet {
    Table(SheetTable),
    Images(ImageSheet),
}

impl Sheet {
    pub fn name(&self) -> &str {
        match self {
            Sheet::Table(t) => &t.name,
            Sheet::Images(s) => &s.name,
        }
    }
}

/// Ordered sheets of the output workbook.
#[derive(Debug, Default)]
pub struct ReportDocument {
    pub sheets: Vec<Sheet>,
}

impl ReportDocument {
    pub fn push(&mut self, sheet: Sheet) {
        self.sheets.push(sheet);
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name().to_string()).collect()
    }
}

/// Every cleaned record, columns in input header order.
pub fn raw_data_sheet(table: &SalesTable) -> SheetTable {
    let rows = table
        .records
        .iter()
        .map(|r| {
            table
                .columns
                .iter()
                .map(|source| match source {
                    ColumnSource::Date => CellValue::Date(r.date),
                    ColumnSource::Category => CellValue::Text(r.category.clone()),
                    ColumnSource::Product => CellValue::Text(r.product.clone()),
                    ColumnSource::Sales => CellValue::Number(r.sales),
                    ColumnSource::Quantity => CellValue::Integer(r.quantity.into()),
                    ColumnSource::Extra(i) => r
                        .extras
                        .get(*i)
                        .map(|raw| CellValue::infer(raw))
                        .unwrap_or(CellValue::Empty),
                })
                .collect()
        })
        .collect();

    SheetTable {
        name: RAW_DATA_SHEET.to_string(),
        headers: table.headers.clone(),
        rows,
    }
}

pub fn category_sales_sheet(totals: &CategoryTotals) -> SheetTable {
    SheetTable {
        name: CATEGORY_SALES_SHEET.to_string(),
        headers: vec!["Category".to_string(), "Sales".to_string(), "Quantity".to_string()],
        rows: totals
            .iter()
            .map(|t| {
                vec![
                    CellValue::Text(t.category.clone()),
                    CellValue::Number(t.sales),
                    CellValue::Integer(t.quantity),
                ]
            })
            .collect(),
    }
}

pub fn daily_sales_sheet(matrix: &DailyCategoryMatrix) -> SheetTable {
    let headers = std::iter::once("Date".to_string())
        .chain(matrix.categories.iter().cloned())
        .collect();

    let rows = matrix
        .rows
        .iter()
        .map(|(date, values)| {
            std::iter::once(CellValue::Date(*date))
                .chain(values.iter().map(|v| CellValue::Number(*v)))
                .collect()
        })
        .collect();

    SheetTable {
        name: DAILY_SALES_SHEET.to_string(),
        headers,
        rows,
    }
}

pub fn summary_stats_sheet(stats: &SummaryStats) -> SheetTable {
    let row = |label: &str, value: CellValue| vec![CellValue::Text(label.to_string()), value];

    SheetTable {
        name: SUMMARY_STATS_SHEET.to_string(),
        headers: vec!["Metric".to_string(), "Value".to_string()],
        rows: vec![
            row("Total Sales", CellValue::Currency(stats.total_sales)),
            row("Average Sale", CellValue::Currency(stats.average_sale)),
            row("Total Items Sold", CellValue::Integer(stats.total_quantity)),
            row("Unique Products", CellValue::Integer(stats.unique_products as i128)),
            row("Date Range", CellValue::Text(stats.date_range())),
        ],
    }
}

pub fn charts_sheet(charts: Vec<ChartArtifact>) -> ImageSheet {
    ImageSheet {
        name: CHARTS_SHEET.to_string(),
        charts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::test_support::sample_table;
    use crate::aggregate::{category_totals, daily_category_matrix, summary_stats};

    #[test]
    fn raw_sheet_has_one_row_per_record() {
        let table = sample_table();
        let sheet = raw_data_sheet(&table);
        assert_eq!(sheet.headers, vec!["Date", "Category", "Product", "Sales", "Quantity"]);
        assert_eq!(sheet.rows.len(), table.len());
        assert_eq!(
            sheet.rows[0],
            vec![
                CellValue::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
                CellValue::Text("Electronics".to_string()),
                CellValue::Text("Phone".to_string()),
                CellValue::Number(100.0),
                CellValue::Integer(2),
            ]
        );
    }

    #[test]
    fn daily_sheet_has_a_column_per_category() {
        let sheet = daily_sales_sheet(&daily_category_matrix(&sample_table()));
        assert_eq!(sheet.headers, vec!["Date", "Books", "Electronics"]);
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[1][1], CellValue::Number(0.0));
    }

    #[test]
    fn category_sheet_lists_sales_then_quantity() {
        let sheet = category_sales_sheet(&category_totals(&sample_table()));
        assert_eq!(sheet.rows[1][0], CellValue::Text("Electronics".to_string()));
        assert_eq!(sheet.rows[1][2], CellValue::Integer(5));
    }

    #[test]
    fn stats_sheet_marks_money_as_currency() {
        let stats = summary_stats(&sample_table()).unwrap();
        let sheet = summary_stats_sheet(&stats);
        assert_eq!(sheet.rows.len(), 5);
        assert_eq!(sheet.rows[0][1], CellValue::Currency(135.0));
        assert_eq!(sheet.rows[0][1].display(), "$135.00");
        assert_eq!(sheet.rows[2][1], CellValue::Integer(6));
        assert_eq!(sheet.rows[3][1], CellValue::Integer(3));
        assert_eq!(sheet.rows[4][1].display(), "2024-01-01 to 2024-01-02");
    }

    #[test]
    fn infer_types_passthrough_values() {
        assert_eq!(CellValue::infer("42"), CellValue::Integer(42));
        assert_eq!(CellValue::infer("4.5"), CellValue::Number(4.5));
        assert_eq!(CellValue::infer("North"), CellValue::Text("North".to_string()));
        assert_eq!(CellValue::infer("NaN"), CellValue::Text("NaN".to_string()));
    }
}
