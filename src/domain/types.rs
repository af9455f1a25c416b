//! Shared domain types.
//!
//! These types are intentionally kept plain so they can be:
//!
//! - built by the CSV loader
//! - consumed by the aggregation, chart and workbook code
//! - constructed by hand in tests

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;

/// Columns every input file must carry, in schema order.
pub const REQUIRED_COLUMNS: [&str; 5] = ["Date", "Category", "Product", "Sales", "Quantity"];

/// One cleaned input row.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub date: NaiveDate,
    pub category: String,
    pub product: String,
    pub sales: f64,
    pub quantity: i64,
    /// Raw text of the non-required columns, aligned with `SalesTable::extra_columns`.
    pub extras: Vec<String>,
}

/// Where a header column's value comes from on a `SalesRecord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnSource {
    Date,
    Category,
    Product,
    Sales,
    Quantity,
    /// Index into `SalesRecord::extras`.
    Extra(usize),
}

/// A row-level problem encountered while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    /// 1-based line number in the input file (header is line 1).
    pub line: u64,
    pub message: String,
}

/// The cleaned, typed dataset.
#[derive(Debug, Clone)]
pub struct SalesTable {
    /// Header names in input order.
    pub headers: Vec<String>,
    /// For each header, where its value lives on a record.
    pub columns: Vec<ColumnSource>,
    pub records: Vec<SalesRecord>,
    /// Label of the text encoding the file was decoded with.
    pub encoding: &'static str,
    pub rows_read: usize,
    pub warnings: Vec<LoadWarning>,
}

impl SalesTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Summed Sales and Quantity for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub sales: f64,
    pub quantity: i128,
}

/// Per-category totals, ordered by category label.
pub type CategoryTotals = Vec<CategoryTotal>;

/// Summed Sales by Date × Category.
///
/// `categories` is the sorted union of all categories; every row in `rows`
/// has one value per category (0.0 where the combination never occurs).
#[derive(Debug, Clone, PartialEq)]
pub struct DailyCategoryMatrix {
    pub categories: Vec<String>,
    pub rows: BTreeMap<NaiveDate, Vec<f64>>,
}

impl DailyCategoryMatrix {
    pub fn get(&self, date: NaiveDate, category: &str) -> Option<f64> {
        let idx = self.categories.iter().position(|c| c == category)?;
        self.rows.get(&date).map(|values| values[idx])
    }

    /// Sum across all categories for one date.
    pub fn date_total(&self, date: NaiveDate) -> Option<f64> {
        self.rows.get(&date).map(|values| values.iter().sum())
    }
}

/// Headline figures for the "Summary Stats" sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStats {
    pub total_sales: f64,
    pub average_sale: f64,
    pub total_quantity: i128,
    pub unique_products: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
}

impl SummaryStats {
    pub fn date_range(&self) -> String {
        format!(
            "{} to {}",
            self.first_date.format("%Y-%m-%d"),
            self.last_date.format("%Y-%m-%d")
        )
    }
}

/// Which optional sheets to include.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ReportOptions {
    pub include_pivot: bool,
    pub include_charts: bool,
    pub include_stats: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            include_pivot: true,
            include_charts: true,
            include_stats: true,
        }
    }
}
