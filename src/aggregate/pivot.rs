//! Group-by and cross-tab views over the sales table.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::domain::{CategoryTotal, CategoryTotals, DailyCategoryMatrix, SalesTable};

/// Sum Sales and Quantity per category, ordered by category label.
pub fn category_totals(table: &SalesTable) -> CategoryTotals {
    // Quantities are summed wide: each one may be anywhere in the i64 range.
    let mut groups: BTreeMap<&str, (f64, i128)> = BTreeMap::new();
    for r in &table.records {
        let entry = groups.entry(r.category.as_str()).or_insert((0.0, 0));
        entry.0 += r.sales;
        entry.1 += i128::from(r.quantity);
    }

    groups
        .into_iter()
        .map(|(category, (sales, quantity))| CategoryTotal {
            category: category.to_string(),
            sales,
            quantity,
        })
        .collect()
}

/// Cross-tab of summed Sales by Date × Category, zero-filled.
pub fn daily_category_matrix(table: &SalesTable) -> DailyCategoryMatrix {
    let categories: Vec<String> = table
        .records
        .iter()
        .map(|r| r.category.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect();

    let mut rows: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
    for r in &table.records {
        // `categories` is sorted, so the lookup is a binary search.
        let Ok(col) = categories.binary_search_by(|c| c.as_str().cmp(r.category.as_str())) else {
            continue;
        };
        rows.entry(r.date).or_insert_with(|| vec![0.0; categories.len()])[col] += r.sales;
    }

    DailyCategoryMatrix { categories, rows }
}

/// Summed Sales per date, ascending.
pub fn daily_totals(table: &SalesTable) -> Vec<(NaiveDate, f64)> {
    let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for r in &table.records {
        *totals.entry(r.date).or_insert(0.0) += r.sales;
    }
    totals.into_iter().collect()
}
