//! Headline statistics for the summary sheet.

use std::collections::HashSet;

use crate::domain::{SalesTable, SummaryStats};

/// Compute totals, mean, distinct products and the date span.
///
/// Returns `None` for an empty table; the loader never produces one.
pub fn summary_stats(table: &SalesTable) -> Option<SummaryStats> {
    let first = table.records.first()?;

    let mut total_sales = 0.0;
    let mut total_quantity = 0i128;
    let mut first_date = first.date;
    let mut last_date = first.date;
    let mut products = HashSet::new();

    for r in &table.records {
        total_sales += r.sales;
        total_quantity += i128::from(r.quantity);
        first_date = first_date.min(r.date);
        last_date = last_date.max(r.date);
        products.insert(r.product.as_str());
    }

    Some(SummaryStats {
        total_sales,
        average_sale: total_sales / table.records.len() as f64,
        total_quantity,
        unique_products: products.len(),
        first_date,
        last_date,
    })
}
