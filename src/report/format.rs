//! Human-readable formatting: currency strings and the run summary.
//!
//! We keep formatting code in one place so the sheet builders and the CLI
//! render money the same way.

use crate::app::pipeline::ReportSummary;

/// `$1,234.56` style display string; negatives read `-$1,234.56`.
pub fn format_currency(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let cents = (value.abs() * 100.0).round();
    let whole = (cents / 100.0).trunc() as u64;
    let frac = (cents % 100.0) as u64;
    format!("{sign}${}.{frac:02}", group_thousands(whole))
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Format the end-of-run summary printed by the CLI.
pub fn format_report_summary(summary: &ReportSummary) -> String {
    let mut out = String::new();

    out.push_str("=== Sales report generated ===\n");
    out.push_str(&format!("Output: {}\n", summary.output.display()));
    out.push_str(&format!("Sheets: {}\n", summary.sheets.join(", ")));
    out.push_str(&format!(
        "Rows: {} kept of {} read ({} encoding)\n",
        summary.rows_kept, summary.rows_read, summary.encoding
    ));
    if summary.warnings > 0 {
        out.push_str(&format!("Skipped lines/rows: {}\n", summary.warnings));
    }
    if !summary.skipped_charts.is_empty() {
        out.push_str(&format!("Charts not embedded: {}\n", summary.skipped_charts.join(", ")));
    }
    if summary.truncated_cells > 0 {
        out.push_str(&format!("Text cells truncated: {}\n", summary.truncated_cells));
    }

    if let Some(stats) = &summary.stats {
        out.push_str("\nSummary:\n");
        out.push_str(&format!("{:<18} {:>16}\n", "Total Sales", format_currency(stats.total_sales)));
        out.push_str(&format!("{:<18} {:>16}\n", "Average Sale", format_currency(stats.average_sale)));
        out.push_str(&format!("{:<18} {:>16}\n", "Total Items Sold", stats.total_quantity));
        out.push_str(&format!("{:<18} {:>16}\n", "Unique Products", stats.unique_products));
        out.push_str(&format!("{:<18} {}\n", "Date Range", stats.date_range()));
    }

    out
}
