//! Styling directives for tabular sheets.
//!
//! These are computed from a `SheetTable` alone so the rules can be tested
//! without building a workbook.

use crate::report::sheet::SheetTable;

/// Light blue header fill (RGB).
pub const HEADER_FILL: u32 = 0xCCE5FF;

/// Column widths never exceed this many character units.
pub const MAX_COLUMN_WIDTH: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderStyle {
    pub fill: u32,
    pub bold: bool,
    pub centered: bool,
}

impl Default for HeaderStyle {
    fn default() -> Self {
        Self {
            fill: HEADER_FILL,
            bold: true,
            centered: true,
        }
    }
}

/// What the workbook writer applies to one sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetStyle {
    /// Applied to every cell of the first row.
    pub header: HeaderStyle,
    pub header_cells: usize,
    /// One width per column, in character units.
    pub column_widths: Vec<f64>,
}

pub fn plan_sheet_style(table: &SheetTable) -> SheetStyle {
    SheetStyle {
        header: HeaderStyle::default(),
        header_cells: table.headers.len(),
        column_widths: column_widths(table),
    }
}

/// Width of each column, sized to its longest rendered value.
pub fn column_widths(table: &SheetTable) -> Vec<f64> {
    let mut longest = vec![0usize; table.width()];

    for (col, header) in table.headers.iter().enumerate() {
        longest[col] = longest[col].max(header.chars().count());
    }
    for row in &table.rows {
        for (col, cell) in row.iter().enumerate() {
            longest[col] = longest[col].max(cell.display().chars().count());
        }
    }

    longest.into_iter().map(column_width).collect()
}

/// `(chars + 2) * 1.2`, capped at `MAX_COLUMN_WIDTH`.
pub fn column_width(chars: usize) -> f64 {
    ((chars + 2) as f64 * 1.2).min(MAX_COLUMN_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::sheet::CellValue;

    fn sheet(headers: &[&str], rows: Vec<Vec<CellValue>>) -> SheetTable {
        SheetTable {
            name: "t".to_string(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows,
        }
    }

    #[test]
    fn width_formula_and_cap() {
        assert!((column_width(8) - 12.0).abs() < 1e-9);
        assert!((column_width(0) - 2.4).abs() < 1e-9);
        assert_eq!(column_width(200), MAX_COLUMN_WIDTH);
    }

    #[test]
    fn widths_follow_longest_value_per_column() {
        let t = sheet(
            &["Metric", "Value"],
            vec![
                vec![CellValue::Text("Total Items Sold".to_string()), CellValue::Integer(6)],
                vec![CellValue::Text("Total Sales".to_string()), CellValue::Currency(1234.5)],
            ],
        );
        let widths = column_widths(&t);
        // "Total Items Sold" = 16 chars, "$1,234.50" = 9 chars.
        assert!((widths[0] - 21.6).abs() < 1e-9);
        assert!((widths[1] - 13.2).abs() < 1e-9);
    }

    #[test]
    fn ragged_rows_get_widths_too() {
        let t = sheet(&["A"], vec![vec![CellValue::Empty, CellValue::Text("xyz".to_string())]]);
        let widths = column_widths(&t);
        assert_eq!(widths.len(), 2);
        assert!((widths[1] - 6.0).abs() < 1e-9);
    }

    #[test]
    fn header_directive_covers_header_row() {
        let style = plan_sheet_style(&sheet(&["Date", "Books"], Vec::new()));
        assert_eq!(style.header_cells, 2);
        assert_eq!(style.header.fill, HEADER_FILL);
        assert!(style.header.bold && style.header.centered);
    }
}
