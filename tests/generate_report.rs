//! End-to-end report generation, read back with calamine.

use std::fs;
use std::path::{Path, PathBuf};

use calamine::{Data, Reader, Xlsx, open_workbook};
use sales_report::{ErrorKind, ReportOptions, generate_report_in};
use tempfile::TempDir;

const SAMPLE: &str = "\
Date,Category,Product,Sales,Quantity
2024-01-01,Electronics,Phone,100.00,2
2024-01-01,Books,Novel,20.00,1
2024-01-02,Electronics,Charger,15.00,3
";

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("scratch")).unwrap();
        Self { dir }
    }

    fn csv(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn scratch(&self) -> PathBuf {
        self.dir.path().join("scratch")
    }

    fn scratch_files(&self) -> usize {
        fs::read_dir(self.scratch()).unwrap().count()
    }
}

fn sheet_rows(path: &Path, sheet: &str) -> Vec<Vec<Data>> {
    let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
    let range = workbook.worksheet_range(sheet).unwrap();
    range.rows().map(|r| r.to_vec()).collect()
}

fn sheet_names(path: &Path) -> Vec<String> {
    let workbook: Xlsx<_> = open_workbook(path).unwrap();
    workbook.sheet_names()
}

#[test]
fn full_report_has_every_sheet() {
    let ws = Workspace::new();
    let input = ws.csv("sales.csv", SAMPLE);

    let summary = generate_report_in(&input, &ws.path("report"), &ReportOptions::default(), &ws.scratch()).unwrap();

    assert_eq!(summary.output, ws.path("report.xlsx"));
    assert!(summary.output.exists());
    assert_eq!(
        sheet_names(&summary.output),
        vec!["Raw Data", "Category Sales", "Daily Sales", "Charts", "Summary Stats"]
    );
    assert_eq!(summary.rows_kept, 3);
    assert!(summary.skipped_charts.is_empty());
    assert_eq!(ws.scratch_files(), 0);

    let raw = sheet_rows(&summary.output, "Raw Data");
    assert_eq!(raw.len(), 1 + 3);
    assert_eq!(raw[0][0], Data::String("Date".to_string()));
    assert_eq!(raw[1][2], Data::String("Phone".to_string()));
    assert_eq!(raw[1][3], Data::Float(100.0));

    let categories = sheet_rows(&summary.output, "Category Sales");
    assert_eq!(
        categories[1],
        vec![Data::String("Books".to_string()), Data::Float(20.0), Data::Float(1.0)]
    );
    assert_eq!(
        categories[2],
        vec![Data::String("Electronics".to_string()), Data::Float(115.0), Data::Float(5.0)]
    );

    let daily = sheet_rows(&summary.output, "Daily Sales");
    assert_eq!(daily[0][1], Data::String("Books".to_string()));
    assert_eq!(daily.len(), 3);
    assert_eq!(daily[2][1], Data::Float(0.0));

    let stats = sheet_rows(&summary.output, "Summary Stats");
    assert_eq!(stats[1][0], Data::String("Total Sales".to_string()));
    assert_eq!(stats[1][1], Data::Float(135.0));
    assert_eq!(stats[3][1], Data::Float(6.0));
    assert_eq!(stats[4][1], Data::Float(3.0));
    assert_eq!(stats[5][1], Data::String("2024-01-01 to 2024-01-02".to_string()));
}

#[test]
fn raw_data_row_count_matches_cleaned_rows() {
    let ws = Workspace::new();
    let input = ws.csv(
        "messy.CSV",
        "\
Date,Category,Product,Sales,Quantity,Region
2024-02-01,Toys,Kite,12.5,1,North
2024-02-01,Toys,Ball,oops,1,North
2024-02-02,Garden,Hose,30,2,
2024-02-03,Garden,Rake,18,1,South,extra
2024-02-03,Garden,Spade,22,3,South
",
    );

    let options = ReportOptions {
        include_charts: false,
        ..ReportOptions::default()
    };
    let summary = generate_report_in(&input, &ws.path("messy.xlsx"), &options, &ws.scratch()).unwrap();
    assert_eq!(summary.rows_read, 5);
    assert_eq!(summary.rows_kept, 2);
    assert_eq!(summary.warnings, 3);

    let raw = sheet_rows(&summary.output, "Raw Data");
    assert_eq!(raw.len(), 1 + 2);
    assert_eq!(raw[0][5], Data::String("Region".to_string()));
    assert_eq!(raw[2][5], Data::String("South".to_string()));
}

#[test]
fn huge_quantities_sum_without_overflow() {
    let ws = Workspace::new();
    let input = ws.csv(
        "bulk.csv",
        "\
Date,Category,Product,Sales,Quantity
2024-03-01,Bulk,Bolts,10,9000000000000000000
2024-03-02,Bulk,Nuts,20,9000000000000000000
",
    );

    let summary = generate_report_in(&input, &ws.path("bulk"), &ReportOptions::default(), &ws.scratch()).unwrap();
    let stats = summary.stats.unwrap();
    assert_eq!(stats.total_quantity, 18_000_000_000_000_000_000);

    let categories = sheet_rows(&summary.output, "Category Sales");
    assert_eq!(categories[1][2], Data::Float(1.8e19));
    let rows = sheet_rows(&summary.output, "Summary Stats");
    assert_eq!(rows[3][1], Data::Float(1.8e19));
}

#[test]
fn overlong_text_is_truncated_to_the_cell_limit() {
    let ws = Workspace::new();
    let product = "x".repeat(40_000);
    let input = ws.csv(
        "long.csv",
        &format!("Date,Category,Product,Sales,Quantity\n2024-03-01,Books,{product},10,1\n"),
    );

    let summary = generate_report_in(&input, &ws.path("long"), &ReportOptions::default(), &ws.scratch()).unwrap();
    assert_eq!(summary.rows_kept, 1);
    assert_eq!(summary.truncated_cells, 1);

    let raw = sheet_rows(&summary.output, "Raw Data");
    assert_eq!(raw.len(), 2);
    assert_eq!(raw[1][2], Data::String("x".repeat(32_767)));
}

#[test]
fn optional_sheets_follow_options() {
    let ws = Workspace::new();
    let input = ws.csv("sales.csv", SAMPLE);
    let options = ReportOptions {
        include_pivot: false,
        include_charts: false,
        include_stats: false,
    };

    let summary = generate_report_in(&input, &ws.path("bare.xlsx"), &options, &ws.scratch()).unwrap();
    assert_eq!(summary.sheets, vec!["Raw Data".to_string()]);
    assert!(summary.stats.is_none());
    assert_eq!(sheet_names(&summary.output), vec!["Raw Data"]);
}

#[test]
fn repeated_runs_produce_identical_cells() {
    let ws = Workspace::new();
    let input = ws.csv("sales.csv", SAMPLE);

    let first = generate_report_in(&input, &ws.path("a"), &ReportOptions::default(), &ws.scratch()).unwrap();
    let second = generate_report_in(&input, &ws.path("b"), &ReportOptions::default(), &ws.scratch()).unwrap();

    let names = sheet_names(&first.output);
    assert_eq!(names, sheet_names(&second.output));
    for name in names.iter().filter(|n| n.as_str() != "Charts") {
        assert_eq!(sheet_rows(&first.output, name), sheet_rows(&second.output, name), "sheet {name}");
    }
}

#[test]
fn missing_columns_fail_without_output() {
    let ws = Workspace::new();
    let input = ws.csv("sales.csv", "Date,Product,Sales\n2024-01-01,Novel,20\n");

    let err = generate_report_in(&input, &ws.path("out"), &ReportOptions::default(), &ws.scratch()).unwrap_err();
    assert_eq!(
        err.kind(),
        &ErrorKind::MissingColumn(vec!["Category".to_string(), "Quantity".to_string()])
    );
    assert!(!ws.path("out.xlsx").exists());
}

#[test]
fn all_rows_invalid_is_empty_dataset() {
    let ws = Workspace::new();
    let input = ws.csv(
        "sales.csv",
        "Date,Category,Product,Sales,Quantity\nyesterday,Books,Novel,20,1\n2024-01-01,Books,Novel,free,1\n",
    );

    let err = generate_report_in(&input, &ws.path("out"), &ReportOptions::default(), &ws.scratch()).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::EmptyDataset);
    assert!(!ws.path("out.xlsx").exists());
}

#[test]
fn chart_failure_leaves_no_files_behind() {
    let ws = Workspace::new();
    let input = ws.csv(
        "refunds.csv",
        "Date,Category,Product,Sales,Quantity\n2024-01-01,Refunds,Phone,-50,1\n2024-01-02,Books,Novel,10,1\n",
    );

    let err = generate_report_in(&input, &ws.path("out"), &ReportOptions::default(), &ws.scratch()).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::ChartRender);
    assert_eq!(ws.scratch_files(), 0);
    assert!(!ws.path("out.xlsx").exists());
}

#[test]
fn save_failure_leaves_no_files_behind() {
    let ws = Workspace::new();
    let input = ws.csv("sales.csv", SAMPLE);
    let output = ws.path("no-such-dir").join("report.xlsx");

    let err = generate_report_in(&input, &output, &ReportOptions::default(), &ws.scratch()).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Save);
    assert_eq!(ws.scratch_files(), 0);
    assert!(!output.exists());
}
