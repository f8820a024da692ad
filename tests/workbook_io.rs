mod common;

use sheet_dash::models::Cell;
use sheet_dash::{DashError, dispatch, workbook};

#[test]
fn xlsx_sheets_load_in_file_order() {
    let wb = workbook::load_bytes(common::dashboard_workbook_bytes(), Some("report.xlsx")).unwrap();
    let names = wb.sheet_names();
    assert_eq!(names[0], "notes");
    assert_eq!(names.len(), 7);

    let pie = wb.sheet("파이차트").unwrap().content.as_ref().unwrap();
    assert_eq!(pie.headers, vec!["item", "share"]);
    assert_eq!(pie.rows[0], vec![Cell::from("A"), Cell::Number(40.0)]);
}

#[test]
fn dashboard_order_puts_chart_sheets_first() {
    let wb = workbook::load_bytes(common::dashboard_workbook_bytes(), None).unwrap();
    assert_eq!(dispatch::dashboard_order(&wb.sheet_names()), common::DASHBOARD_ORDER);
}

#[test]
fn load_path_reads_files_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.xlsx");
    common::dashboard_workbook().save(&path).unwrap();
    let wb = workbook::load_path(&path).unwrap();
    assert!(wb.sheet("산점도").is_some());
}

#[test]
fn missing_file_is_an_io_error() {
    let err = workbook::load_path("/definitely/not/here.xlsx").unwrap_err();
    assert!(matches!(err, DashError::Io(_)));
}

#[test]
fn csv_sheet_name_comes_from_the_file_stem() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("산점도.csv");
    std::fs::write(&path, "x,y\n1,2\n3,4\n").unwrap();
    let wb = workbook::load_path(&path).unwrap();
    assert_eq!(wb.sheet_names(), vec!["산점도"]);
}
