mod common;

use sheet_dash::dashboard::{COMPLETION_MESSAGE, INSTRUCTIONS, PageContext, render_page};
use sheet_dash::models::Worksheet;
use sheet_dash::{Cell, Dashboard, DisplayOptions, SheetOutcome, SheetSelection, Table, Workbook, workbook};

#[test]
fn full_workbook_renders_six_charts_in_a_two_column_grid() {
    let wb = workbook::load_bytes(common::dashboard_workbook_bytes(), Some("report.xlsx")).unwrap();
    let opts = DisplayOptions::default();
    let d = Dashboard::build(&wb, &SheetSelection::All, &opts);

    let order: Vec<&str> = d.panels.iter().map(|p| p.sheet.as_str()).collect();
    assert_eq!(order, common::DASHBOARD_ORDER);
    assert_eq!(d.rendered_count(), 6);
    assert_eq!(d.skipped_count(), 1);
    assert_eq!(d.failed_count(), 0);
    assert_eq!(d.rows().count(), 4);

    let ctx = PageContext {
        interactive: true,
        file_name: Some("report.xlsx"),
        upload_error: None,
    };
    let html = render_page(Some(&d), &opts, &ctx).unwrap();
    assert_eq!(html.matches("<section class=\"panel\">").count(), 7);
    assert_eq!(html.matches("<div class=\"row\">").count(), 4);
    assert!(html.matches("<svg").count() >= 6);
    assert!(html.contains("x axis: parsed dates"));
    assert!(html.contains(COMPLETION_MESSAGE));
    assert!(html.contains("name=\"sheets_listed\""));
}

#[test]
fn no_recognized_sheets_gives_only_notices_and_completion() {
    let table = Table::new(["a", "b", "c"], vec![vec![Cell::from("x"), Cell::from(1), Cell::from(2)]]);
    let wb = Workbook {
        sheets: vec![
            Worksheet {
                name: "Sheet1".into(),
                content: Ok(table.clone()),
            },
            Worksheet {
                name: "Sheet2".into(),
                content: Ok(table),
            },
        ],
    };
    let opts = DisplayOptions::default();
    let d = Dashboard::build(&wb, &SheetSelection::All, &opts);
    assert!(d.panels.iter().all(|p| matches!(p.outcome, SheetOutcome::Skipped(_))));
    assert_eq!(d.notices().len(), 2);

    let html = render_page(Some(&d), &opts, &PageContext::default()).unwrap();
    assert!(!html.contains("<svg"));
    assert_eq!(html.matches("does not match a supported chart type").count(), 2);
    assert!(html.contains(COMPLETION_MESSAGE));
}

#[test]
fn page_without_upload_shows_instructions_only() {
    let ctx = PageContext {
        interactive: true,
        ..Default::default()
    };
    let html = render_page(None, &DisplayOptions::default(), &ctx).unwrap();
    assert!(html.contains(INSTRUCTIONS));
    assert!(!html.contains(COMPLETION_MESSAGE));
    assert!(html.contains("name=\"workbook\""));
}

#[test]
fn deselected_sheets_are_not_rendered() {
    let wb = workbook::load_bytes(common::dashboard_workbook_bytes(), None).unwrap();
    let selection = SheetSelection::Only(vec!["파이차트".into(), "notes".into()]);
    let d = Dashboard::build(&wb, &selection, &DisplayOptions::default());
    let order: Vec<&str> = d.panels.iter().map(|p| p.sheet.as_str()).collect();
    assert_eq!(order, vec!["파이차트", "notes"]);
    assert_eq!(d.sheets.iter().filter(|s| s.selected).count(), 2);
}
