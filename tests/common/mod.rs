//! Fixture workbooks built in memory.
#![allow(dead_code)]

use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

pub enum V {
    S(&'static str),
    N(f64),
}

fn fill(ws: &mut Worksheet, headers: &[&str], rows: &[Vec<V>]) -> Result<(), XlsxError> {
    for (c, h) in headers.iter().enumerate() {
        ws.write_string(0, c as u16, *h)?;
    }
    for (r, row) in rows.iter().enumerate() {
        for (c, v) in row.iter().enumerate() {
            match v {
                V::S(s) => ws.write_string(r as u32 + 1, c as u16, *s)?,
                V::N(n) => ws.write_number(r as u32 + 1, c as u16, *n)?,
            };
        }
    }
    Ok(())
}

pub fn add_sheet(wb: &mut Workbook, name: &str, headers: &[&str], rows: &[Vec<V>]) {
    let ws = wb.add_worksheet();
    ws.set_name(name).unwrap();
    fill(ws, headers, rows).unwrap();
}

/// All six chart sheets plus one unrelated sheet, in a deliberately shuffled order.
pub fn dashboard_workbook() -> Workbook {
    use V::{N, S};
    let mut wb = Workbook::new();
    add_sheet(&mut wb, "notes", &["memo"], &[vec![S("quarterly numbers")]]);
    add_sheet(
        &mut wb,
        "버블차트",
        &["x", "y", "size"],
        &[
            vec![N(1.0), N(2.0), N(10.0)],
            vec![N(2.0), N(3.5), N(40.0)],
            vec![N(3.0), N(1.0), N(25.0)],
        ],
    );
    add_sheet(
        &mut wb,
        "파레토차트",
        &["defect", "count"],
        &[
            vec![S("scratch"), N(20.0)],
            vec![S("dent"), N(50.0)],
            vec![S("other"), N(30.0)],
        ],
    );
    add_sheet(
        &mut wb,
        "바차트_히스토그램",
        &["region", "2023", "2024"],
        &[
            vec![S("North"), N(10.0), N(12.0)],
            vec![S("South"), N(7.0), N(9.0)],
            vec![S("West"), N(4.0), N(6.0)],
        ],
    );
    add_sheet(
        &mut wb,
        "시계열차트",
        &["date", "sales", "cost"],
        &[
            vec![S("2024-01-01"), N(100.0), N(80.0)],
            vec![S("2024-02-01"), N(120.0), N(90.0)],
            vec![S("2024-03-01"), N(90.0), N(85.0)],
        ],
    );
    add_sheet(
        &mut wb,
        "파이차트",
        &["item", "share"],
        &[
            vec![S("A"), N(40.0)],
            vec![S("B"), N(35.0)],
            vec![S("C"), N(25.0)],
        ],
    );
    add_sheet(
        &mut wb,
        "산점도",
        &["height", "weight"],
        &[
            vec![N(160.0), N(55.0)],
            vec![N(170.0), N(65.0)],
            vec![N(180.0), N(80.0)],
        ],
    );
    wb
}

pub fn dashboard_workbook_bytes() -> Vec<u8> {
    dashboard_workbook().save_to_buffer().unwrap()
}

/// Order the dashboard shows the fixture sheets in.
pub const DASHBOARD_ORDER: [&str; 7] = [
    "바차트_히스토그램",
    "시계열차트",
    "파이차트",
    "산점도",
    "파레토차트",
    "버블차트",
    "notes",
];
