//! Best-effort interpretation of a table column as timestamps.
//!
//! The interpretation is all-or-nothing: either every non-empty cell reads as a
//! date and the column becomes a date axis, or the raw cells are used as they
//! are. Which of the two happened is always reported back to the caller.

use crate::models::{Cell, Table};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

/// How the x axis of a time series was built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimeAxisKind {
    /// Column 0 was read as dates.
    ParsedDates,
    /// Column 0 did not read as dates; the raw values were used.
    RawValues,
}

impl fmt::Display for TimeAxisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeAxisKind::ParsedDates => f.write_str("x axis: parsed dates"),
            TimeAxisKind::RawValues => {
                f.write_str("x axis: raw values (column could not be read as dates)")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TimeAxis {
    /// One entry per table row; `None` where the cell was empty.
    Parsed(Vec<Option<NaiveDateTime>>),
    Raw,
}

impl TimeAxis {
    pub fn kind(&self) -> TimeAxisKind {
        match self {
            TimeAxis::Parsed(_) => TimeAxisKind::ParsedDates,
            TimeAxis::Raw => TimeAxisKind::RawValues,
        }
    }
}

// YYYY-MM[-DD], YYYY/MM/DD, YYYY.MM.DD and "2024년 1월 5일", optional HH:MM[:SS].
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\d{4})\s*[-./년]\s*(\d{1,2})\s*월?\s*(?:[-./]?\s*(\d{1,2})\s*일?)?\.?(?:[T\s]+(\d{1,2}):(\d{2})(?::(\d{2}))?)?$",
    )
    .expect("date pattern is valid")
});

/// Parse a date-like string. Plain numbers are never dates.
pub fn parse_date_text(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    if let Some(caps) = DATE_RE.captures(s) {
        let num = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());
        let year = caps.get(1)?.as_str().parse::<i32>().ok()?;
        let month = num(2)?;
        let day = num(3).unwrap_or(1);
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let time = match num(4) {
            Some(h) => NaiveTime::from_hms_opt(h, num(5).unwrap_or(0), num(6).unwrap_or(0))?,
            None => NaiveTime::MIN,
        };
        return Some(date.and_time(time));
    }

    // Month-first US dates and English month names.
    for fmt in ["%m/%d/%Y %H:%M:%S", "%m/%d/%Y %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    for fmt in ["%m/%d/%Y", "%b %d, %Y", "%d %b %Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d.and_time(NaiveTime::MIN));
        }
    }
    // "Jan 2024": chrono needs a day, so pin it to the first.
    NaiveDate::parse_from_str(&format!("1 {s}"), "%d %b %Y")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN))
}

fn cell_as_datetime(cell: &Cell) -> Option<NaiveDateTime> {
    match cell {
        Cell::DateTime(dt) => Some(*dt),
        Cell::Text(s) => parse_date_text(s),
        _ => None,
    }
}

/// Interpret `column` of `table` as dates when every non-empty cell allows it.
pub fn parse_time_axis(table: &Table, column: usize) -> TimeAxis {
    let mut out = Vec::with_capacity(table.row_count());
    let mut seen = 0usize;
    for cell in table.column(column) {
        if cell.is_empty() {
            out.push(None);
            continue;
        }
        match cell_as_datetime(cell) {
            Some(dt) => {
                seen += 1;
                out.push(Some(dt));
            }
            None => return TimeAxis::Raw,
        }
    }
    if seen == 0 {
        TimeAxis::Raw
    } else {
        TimeAxis::Parsed(out)
    }
}
