//! Time series: one line per value column over column 0.
//!
//! Parsed dates are plotted as fractional days since the Unix epoch and turned
//! back into calendar labels by the tick formatter. Raw columns fall back to
//! numeric or categorical positions.

use crate::models::{Cell, Table};
use crate::time_axis::TimeAxis;
use anyhow::{Result, anyhow, bail};
use chrono::{DateTime, NaiveDateTime, NaiveTime};
use plotters::coord::Shift;
use plotters::prelude::*;

use super::types::{Frame, LABEL_FONT_PX};
use super::util::{XValues, category_label, extent, format_tick, office_color, padded_range};
use super::{build_chart, draw_legend, draw_mesh};

const SECONDS_PER_DAY: f64 = 86_400.0;

fn to_days(dt: &NaiveDateTime) -> f64 {
    dt.and_utc().timestamp() as f64 / SECONDS_PER_DAY
}

fn format_day(x: f64, fmt: &str) -> String {
    DateTime::from_timestamp((x * SECONDS_PER_DAY).round() as i64, 0)
        .map(|d| d.format(fmt).to_string())
        .unwrap_or_default()
}

/// Tick label layout for a date axis spanning `span_days`.
fn date_format(span_days: f64, has_time_of_day: bool) -> &'static str {
    if has_time_of_day && span_days <= 2.0 {
        "%m-%d %H:%M"
    } else if span_days > 730.0 {
        "%Y-%m"
    } else {
        "%Y-%m-%d"
    }
}

/// Split a series into runs of consecutive plottable points; gaps break the line.
fn segments(xs: &[Option<f64>], ys: &[Option<f64>]) -> Vec<Vec<(f64, f64)>> {
    let mut out: Vec<Vec<(f64, f64)>> = Vec::new();
    let mut cur: Vec<(f64, f64)> = Vec::new();
    for (x, y) in xs.iter().zip(ys) {
        match (x, y) {
            (Some(x), Some(y)) => cur.push((*x, *y)),
            _ => {
                if !cur.is_empty() {
                    out.push(std::mem::take(&mut cur));
                }
            }
        }
    }
    if !cur.is_empty() {
        out.push(cur);
    }
    out
}

pub fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    table: &Table,
    axis: &TimeAxis,
    frame: &Frame<'_>,
) -> Result<()> {
    let raw = match axis {
        TimeAxis::Parsed(_) => None,
        TimeAxis::Raw => Some(XValues::from_column(table, 0)),
    };
    let xs: Vec<Option<f64>> = match (axis, &raw) {
        (TimeAxis::Parsed(dates), _) => dates.iter().map(|d| d.as_ref().map(to_days)).collect(),
        (TimeAxis::Raw, Some(xv)) => (0..table.row_count()).map(|i| xv.position(i)).collect(),
        (TimeAxis::Raw, None) => Vec::new(),
    };

    let series: Vec<(&str, Vec<Vec<(f64, f64)>>)> = (1..table.column_count())
        .map(|col| {
            let ys = table.column(col).map(Cell::as_f64).collect::<Vec<_>>();
            (table.header(col), segments(&xs, &ys))
        })
        .filter(|(_, segs)| !segs.is_empty())
        .collect();
    if series.is_empty() {
        bail!("no numeric data to plot");
    }

    let all_points = || series.iter().flat_map(|(_, segs)| segs.iter().flatten());
    let (ylo, yhi) = extent(all_points().map(|p| p.1))
        .ok_or_else(|| anyhow!("no numeric data to plot"))?;
    let (y0, y1) = padded_range(ylo, yhi);

    let (x0, x1) = match &raw {
        Some(xv) => xv.range(),
        None => {
            let (lo, hi) = extent(xs.iter().flatten().copied()).unwrap_or((0.0, 1.0));
            padded_range(lo, hi)
        }
    };

    let mut chart = build_chart(root, frame, x0..x1, y0..y1, 0)?;

    let locale = frame.locale;
    let (x_fmt, x_labels): (Box<dyn Fn(&f64) -> String + '_>, usize) = match (&raw, axis) {
        (Some(XValues::Categorical(labels)), _) => {
            let n = labels.len().max(1);
            let slot_px = (frame.plot_width_px(frame.left_label_px(y0, y1), 0) / n as u32).max(16);
            (
                Box::new(move |x: &f64| category_label(labels, *x, LABEL_FONT_PX, slot_px)),
                n.min(24),
            )
        }
        (Some(XValues::Numeric(_)), _) => (Box::new(move |x: &f64| format_tick(*x, locale)), 8),
        (None, TimeAxis::Parsed(dates)) => {
            let has_time = dates.iter().flatten().any(|d| d.time() != NaiveTime::MIN);
            let fmt = date_format(x1 - x0, has_time);
            (Box::new(move |x: &f64| format_day(*x, fmt)), 6)
        }
        (None, TimeAxis::Raw) => (Box::new(|x: &f64| format!("{x}")), 8),
    };
    draw_mesh(&mut chart, frame, table.header(0), "Value", x_labels, &*x_fmt)?;

    for (idx, (name, segs)) in series.iter().enumerate() {
        let color = office_color(idx);
        for seg in segs {
            chart
                .draw_series(LineSeries::new(seg.iter().copied(), color.stroke_width(2)))
                .map_err(|e| anyhow!("{:?}", e))?;
        }
        chart
            .draw_series(
                segs.iter()
                    .flatten()
                    .map(move |p| Circle::new(*p, 3, color.filled())),
            )
            .map_err(|e| anyhow!("{:?}", e))?
            .label(*name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], color.stroke_width(2)));
    }

    draw_legend(&mut chart)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gaps_split_the_line() {
        let xs = [Some(0.0), Some(1.0), Some(2.0), None, Some(4.0)];
        let ys = [Some(1.0), None, Some(3.0), Some(9.0), Some(5.0)];
        assert_eq!(
            segments(&xs, &ys),
            vec![vec![(0.0, 1.0)], vec![(2.0, 3.0)], vec![(4.0, 5.0)]]
        );
    }

    #[test]
    fn long_spans_label_months() {
        assert_eq!(date_format(1000.0, false), "%Y-%m");
        assert_eq!(date_format(30.0, false), "%Y-%m-%d");
        assert_eq!(date_format(1.0, true), "%m-%d %H:%M");
    }
}
