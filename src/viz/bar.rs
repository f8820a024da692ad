//! Grouped bars: column 0 names the groups, every numeric value column is a series.

use crate::models::{Cell, Table};
use anyhow::{Result, anyhow, bail};
use plotters::coord::Shift;
use plotters::prelude::*;

use super::types::{Frame, LABEL_FONT_PX};
use super::util::{bar_range, category_label, extent, office_color};
use super::{build_chart, draw_legend, draw_mesh};

const GROUP_WIDTH: f64 = 0.8;

pub fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    table: &Table,
    frame: &Frame<'_>,
) -> Result<()> {
    let labels: Vec<String> = table.column(0).map(Cell::label).collect();
    let series: Vec<(&str, Vec<Option<f64>>)> = (1..table.column_count())
        .map(|col| {
            let vals = table.column(col).map(Cell::as_f64).collect::<Vec<_>>();
            (table.header(col), vals)
        })
        .filter(|(_, vals)| vals.iter().any(Option::is_some))
        .collect();
    if series.is_empty() {
        bail!("no numeric data to plot");
    }

    let (lo, hi) = extent(series.iter().flat_map(|(_, v)| v.iter().flatten().copied()))
        .ok_or_else(|| anyhow!("no numeric data to plot"))?;
    let (y0, y1) = bar_range(lo, hi);
    let n = labels.len().max(1);

    let mut chart = build_chart(root, frame, -0.5..n as f64 - 0.5, y0..y1, 0)?;
    let slot_px = (frame.plot_width_px(frame.left_label_px(y0, y1), 0) / n as u32).max(16);
    let x_fmt = |x: &f64| category_label(&labels, *x, LABEL_FONT_PX, slot_px);
    draw_mesh(&mut chart, frame, table.header(0), "Value", n, &x_fmt)?;

    let bar_w = GROUP_WIDTH / series.len() as f64;
    for (idx, (name, vals)) in series.iter().enumerate() {
        let color = office_color(idx);
        let bars = vals
            .iter()
            .enumerate()
            .filter_map(|(row, v)| v.map(|v| (row, v)))
            .map(move |(row, v)| {
                let x0 = row as f64 - GROUP_WIDTH / 2.0 + idx as f64 * bar_w;
                Rectangle::new(
                    [(x0, 0.0f64.min(v)), (x0 + bar_w, 0.0f64.max(v))],
                    color.filled(),
                )
            });
        chart
            .draw_series(bars)
            .map_err(|e| anyhow!("{:?}", e))?
            .label(*name)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    draw_legend(&mut chart)
}
