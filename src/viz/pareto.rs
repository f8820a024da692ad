//! Pareto: bars sorted largest first plus the cumulative share on a 0–110 % axis.

use crate::models::Table;
use crate::stats::pareto;
use anyhow::{Result, anyhow, bail};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;

use super::types::{DESC_FONT_PX, Frame, LABEL_FONT_PX};
use super::util::{bar_range, category_label, dashed_segments, extent, office_color};
use super::{build_chart, draw_mesh};

const RIGHT_LABEL_PX: u32 = 64;
const REFERENCE_PCT: f64 = 80.0;
const REFERENCE_COLOR: RGBColor = RGBColor(192, 0, 0);

pub fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    table: &Table,
    frame: &Frame<'_>,
) -> Result<()> {
    let rows: Vec<(String, f64)> = table
        .rows
        .iter()
        .filter_map(|r| {
            let label = r.first()?.label();
            if label.trim().is_empty() {
                return None;
            }
            Some((label, r.get(1)?.as_f64()?))
        })
        .collect();
    if rows.is_empty() {
        bail!("no numeric data to plot");
    }

    let points = pareto(&rows);
    let labels: Vec<String> = points.iter().map(|p| p.label.clone()).collect();
    let n = points.len();
    let (lo, hi) = extent(points.iter().map(|p| p.value))
        .ok_or_else(|| anyhow!("no numeric data to plot"))?;
    let (y0, y1) = bar_range(lo, hi);
    let x_range = -0.5..n as f64 - 0.5;

    let mut chart = build_chart(root, frame, x_range.clone(), y0..y1, RIGHT_LABEL_PX)?
        .set_secondary_coord(x_range.clone(), 0.0..110.0);

    let slot_px = (frame.plot_width_px(frame.left_label_px(y0, y1), RIGHT_LABEL_PX) / n as u32).max(16);
    let x_fmt = |x: &f64| category_label(&labels, *x, LABEL_FONT_PX, slot_px);
    draw_mesh(&mut *chart, frame, table.header(0), table.header(1), n, &x_fmt)?;

    let pct_fmt = |v: &f64| format!("{:.0}%", v);
    chart
        .configure_secondary_axes()
        .y_desc("Cumulative %")
        .y_labels(12)
        .y_label_formatter(&pct_fmt)
        .label_style((FontFamily::SansSerif, LABEL_FONT_PX))
        .axis_desc_style((FontFamily::SansSerif, DESC_FONT_PX))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))?;

    let bar_color = office_color(0);
    chart
        .draw_series(points.iter().enumerate().map(|(i, p)| {
            let x = i as f64;
            Rectangle::new(
                [(x - 0.4, 0.0f64.min(p.value)), (x + 0.4, 0.0f64.max(p.value))],
                bar_color.filled(),
            )
        }))
        .map_err(|e| anyhow!("{:?}", e))?;

    let line_color = office_color(1);
    let cumulative: Vec<(f64, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.cumulative_percent()))
        .collect();
    chart
        .draw_secondary_series(LineSeries::new(cumulative.iter().copied(), line_color.stroke_width(2)))
        .map_err(|e| anyhow!("{:?}", e))?;
    chart
        .draw_secondary_series(cumulative.iter().map(|p| Circle::new(*p, 4, line_color.filled())))
        .map_err(|e| anyhow!("{:?}", e))?;

    let dashes = (n * 8).clamp(16, 60);
    chart
        .draw_secondary_series(
            dashed_segments(x_range.start, x_range.end, REFERENCE_PCT, dashes)
                .into_iter()
                .map(|seg| PathElement::new(seg, REFERENCE_COLOR.stroke_width(1))),
        )
        .map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}
