//! Scatter (column 0 vs column 1) and bubble (marker size from column 2).

use crate::models::Table;
use crate::stats::bubble_sizes;
use anyhow::{Result, anyhow, bail};
use plotters::coord::Shift;
use plotters::prelude::*;

use super::types::{Frame, LABEL_FONT_PX};
use super::util::{XValues, category_label, extent, format_tick, office_color, padded_range};
use super::{XYChart, build_chart, draw_mesh};

/// Plottable `(x, y, extra...)` rows: every requested value column must be numeric.
fn plottable_rows(table: &Table, xs: &XValues, value_cols: &[usize]) -> Vec<(f64, Vec<f64>)> {
    (0..table.row_count())
        .filter_map(|i| {
            let x = xs.position(i)?;
            let row = &table.rows[i];
            let vals = value_cols
                .iter()
                .map(|c| row.get(*c).and_then(|cell| cell.as_f64()))
                .collect::<Option<Vec<f64>>>()?;
            Some((x, vals))
        })
        .collect()
}

/// Chart with x axis per [`XValues`] and a padded y range over `ys`.
fn xy_chart<'a, DB: DrawingBackend>(
    root: &'a DrawingArea<DB, Shift>,
    table: &Table,
    frame: &Frame<'_>,
    xs: &XValues,
    ys: &[f64],
) -> Result<XYChart<'a, DB>> {
    let (ylo, yhi) = extent(ys.iter().copied()).ok_or_else(|| anyhow!("no numeric data to plot"))?;
    let (y0, y1) = padded_range(ylo, yhi);
    let (x0, x1) = xs.range();
    let mut chart = build_chart(root, frame, x0..x1, y0..y1, 0)?;

    let locale = frame.locale;
    match xs {
        XValues::Numeric(_) => {
            let x_fmt = move |x: &f64| format_tick(*x, locale);
            draw_mesh(&mut chart, frame, table.header(0), table.header(1), 8, &x_fmt)?;
        }
        XValues::Categorical(labels) => {
            let n = labels.len().max(1);
            let slot_px = (frame.plot_width_px(frame.left_label_px(y0, y1), 0) / n as u32).max(16);
            let x_fmt = |x: &f64| category_label(labels, *x, LABEL_FONT_PX, slot_px);
            draw_mesh(&mut chart, frame, table.header(0), table.header(1), n.min(24), &x_fmt)?;
        }
    }
    Ok(chart)
}

pub fn draw_scatter<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    table: &Table,
    frame: &Frame<'_>,
) -> Result<()> {
    let xs = XValues::from_column(table, 0);
    let points: Vec<(f64, f64)> = plottable_rows(table, &xs, &[1])
        .into_iter()
        .map(|(x, v)| (x, v[0]))
        .collect();
    if points.is_empty() {
        bail!("no numeric data to plot");
    }
    let ys: Vec<f64> = points.iter().map(|p| p.1).collect();
    let mut chart = xy_chart(root, table, frame, &xs, &ys)?;

    let color = office_color(0);
    chart
        .draw_series(points.iter().map(|p| Circle::new(*p, 4, color.filled())))
        .map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

pub fn draw_bubble<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    table: &Table,
    frame: &Frame<'_>,
) -> Result<()> {
    let xs = XValues::from_column(table, 0);
    let rows = plottable_rows(table, &xs, &[1, 2]);
    if rows.is_empty() {
        bail!("no numeric data to plot");
    }
    let raw_sizes: Vec<f64> = rows.iter().map(|(_, v)| v[1]).collect();
    let sizes = bubble_sizes(&raw_sizes);
    let ys: Vec<f64> = rows.iter().map(|(_, v)| v[0]).collect();
    let mut chart = xy_chart(root, table, frame, &xs, &ys)?;

    let color = office_color(0);
    let fill = color.mix(frame.bubble_opacity).filled();
    let bubbles = rows.iter().zip(&sizes).map(|((x, v), size)| {
        // Marker sizes are areas; the radius follows from them.
        let radius = (size / std::f64::consts::PI).sqrt().round() as u32;
        ((*x, v[0]), radius.max(1))
    });
    for ((x, y), radius) in bubbles {
        chart
            .draw_series([
                Circle::new((x, y), radius, fill),
                Circle::new((x, y), radius, color.stroke_width(1)),
            ])
            .map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}
