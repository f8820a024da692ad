//! Single pie: column 0 labels, column 1 values, wedges clockwise from 12 o'clock.

use crate::models::Table;
use crate::stats::{PieSlice, pie_slices};
use anyhow::{Result, anyhow, bail};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::text::truncate_to_width;
use super::types::{CAPTION_FONT_PX, Frame, LABEL_FONT_PX};
use super::util::office_color;

const MAX_LABEL_PX: u32 = 150;

/// Screen point at `deg` (clockwise from 12 o'clock) on a circle of `radius`.
fn polar(center: (f64, f64), radius: f64, deg: f64) -> (i32, i32) {
    let rad = deg.to_radians();
    (
        (center.0 + radius * rad.sin()).round() as i32,
        (center.1 - radius * rad.cos()).round() as i32,
    )
}

fn wedge(center: (f64, f64), radius: f64, slice: &PieSlice) -> Vec<(i32, i32)> {
    let sweep = slice.end_deg - slice.start_deg;
    let steps = (sweep / 2.0).ceil().max(1.0) as usize;
    let mut pts = Vec::with_capacity(steps + 2);
    pts.push((center.0.round() as i32, center.1.round() as i32));
    for i in 0..=steps {
        let deg = slice.start_deg + sweep * i as f64 / steps as f64;
        pts.push(polar(center, radius, deg));
    }
    pts
}

pub fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    table: &Table,
    frame: &Frame<'_>,
) -> Result<()> {
    let rows: Vec<(String, f64)> = table
        .rows
        .iter()
        .filter_map(|r| {
            let value = r.get(1)?.as_f64()?;
            Some((r.first()?.label(), value))
        })
        .collect();
    if rows.is_empty() {
        bail!("no numeric data to plot");
    }
    let values: Vec<f64> = rows.iter().map(|(_, v)| *v).collect();
    let slices = pie_slices(&values)?;

    let margin = frame.margin_px() as f64;
    let mut top = margin;
    if let Some(title) = frame.title {
        let style = TextStyle::from((FontFamily::SansSerif, CAPTION_FONT_PX))
            .pos(Pos::new(HPos::Center, VPos::Top));
        root.draw(&Text::new(
            title,
            ((frame.width / 2) as i32, margin as i32),
            style,
        ))
        .map_err(|e| anyhow!("{:?}", e))?;
        top += CAPTION_FONT_PX as f64 + 8.0;
    }

    let avail_w = frame.width as f64 - 2.0 * margin;
    let avail_h = frame.height as f64 - top - margin;
    let scale = if frame.tight { 0.78 } else { 0.66 };
    let radius = (avail_w.min(avail_h) / 2.0 * scale).max(10.0);
    let center = (frame.width as f64 / 2.0, top + avail_h / 2.0);

    for (idx, slice) in slices.iter().enumerate() {
        let color = office_color(idx);
        let pts = wedge(center, radius, slice);
        root.draw(&Polygon::new(pts.clone(), color.filled()))
            .map_err(|e| anyhow!("{:?}", e))?;
        let mut outline = pts;
        outline.push(outline[0]);
        root.draw(&PathElement::new(outline, WHITE.stroke_width(1)))
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    for ((label, _), slice) in rows.iter().zip(&slices) {
        let mid = slice.mid_deg();
        let sin = mid.to_radians().sin();
        let hpos = if sin > 0.1 {
            HPos::Left
        } else if sin < -0.1 {
            HPos::Right
        } else {
            HPos::Center
        };
        let outside = TextStyle::from((FontFamily::SansSerif, LABEL_FONT_PX))
            .pos(Pos::new(hpos, VPos::Center));
        root.draw(&Text::new(
            truncate_to_width(label, LABEL_FONT_PX, MAX_LABEL_PX),
            polar(center, radius * 1.1, mid),
            outside,
        ))
        .map_err(|e| anyhow!("{:?}", e))?;

        let inside = TextStyle::from((FontFamily::SansSerif, LABEL_FONT_PX))
            .color(&WHITE)
            .pos(Pos::new(HPos::Center, VPos::Center));
        root.draw(&Text::new(
            format!("{:.1}%", slice.share * 100.0),
            polar(center, radius * 0.62, mid),
            inside,
        ))
        .map_err(|e| anyhow!("{:?}", e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_wedge_starts_at_twelve_and_runs_clockwise() {
        let slice = PieSlice {
            share: 0.25,
            start_deg: 0.0,
            end_deg: 90.0,
        };
        let pts = wedge((100.0, 100.0), 50.0, &slice);
        assert_eq!(pts[0], (100, 100));
        assert_eq!(pts[1], (100, 50));
        assert_eq!(*pts.last().unwrap(), (150, 100));
    }
}
