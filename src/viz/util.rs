//! Utility functions for visualization: colors, ranges, tick formatting, locale mapping.

use crate::models::Table;
use num_format::{Locale, ToFormattedString};
use plotters::prelude::*;

use super::text::{estimate_text_width_px, truncate_to_width};

/// Microsoft Office (2013+) chart series palette.
/// Order: Blue, Orange, Gray, Gold, Light Blue, Green, Dark Blue, Dark Orange, Dark Gray, Brownish Gold.
const OFFICE10: [RGBColor; 10] = [
    RGBColor(68, 114, 196),  // blue      (#4472C4)
    RGBColor(237, 125, 49),  // orange    (#ED7D31)
    RGBColor(165, 165, 165), // gray      (#A5A5A5)
    RGBColor(255, 192, 0),   // gold      (#FFC000)
    RGBColor(91, 155, 213),  // light blue(#5B9BD5)
    RGBColor(112, 173, 71),  // green     (#70AD47)
    RGBColor(38, 68, 120),   // dark blue (#264478)
    RGBColor(158, 72, 14),   // dark org. (#9E480E)
    RGBColor(99, 99, 99),    // dark gray (#636363)
    RGBColor(153, 115, 0),   // brownish  (#997300)
];

/// Get a color from the Office palette.
#[inline]
pub fn office_color(idx: usize) -> RGBAColor {
    OFFICE10[idx % OFFICE10.len()].to_rgba()
}

/// Map a user-provided locale tag to a `num_format::Locale`.
///
/// Supported tags (case-insensitive): `en`, `de`, `de_DE`, `german`, `fr`, `es`, `it`,
/// `pt`, `nl`, `ko`. Defaults to English.
pub fn map_locale(tag: &str) -> &'static Locale {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => &Locale::de,
        "fr" | "fr_fr" => &Locale::fr,
        "es" | "es_es" => &Locale::es,
        "it" | "it_it" => &Locale::it,
        "pt" | "pt_pt" | "pt_br" => &Locale::pt,
        "nl" | "nl_nl" => &Locale::nl,
        "ko" | "ko_kr" => &Locale::ko,
        _ => &Locale::en,
    }
}

/// Value-axis tick label: grouped whole numbers from 1000 up, otherwise 0–2 decimals.
pub fn format_tick(v: f64, locale: &Locale) -> String {
    let a = v.abs();
    if a >= 1000.0 {
        (v.round() as i64).to_formatted_string(locale)
    } else {
        let prec = if a >= 100.0 {
            0
        } else if a >= 10.0 {
            1
        } else {
            2
        };
        let s = format!("{:.*}", prec, v);
        if locale.decimal() == "," {
            s.replace('.', ",")
        } else {
            s
        }
    }
}

/// Compute a tight left label area width for the Y axis (in pixels),
/// based on the formatted tick labels that will appear.
///
/// Returns a width clamped to a sensible range to avoid extremes.
pub fn compute_left_label_area_px(
    ymin: f64,
    ymax: f64,
    ticks: usize,
    font_px: u32,
    locale: &Locale,
) -> u32 {
    let mut max_px = 0u32;
    // Sample the same number of tick positions as requested from Plotters.
    for i in 0..=ticks {
        let t = if ticks == 0 {
            0.0
        } else {
            i as f64 / ticks as f64
        };
        let v = ymin + (ymax - ymin) * t;
        max_px = max_px.max(estimate_text_width_px(&format_tick(v, locale), font_px));
    }

    // Room for tick marks plus the rotated axis description.
    let with_padding = max_px.saturating_add(30);
    with_padding.clamp(48, 140)
}

/// Min/max of the finite values, or `None` when there are none.
pub fn extent<I: IntoIterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in values.into_iter().filter(|v| v.is_finite()) {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if lo.is_finite() { Some((lo, hi)) } else { None }
}

/// Widen a data extent so points do not sit on the frame; degenerate extents get ±1.
pub fn padded_range(lo: f64, hi: f64) -> (f64, f64) {
    if (hi - lo).abs() < f64::EPSILON {
        (lo - 1.0, hi + 1.0)
    } else {
        let pad = (hi - lo) * 0.05;
        (lo - pad, hi + pad)
    }
}

/// Value range for bars: always includes the zero baseline.
pub fn bar_range(lo: f64, hi: f64) -> (f64, f64) {
    let lo = lo.min(0.0);
    let hi = hi.max(0.0);
    if (hi - lo).abs() < f64::EPSILON {
        (0.0, 1.0)
    } else {
        let pad = (hi - lo) * 0.05;
        (if lo < 0.0 { lo - pad } else { lo }, hi + pad)
    }
}

/// X positions of a column: numbers when every non-empty cell is numeric,
/// otherwise row positions labelled with the cell text.
#[derive(Debug, Clone, PartialEq)]
pub enum XValues {
    Numeric(Vec<Option<f64>>),
    Categorical(Vec<String>),
}

impl XValues {
    pub fn from_column(table: &Table, col: usize) -> Self {
        let cells: Vec<_> = table.column(col).collect();
        let numeric = cells.iter().all(|c| c.is_empty() || c.as_f64().is_some());
        if numeric && cells.iter().any(|c| !c.is_empty()) {
            XValues::Numeric(cells.iter().map(|c| c.as_f64()).collect())
        } else {
            XValues::Categorical(cells.iter().map(|c| c.label()).collect())
        }
    }

    /// Plot position of row `i`.
    pub fn position(&self, i: usize) -> Option<f64> {
        match self {
            XValues::Numeric(v) => v.get(i).copied().flatten(),
            XValues::Categorical(labels) => labels
                .get(i)
                .filter(|l| !l.trim().is_empty())
                .map(|_| i as f64),
        }
    }

    pub fn range(&self) -> (f64, f64) {
        match self {
            XValues::Numeric(v) => {
                let (lo, hi) = extent(v.iter().flatten().copied()).unwrap_or((0.0, 1.0));
                padded_range(lo, hi)
            }
            XValues::Categorical(labels) => (-0.5, labels.len().max(1) as f64 - 0.5),
        }
    }
}

/// Tick formatter for an axis whose integer positions name categories.
pub fn category_label(labels: &[String], x: f64, font_px: u32, max_px: u32) -> String {
    let r = x.round();
    if (x - r).abs() > 1e-6 || r < 0.0 {
        return String::new();
    }
    labels
        .get(r as usize)
        .map(|l| truncate_to_width(l, font_px, max_px))
        .unwrap_or_default()
}

/// Horizontal dash segments between `x0` and `x1` at height `y`.
pub fn dashed_segments(x0: f64, x1: f64, y: f64, dashes: usize) -> Vec<Vec<(f64, f64)>> {
    let dashes = dashes.max(1);
    let period = (x1 - x0) / dashes as f64;
    (0..dashes)
        .map(|i| {
            let a = x0 + i as f64 * period;
            vec![(a, y), (a + period * 0.6, y)]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Cell;

    #[test]
    fn tick_labels_follow_locale() {
        assert_eq!(format_tick(1234567.0, map_locale("en")), "1,234,567");
        assert_eq!(format_tick(1234567.0, map_locale("de")), "1.234.567");
        assert_eq!(format_tick(2.5, map_locale("de")), "2,50");
        assert_eq!(format_tick(42.0, map_locale("en")), "42.0");
    }

    #[test]
    fn mixed_column_is_categorical() {
        let t = Table::new(
            ["x", "y"],
            vec![
                vec![Cell::from("Q1"), Cell::from(1)],
                vec![Cell::from(2), Cell::from(2)],
            ],
        );
        let xs = XValues::from_column(&t, 0);
        assert!(matches!(xs, XValues::Categorical(_)));
        assert_eq!(xs.position(1), Some(1.0));
        assert_eq!(xs.range(), (-0.5, 1.5));
    }

    #[test]
    fn category_ticks_only_on_integer_positions() {
        let labels = vec!["A".to_string(), "B".to_string()];
        assert_eq!(category_label(&labels, 1.0, 12, 100), "B");
        assert_eq!(category_label(&labels, 0.5, 12, 100), "");
        assert_eq!(category_label(&labels, 5.0, 12, 100), "");
    }
}
