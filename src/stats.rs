use crate::models::Table;
use anyhow::{Result, anyhow, bail};
use serde::{Deserialize, Serialize};

/// Lower bound of the bubble size range (marker area units).
pub const BUBBLE_MIN_SIZE: f64 = 100.0;
/// Width of the bubble size range; sizes land in `[100, 2100]`.
pub const BUBBLE_SIZE_SPAN: f64 = 2000.0;
/// Size given to every bubble when the largest size value is not positive.
pub const BUBBLE_FALLBACK_SIZE: f64 = 300.0;
const BUBBLE_EPSILON: f64 = 1e-9;

/// Summary statistics for one value column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub missing: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

/// Compute statistics for every value column (column 1 onwards).
/// Cells without a numeric view count as missing.
pub fn column_summaries(table: &Table) -> Vec<ColumnSummary> {
    let mut out = Vec::new();
    for col in 1..table.column_count() {
        let mut vals: Vec<f64> = Vec::new();
        let mut missing = 0usize;
        for cell in table.column(col) {
            match cell.as_f64() {
                Some(v) => vals.push(v),
                None => missing += 1,
            }
        }
        vals.sort_by(|a, b| a.total_cmp(b));
        let count = vals.len();
        let min = vals.first().cloned();
        let max = vals.last().cloned();
        let mean = if count > 0 {
            Some(vals.iter().copied().sum::<f64>() / count as f64)
        } else {
            None
        };
        let median = if count == 0 {
            None
        } else if count % 2 == 1 {
            Some(vals[count / 2])
        } else {
            Some((vals[count / 2 - 1] + vals[count / 2]) / 2.0)
        };
        out.push(ColumnSummary {
            column: table.header(col).to_string(),
            count,
            missing,
            min,
            max,
            mean,
            median,
        });
    }
    out
}

/// One bar of a Pareto chart with its running totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParetoPoint {
    pub label: String,
    pub value: f64,
    pub cumulative: f64,
    /// Running sum divided by the total (or by 1 when the total is zero).
    pub cumulative_fraction: f64,
}

impl ParetoPoint {
    pub fn cumulative_percent(&self) -> f64 {
        self.cumulative_fraction * 100.0
    }
}

/// Sort `(label, value)` rows by value, largest first, and attach cumulative shares.
/// Ties keep their input order.
pub fn pareto(rows: &[(String, f64)]) -> Vec<ParetoPoint> {
    let mut sorted: Vec<&(String, f64)> = rows.iter().collect();
    sorted.sort_by(|a, b| b.1.total_cmp(&a.1));

    let total: f64 = sorted.iter().map(|(_, v)| *v).sum();
    let divisor = if total != 0.0 { total } else { 1.0 };

    let mut running = 0.0;
    sorted
        .into_iter()
        .map(|(label, value)| {
            running += *value;
            ParetoPoint {
                label: label.clone(),
                value: *value,
                cumulative: running,
                cumulative_fraction: running / divisor,
            }
        })
        .collect()
}

/// Rescale raw bubble sizes into the visual range with min–max normalisation.
pub fn bubble_sizes(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if max > 0.0 {
        values
            .iter()
            .map(|v| BUBBLE_MIN_SIZE + BUBBLE_SIZE_SPAN * (v - min) / (max - min + BUBBLE_EPSILON))
            .collect()
    } else {
        vec![BUBBLE_FALLBACK_SIZE; values.len()]
    }
}

/// One pie wedge. Angles are clockwise degrees from 12 o'clock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PieSlice {
    pub share: f64,
    pub start_deg: f64,
    pub end_deg: f64,
}

impl PieSlice {
    pub fn mid_deg(&self) -> f64 {
        (self.start_deg + self.end_deg) / 2.0
    }
}

/// Split the full circle by value share, in input order.
pub fn pie_slices(values: &[f64]) -> Result<Vec<PieSlice>> {
    if let Some(v) = values.iter().find(|v| **v < 0.0) {
        bail!("pie values must not be negative (found {})", v);
    }
    let total: f64 = values.iter().sum();
    if total <= 0.0 {
        return Err(anyhow!("pie values sum to zero"));
    }
    let mut start = 0.0;
    Ok(values
        .iter()
        .map(|v| {
            let share = v / total;
            let slice = PieSlice {
                share,
                start_deg: start,
                end_deg: start + share * 360.0,
            };
            start = slice.end_deg;
            slice
        })
        .collect())
}
