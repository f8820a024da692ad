//! Sheet-name dispatch: pick a chart strategy for a worksheet, check its shape,
//! and contain any rendering error to that one sheet.

use crate::models::Table;
use crate::options::DisplayOptions;
use crate::time_axis::TimeAxisKind;
use crate::viz;
use log::{debug, info, warn};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// The six chart kinds, in dispatch priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ChartCategory {
    BarHistogram,
    TimeSeries,
    Pie,
    Scatter,
    Pareto,
    Bubble,
}

impl ChartCategory {
    pub const ALL: [ChartCategory; 6] = [
        ChartCategory::BarHistogram,
        ChartCategory::TimeSeries,
        ChartCategory::Pie,
        ChartCategory::Scatter,
        ChartCategory::Pareto,
        ChartCategory::Bubble,
    ];

    /// The sheet name that selects this category.
    pub fn label(self) -> &'static str {
        match self {
            ChartCategory::BarHistogram => "바차트_히스토그램",
            ChartCategory::TimeSeries => "시계열차트",
            ChartCategory::Pie => "파이차트",
            ChartCategory::Scatter => "산점도",
            ChartCategory::Pareto => "파레토차트",
            ChartCategory::Bubble => "버블차트",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ChartCategory::BarHistogram => "bar/histogram",
            ChartCategory::TimeSeries => "time series",
            ChartCategory::Pie => "pie",
            ChartCategory::Scatter => "scatter",
            ChartCategory::Pareto => "Pareto",
            ChartCategory::Bubble => "bubble",
        }
    }

    pub fn min_columns(self) -> usize {
        match self {
            ChartCategory::Bubble => 3,
            _ => 2,
        }
    }

    /// Pixel width of the chart; the height comes from the display options.
    pub fn width_px(self) -> u32 {
        match self {
            ChartCategory::BarHistogram | ChartCategory::TimeSeries => 840,
            ChartCategory::Pie => 720,
            ChartCategory::Scatter | ChartCategory::Bubble => 780,
            ChartCategory::Pareto => 900,
        }
    }

    /// Exact, case-sensitive match against the six labels.
    pub fn from_sheet_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == name)
    }
}

impl fmt::Display for ChartCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Why a sheet produced no chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    UnrecognizedName,
    TooFewColumns { required: usize, found: usize },
    NoData,
}

/// Informational notice for a sheet that was not charted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkipNotice {
    pub sheet: String,
    pub category: Option<ChartCategory>,
    pub reason: SkipReason,
}

impl fmt::Display for SkipNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.reason, self.category) {
            (SkipReason::UnrecognizedName, _) => write!(
                f,
                "Sheet '{}' does not match a supported chart type and was skipped.",
                self.sheet
            ),
            (SkipReason::TooFewColumns { required, found }, Some(c)) => write!(
                f,
                "Sheet '{}' needs at least {} columns for a {} chart (found {}); skipped.",
                self.sheet, required, c, found
            ),
            (SkipReason::TooFewColumns { required, found }, None) => write!(
                f,
                "Sheet '{}' needs at least {} columns (found {}); skipped.",
                self.sheet, required, found
            ),
            (SkipReason::NoData, _) => {
                write!(f, "Sheet '{}' has no data rows; skipped.", self.sheet)
            }
        }
    }
}

/// A strategy error, contained to its sheet.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("Chart for sheet '{sheet}' could not be rendered: {message}")]
pub struct RenderFailure {
    pub sheet: String,
    pub category: ChartCategory,
    pub message: String,
}

/// A rendered chart, ready to be placed in a dashboard cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartArtifact {
    pub sheet: String,
    pub category: ChartCategory,
    pub svg: String,
    pub width: u32,
    pub height: u32,
    /// How column 0 was read; time-series charts only.
    pub time_axis: Option<TimeAxisKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SheetOutcome {
    Rendered(ChartArtifact),
    Skipped(SkipNotice),
    Failed(RenderFailure),
}

impl SheetOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, SheetOutcome::Rendered(_))
    }
}

/// Shape check: enough columns and at least one row that is not entirely empty.
pub fn safe_sheet(table: &Table, needed: usize) -> Result<(), SkipReason> {
    if table.column_count() < needed {
        return Err(SkipReason::TooFewColumns {
            required: needed,
            found: table.column_count(),
        });
    }
    if table.non_empty_row_count() == 0 {
        return Err(SkipReason::NoData);
    }
    Ok(())
}

/// Render one sheet. Never panics on bad data and never affects other sheets.
pub fn render(sheet_name: &str, table: &Table, options: &DisplayOptions) -> SheetOutcome {
    let Some(category) = ChartCategory::from_sheet_name(sheet_name) else {
        info!("sheet '{}': no matching chart type, skipped", sheet_name);
        return SheetOutcome::Skipped(SkipNotice {
            sheet: sheet_name.to_string(),
            category: None,
            reason: SkipReason::UnrecognizedName,
        });
    };
    debug!("sheet '{}' dispatched to {} chart", sheet_name, category);

    if let Err(reason) = safe_sheet(table, category.min_columns()) {
        info!("sheet '{}': {:?}, skipped", sheet_name, reason);
        return SheetOutcome::Skipped(SkipNotice {
            sheet: sheet_name.to_string(),
            category: Some(category),
            reason,
        });
    }

    match viz::render_svg(category, sheet_name, table, options) {
        Ok(chart) => {
            if let Some(kind) = chart.time_axis {
                info!("sheet '{}': {}", sheet_name, kind);
            }
            SheetOutcome::Rendered(ChartArtifact {
                sheet: sheet_name.to_string(),
                category,
                svg: chart.svg,
                width: chart.width,
                height: chart.height,
                time_axis: chart.time_axis,
            })
        }
        Err(e) => {
            warn!("sheet '{}': {} chart failed: {:#}", sheet_name, category, e);
            SheetOutcome::Failed(RenderFailure {
                sheet: sheet_name.to_string(),
                category,
                message: format!("{:#}", e),
            })
        }
    }
}

/// Recognized labels first in priority order, then the rest in workbook order.
pub fn dashboard_order<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for category in ChartCategory::ALL {
        if let Some(name) = names.iter().find(|n| n.as_ref() == category.label()) {
            out.push(name.as_ref().to_string());
        }
    }
    for name in names {
        if ChartCategory::from_sheet_name(name.as_ref()).is_none() {
            out.push(name.as_ref().to_string());
        }
    }
    out
}
