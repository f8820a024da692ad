//! Chart rendering: one plotters strategy per chart category, drawn to **SVG** markup.
//!
//! - Distinct series colors (Microsoft Office palette)
//! - Locale-aware value tick labels (`30,000` vs `30.000`)
//! - Category axes label integer positions with truncated cell text
//! - Caption, margins and label areas follow the shared [`DisplayOptions`]

pub mod bar;
pub mod line;
pub mod pareto;
pub mod pie;
pub mod scatter;
pub mod text;
pub mod types;
pub mod util;

pub use types::{Frame, RenderedChart};

use crate::dispatch::ChartCategory;
use crate::models::Table;
use crate::options::DisplayOptions;
use crate::time_axis::parse_time_axis;
use anyhow::{Result, anyhow};
use log::debug;

use plotters::coord::Shift;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::FontFamily;

use plotters_svg::SVGBackend;

use std::ops::Range;
use std::sync::Once;

use types::{CAPTION_FONT_PX, DESC_FONT_PX, LABEL_FONT_PX, Y_LABELS};
use util::format_tick;

/// Cartesian chart over plain `f64` axes, the coordinate system every strategy but pie uses.
pub(crate) type XYChart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// One-time registration for a fallback "sans-serif" font when using the `ab_glyph` text path.
/// Required because `ab_glyph` doesn't discover OS fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        // From `src/viz/mod.rs` → project root → `assets/DejaVuSans.ttf`
        let _ = plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        );
    });
}

/// Draw `table` with the strategy of `category` and return the SVG markup.
///
/// The table is only read. Errors carry a human-readable cause such as
/// "no numeric data to plot" or "pie values sum to zero".
pub fn render_svg(
    category: ChartCategory,
    sheet_name: &str,
    table: &Table,
    options: &DisplayOptions,
) -> Result<RenderedChart> {
    ensure_fonts_registered();

    let width = category.width_px();
    let height = options.height_px;
    let frame = Frame::new(sheet_name, options, width);
    let mut time_axis = None;

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

        match category {
            ChartCategory::BarHistogram => bar::draw(&root, table, &frame)?,
            ChartCategory::TimeSeries => {
                let axis = parse_time_axis(table, 0);
                debug!("'{}': {}", sheet_name, axis.kind());
                line::draw(&root, table, &axis, &frame)?;
                time_axis = Some(axis.kind());
            }
            ChartCategory::Pie => pie::draw(&root, table, &frame)?,
            ChartCategory::Scatter => scatter::draw_scatter(&root, table, &frame)?,
            ChartCategory::Pareto => pareto::draw(&root, table, &frame)?,
            ChartCategory::Bubble => scatter::draw_bubble(&root, table, &frame)?,
        }

        root.present().map_err(|e| anyhow!("{:?}", e))?;
    }

    Ok(RenderedChart {
        svg,
        width,
        height,
        time_axis,
    })
}

/// Chart builder shared by the cartesian strategies: caption, margin and label areas.
pub(crate) fn build_chart<'a, DB: DrawingBackend>(
    area: &'a DrawingArea<DB, Shift>,
    frame: &Frame<'_>,
    x: Range<f64>,
    y: Range<f64>,
    right_label_px: u32,
) -> Result<XYChart<'a, DB>> {
    let mut builder = ChartBuilder::on(area);
    builder
        .margin(frame.margin_px())
        .set_label_area_size(LabelAreaPosition::Left, frame.left_label_px(y.start, y.end))
        .set_label_area_size(LabelAreaPosition::Bottom, frame.bottom_label_px());
    if right_label_px > 0 {
        builder.set_label_area_size(LabelAreaPosition::Right, right_label_px);
    }
    if let Some(title) = frame.title {
        builder.caption(title, (FontFamily::SansSerif, CAPTION_FONT_PX));
    }
    builder
        .build_cartesian_2d(x, y)
        .map_err(|e| anyhow!("{:?}", e))
}

/// Axes, grid and tick labels. Value ticks use the frame's locale.
pub(crate) fn draw_mesh<DB: DrawingBackend>(
    chart: &mut XYChart<'_, DB>,
    frame: &Frame<'_>,
    x_desc: &str,
    y_desc: &str,
    x_labels: usize,
    x_fmt: &dyn Fn(&f64) -> String,
) -> Result<()> {
    let locale = frame.locale;
    let y_fmt = move |v: &f64| format_tick(*v, locale);
    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc(y_desc)
        .x_labels(x_labels)
        .y_labels(Y_LABELS)
        .x_label_formatter(x_fmt)
        .y_label_formatter(&y_fmt)
        .light_line_style(RGBColor(235, 235, 235))
        .label_style((FontFamily::SansSerif, LABEL_FONT_PX))
        .axis_desc_style((FontFamily::SansSerif, DESC_FONT_PX))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))
}

pub(crate) fn draw_legend<'a, DB: DrawingBackend + 'a>(chart: &mut XYChart<'a, DB>) -> Result<()> {
    chart
        .configure_series_labels()
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.85))
        .label_font((FontFamily::SansSerif, LABEL_FONT_PX))
        .draw()
        .map_err(|e| anyhow!("{:?}", e))
}
