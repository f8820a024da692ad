//! Shared drawing parameters for the chart strategies.

use crate::options::DisplayOptions;
use crate::time_axis::TimeAxisKind;
use num_format::Locale;

use super::util::{compute_left_label_area_px, map_locale};

pub const CAPTION_FONT_PX: u32 = 18;
pub const LABEL_FONT_PX: u32 = 12;
pub const DESC_FONT_PX: u32 = 13;
pub const Y_LABELS: usize = 8;

/// Everything a strategy needs besides the table: title, layout and formatting.
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    /// Chart caption; `None` when titles are switched off.
    pub title: Option<&'a str>,
    pub tight: bool,
    pub width: u32,
    pub height: u32,
    pub bubble_opacity: f64,
    pub locale: &'static Locale,
}

impl<'a> Frame<'a> {
    pub fn new(sheet_name: &'a str, options: &DisplayOptions, width: u32) -> Self {
        Self {
            title: options.show_titles.then_some(sheet_name),
            tight: options.tight_layout,
            width,
            height: options.height_px,
            bubble_opacity: options.bubble_opacity,
            locale: map_locale(&options.locale),
        }
    }

    pub fn margin_px(&self) -> u32 {
        if self.tight { 8 } else { 24 }
    }

    pub fn bottom_label_px(&self) -> u32 {
        if self.tight { 44 } else { 60 }
    }

    pub fn left_label_px(&self, ymin: f64, ymax: f64) -> u32 {
        if self.tight {
            compute_left_label_area_px(ymin, ymax, Y_LABELS, LABEL_FONT_PX, self.locale)
        } else {
            110
        }
    }

    /// Rough width of the plotting area, used to size category tick labels.
    pub fn plot_width_px(&self, left_label_px: u32, right_label_px: u32) -> u32 {
        self.width
            .saturating_sub(left_label_px + right_label_px + 2 * self.margin_px())
            .max(40)
    }
}

/// SVG markup of one chart plus its pixel size.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    pub svg: String,
    pub width: u32,
    pub height: u32,
    /// Set by the time-series strategy only.
    pub time_axis: Option<TimeAxisKind>,
}
