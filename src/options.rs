//! Display options shared by every chart of one dashboard render.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const MIN_HEIGHT_PX: u32 = 250;
pub const MAX_HEIGHT_PX: u32 = 900;
pub const DEFAULT_HEIGHT_PX: u32 = 360;
pub const HEIGHT_STEP_PX: u32 = 10;

pub const MIN_BUBBLE_OPACITY: f64 = 0.1;
pub const MAX_BUBBLE_OPACITY: f64 = 1.0;
pub const DEFAULT_BUBBLE_OPACITY: f64 = 0.6;
pub const BUBBLE_OPACITY_STEP: f64 = 0.05;

/// Session-scoped chart options: title visibility, layout tightness,
/// pixel height, bubble transparency and tick-label locale.
///
/// Missing fields take their defaults, so `{}` is a valid options file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    pub show_titles: bool,
    pub tight_layout: bool,
    pub height_px: u32,
    pub bubble_opacity: f64,
    /// Locale tag for value tick labels (`"en"`, `"de"`, ...).
    pub locale: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_titles: true,
            tight_layout: true,
            height_px: DEFAULT_HEIGHT_PX,
            bubble_opacity: DEFAULT_BUBBLE_OPACITY,
            locale: "en".to_string(),
        }
    }
}

impl DisplayOptions {
    /// Pull height and opacity into their allowed ranges.
    pub fn clamped(mut self) -> Self {
        self.height_px = self.height_px.clamp(MIN_HEIGHT_PX, MAX_HEIGHT_PX);
        self.bubble_opacity = if self.bubble_opacity.is_finite() {
            self.bubble_opacity
                .clamp(MIN_BUBBLE_OPACITY, MAX_BUBBLE_OPACITY)
        } else {
            DEFAULT_BUBBLE_OPACITY
        };
        if self.locale.trim().is_empty() {
            self.locale = "en".to_string();
        }
        self
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let opts: DisplayOptions = serde_json::from_str(s)?;
        Ok(opts.clamped())
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}
