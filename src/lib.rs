//! sheet-dash
//!
//! Turns a pre-shaped spreadsheet workbook into a dashboard of charts. Each
//! worksheet is matched by its name against six chart types and drawn as SVG.
//! The charts are laid out in a two-column grid. Pairs with the `sheet-dash`
//! CLI and the `sheet-dash-web` upload UI.
//!
//! ### Recognized sheet names
//! | Sheet name | Chart | Min. columns |
//! |---|---|---|
//! | `바차트_히스토그램` | grouped bars | 2 |
//! | `시계열차트` | time series | 2 |
//! | `파이차트` | pie | 2 |
//! | `산점도` | scatter | 2 |
//! | `파레토차트` | Pareto | 2 |
//! | `버블차트` | bubble | 3 |
//!
//! Other sheets, sheets with too few columns and sheets without data produce a
//! skip notice instead of a chart. A failing chart never affects its siblings.
//!
//! ### Example
//! ```no_run
//! use sheet_dash::{Dashboard, DisplayOptions, SheetSelection};
//! use sheet_dash::dashboard::{PageContext, render_page};
//!
//! let workbook = sheet_dash::workbook::load_path("report.xlsx")?;
//! let options = DisplayOptions::default();
//! let dashboard = Dashboard::build(&workbook, &SheetSelection::All, &options);
//! for notice in dashboard.notices() {
//!     eprintln!("{notice}");
//! }
//! let html = render_page(Some(&dashboard), &options, &PageContext::default())?;
//! std::fs::write("dashboard.html", html)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod dashboard;
pub mod dispatch;
pub mod error;
pub mod models;
pub mod options;
pub mod stats;
pub mod time_axis;
pub mod viz;
pub mod web;
pub mod workbook;

pub use dashboard::{Dashboard, SheetSelection};
pub use dispatch::{ChartArtifact, ChartCategory, SheetOutcome, SkipNotice, SkipReason};
pub use error::DashError;
pub use models::{Cell, Table, Workbook, Worksheet};
pub use options::DisplayOptions;
