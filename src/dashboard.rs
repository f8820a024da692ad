//! Dashboard assembly: sheet selection, dispatch in dashboard order, the
//! two-column grid and the HTML page shared by the web UI and the CLI.

use crate::dispatch::{self, ChartCategory, SheetOutcome};
use crate::error::Result;
use crate::models::{Table, Workbook};
use crate::options::{self, DisplayOptions};
use handlebars::Handlebars;
use log::info;
use serde::Serialize;

pub const PAGE_TITLE: &str = "Spreadsheet chart dashboard";
pub const INSTRUCTIONS: &str =
    "Upload an Excel workbook (.xlsx) with the form on the left to build the dashboard.";
pub const COMPLETION_MESSAGE: &str = "Dashboard rendering complete!";
pub const ADJUST_HINT: &str = "Adjust display options or the sheet selection in the sidebar if needed.";

const GRID_COLUMNS: usize = 2;
const TEMPLATE: &str = include_str!("../templates/dashboard.hbs");

/// Which sheets to render. Every sheet is selected unless the user narrowed it down.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SheetSelection {
    #[default]
    All,
    Only(Vec<String>),
}

impl SheetSelection {
    pub fn includes(&self, name: &str) -> bool {
        match self {
            SheetSelection::All => true,
            SheetSelection::Only(names) => names.iter().any(|n| n == name),
        }
    }
}

/// A sheet as listed in the sidebar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SheetEntry {
    pub name: String,
    pub category: Option<ChartCategory>,
    pub selected: bool,
}

/// One grid cell: the sheet's outcome, plus the read error if the sheet could not be loaded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub sheet: String,
    pub read_error: Option<String>,
    pub outcome: SheetOutcome,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dashboard {
    /// All sheets in dashboard order.
    pub sheets: Vec<SheetEntry>,
    /// Selected sheets in dashboard order.
    pub panels: Vec<Panel>,
}

impl Dashboard {
    /// Dispatch every selected sheet, sequentially, in dashboard order.
    pub fn build(workbook: &Workbook, selection: &SheetSelection, options: &DisplayOptions) -> Self {
        let ordered = dispatch::dashboard_order(&workbook.sheet_names());
        let sheets: Vec<SheetEntry> = ordered
            .iter()
            .map(|name| SheetEntry {
                name: name.clone(),
                category: ChartCategory::from_sheet_name(name),
                selected: selection.includes(name),
            })
            .collect();

        let empty = Table::default();
        let panels: Vec<Panel> = sheets
            .iter()
            .filter(|s| s.selected)
            .filter_map(|s| workbook.sheet(&s.name))
            .map(|ws| match &ws.content {
                Ok(table) => Panel {
                    sheet: ws.name.clone(),
                    read_error: None,
                    outcome: dispatch::render(&ws.name, table, options),
                },
                Err(msg) => Panel {
                    sheet: ws.name.clone(),
                    read_error: Some(msg.clone()),
                    outcome: dispatch::render(&ws.name, &empty, options),
                },
            })
            .collect();

        let dashboard = Self { sheets, panels };
        info!(
            "dashboard built: {} rendered, {} skipped, {} failed",
            dashboard.rendered_count(),
            dashboard.skipped_count(),
            dashboard.failed_count()
        );
        dashboard
    }

    /// Panels grouped into grid rows of two.
    pub fn rows(&self) -> impl Iterator<Item = &[Panel]> + '_ {
        self.panels.chunks(GRID_COLUMNS)
    }

    pub fn rendered_count(&self) -> usize {
        self.panels.iter().filter(|p| p.outcome.is_rendered()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.panels
            .iter()
            .filter(|p| matches!(p.outcome, SheetOutcome::Skipped(_)))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.panels
            .iter()
            .filter(|p| matches!(p.outcome, SheetOutcome::Failed(_)))
            .count()
    }

    /// Read errors, skip notices and failures as plain text, in panel order.
    pub fn notices(&self) -> Vec<String> {
        let mut out = Vec::new();
        for panel in &self.panels {
            if let Some(err) = &panel.read_error {
                out.push(read_error_message(&panel.sheet, err));
            }
            match &panel.outcome {
                SheetOutcome::Rendered(_) => {}
                SheetOutcome::Skipped(notice) => out.push(notice.to_string()),
                SheetOutcome::Failed(failure) => out.push(failure.to_string()),
            }
        }
        out
    }
}

fn read_error_message(sheet: &str, err: &str) -> String {
    format!("Error while reading sheet '{}': {}", sheet, err)
}

/// Page-level state next to the dashboard itself.
#[derive(Debug, Clone, Default)]
pub struct PageContext<'a> {
    /// Show the sidebar form (web UI) or only the results (CLI output).
    pub interactive: bool,
    pub file_name: Option<&'a str>,
    /// Upload-level error, e.g. a file that is not a workbook.
    pub upload_error: Option<String>,
}

#[derive(Serialize)]
struct PageView<'a> {
    title: &'static str,
    interactive: bool,
    file_name: Option<&'a str>,
    upload_error: Option<String>,
    options: &'a DisplayOptions,
    height_min: u32,
    height_max: u32,
    height_step: u32,
    opacity_min: f64,
    opacity_max: f64,
    opacity_step: f64,
    instructions: Option<&'static str>,
    sheets: Vec<SheetView<'a>>,
    rows: Vec<Vec<PanelView<'a>>>,
    completion: Option<&'static str>,
    adjust_hint: &'static str,
}

#[derive(Serialize)]
struct SheetView<'a> {
    name: &'a str,
    category: Option<&'static str>,
    selected: bool,
}

#[derive(Serialize)]
struct PanelView<'a> {
    sheet: &'a str,
    read_error: Option<String>,
    svg: Option<&'a str>,
    caption: Option<String>,
    info: Option<String>,
    error: Option<String>,
}

impl<'a> PanelView<'a> {
    fn from_panel(panel: &'a Panel) -> Self {
        let mut view = PanelView {
            sheet: &panel.sheet,
            read_error: panel
                .read_error
                .as_deref()
                .map(|e| read_error_message(&panel.sheet, e)),
            svg: None,
            caption: None,
            info: None,
            error: None,
        };
        match &panel.outcome {
            SheetOutcome::Rendered(chart) => {
                view.svg = Some(&chart.svg);
                view.caption = chart.time_axis.map(|k| k.to_string());
            }
            SheetOutcome::Skipped(notice) => view.info = Some(notice.to_string()),
            SheetOutcome::Failed(failure) => view.error = Some(failure.to_string()),
        }
        view
    }
}

/// Render the full HTML page. Without a dashboard the page carries the upload instructions.
pub fn render_page(
    dashboard: Option<&Dashboard>,
    options: &DisplayOptions,
    ctx: &PageContext<'_>,
) -> Result<String> {
    let view = PageView {
        title: PAGE_TITLE,
        interactive: ctx.interactive,
        file_name: ctx.file_name,
        upload_error: ctx.upload_error.clone(),
        options,
        height_min: options::MIN_HEIGHT_PX,
        height_max: options::MAX_HEIGHT_PX,
        height_step: options::HEIGHT_STEP_PX,
        opacity_min: options::MIN_BUBBLE_OPACITY,
        opacity_max: options::MAX_BUBBLE_OPACITY,
        opacity_step: options::BUBBLE_OPACITY_STEP,
        instructions: dashboard.is_none().then_some(INSTRUCTIONS),
        sheets: dashboard
            .map(|d| {
                d.sheets
                    .iter()
                    .map(|s| SheetView {
                        name: &s.name,
                        category: s.category.map(ChartCategory::display_name),
                        selected: s.selected,
                    })
                    .collect()
            })
            .unwrap_or_default(),
        rows: dashboard
            .map(|d| {
                d.rows()
                    .map(|row| row.iter().map(PanelView::from_panel).collect())
                    .collect()
            })
            .unwrap_or_default(),
        completion: dashboard.map(|_| COMPLETION_MESSAGE),
        adjust_hint: ADJUST_HINT,
    };

    let hb = Handlebars::new();
    Ok(hb.render_template(TEMPLATE, &view)?)
}
