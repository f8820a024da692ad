use thiserror::Error;

/// Errors raised while loading a workbook or building the dashboard page.
///
/// Per-sheet problems are not errors at this level: they become skip notices
/// or render failures on the sheet's dashboard panel.
#[derive(Error, Debug)]
pub enum DashError {
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse workbook: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("workbook contains no sheets")]
    EmptyWorkbook,
    #[error("invalid display options: {0}")]
    Options(#[from] serde_json::Error),
    #[error("failed to render dashboard page: {0}")]
    Template(#[from] handlebars::RenderError),
}

pub type Result<T, E = DashError> = std::result::Result<T, E>;
