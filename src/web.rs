//! Web UI: upload form, multipart upload and the dashboard page.
//!
//! The server is stateless. Each upload request carries the workbook and the
//! display options; parsing and rendering run on the blocking pool.

use crate::dashboard::{Dashboard, PageContext, SheetSelection, render_page};
use crate::error::Result;
use crate::options::DisplayOptions;
use crate::workbook;
use axum::{
    Router,
    extract::{DefaultBodyLimit, Multipart},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use log::{error, info, warn};
use std::net::SocketAddr;
use tokio::net::TcpListener;

pub const DEFAULT_ADDR: &str = "127.0.0.1:8501";
pub const DEFAULT_MAX_UPLOAD_MB: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_MB * 1024 * 1024,
        }
    }
}

pub fn router(config: ServerConfig) -> Router {
    Router::new()
        .route("/", get(serve_landing))
        .route("/dashboard", get(serve_landing).post(upload_workbook))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
}

pub async fn serve(addr: SocketAddr, config: ServerConfig) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router(config)).await?;
    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

async fn serve_landing() -> Response {
    page_response(
        StatusCode::OK,
        render_page(None, &DisplayOptions::default(), &interactive(None, None)),
    )
}

/// Fields of the sidebar form.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UploadForm {
    pub file_name: Option<String>,
    pub workbook: Vec<u8>,
    pub show_titles: bool,
    pub tight_layout: bool,
    pub height: Option<u32>,
    pub bubble_opacity: Option<f64>,
    pub sheets: Vec<String>,
    pub sheets_listed: bool,
}

impl UploadForm {
    /// Options from the form. Unchecked checkboxes are absent from a submitted
    /// form, so they only count as "off" when the rest of the form came along.
    pub fn options(&self) -> DisplayOptions {
        let defaults = DisplayOptions::default();
        let submitted = self.height.is_some() || self.bubble_opacity.is_some();
        DisplayOptions {
            show_titles: if submitted { self.show_titles } else { defaults.show_titles },
            tight_layout: if submitted { self.tight_layout } else { defaults.tight_layout },
            height_px: self.height.unwrap_or(defaults.height_px),
            bubble_opacity: self.bubble_opacity.unwrap_or(defaults.bubble_opacity),
            locale: defaults.locale,
        }
        .clamped()
    }

    pub fn selection(&self) -> SheetSelection {
        if self.sheets_listed {
            SheetSelection::Only(self.sheets.clone())
        } else {
            SheetSelection::All
        }
    }
}

async fn read_form(multipart: &mut Multipart) -> std::result::Result<UploadForm, (StatusCode, String)> {
    let mut form = UploadForm::default();
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err((e.status(), e.body_text())),
        };
        let name = field.name().unwrap_or_default().to_string();
        if name == "workbook" {
            form.file_name = field.file_name().map(str::to_string);
            form.workbook = field
                .bytes()
                .await
                .map_err(|e| (e.status(), e.body_text()))?
                .to_vec();
            continue;
        }
        let value = field.text().await.map_err(|e| (e.status(), e.body_text()))?;
        match name.as_str() {
            "show_titles" => form.show_titles = true,
            "tight_layout" => form.tight_layout = true,
            "height" => form.height = value.trim().parse().ok(),
            "bubble_opacity" => form.bubble_opacity = value.trim().parse().ok(),
            "sheet" => form.sheets.push(value),
            "sheets_listed" => form.sheets_listed = true,
            other => warn!("ignoring unknown form field '{}'", other),
        }
    }
    Ok(form)
}

async fn upload_workbook(mut multipart: Multipart) -> Response {
    let form = match read_form(&mut multipart).await {
        Ok(form) => form,
        Err((status, message)) => {
            warn!("rejected upload: {}", message);
            let ctx = PageContext {
                upload_error: Some(format!("Upload failed: {}", message)),
                ..interactive(None, None)
            };
            return page_response(status, render_page(None, &DisplayOptions::default(), &ctx));
        }
    };

    match tokio::task::spawn_blocking(move || build_page(form)).await {
        Ok((status, page)) => page_response(status, page),
        Err(e) => {
            error!("dashboard task failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "dashboard rendering failed").into_response()
        }
    }
}

/// Parse the uploaded workbook and render the page. Runs on the blocking pool.
pub fn build_page(form: UploadForm) -> (StatusCode, Result<String>) {
    let options = form.options();
    let selection = form.selection();
    let UploadForm {
        file_name,
        workbook: bytes,
        ..
    } = form;

    if bytes.is_empty() {
        return (
            StatusCode::OK,
            render_page(None, &options, &interactive(None, None)),
        );
    }

    match workbook::load_bytes(bytes, file_name.as_deref()) {
        Ok(wb) => {
            let dashboard = Dashboard::build(&wb, &selection, &options);
            let ctx = interactive(file_name.as_deref(), None);
            (StatusCode::OK, render_page(Some(&dashboard), &options, &ctx))
        }
        Err(e) => {
            warn!("upload could not be parsed: {}", e);
            let ctx = interactive(file_name.as_deref(), Some(e.to_string()));
            (StatusCode::BAD_REQUEST, render_page(None, &options, &ctx))
        }
    }
}

fn interactive(file_name: Option<&str>, upload_error: Option<String>) -> PageContext<'_> {
    PageContext {
        interactive: true,
        file_name,
        upload_error,
    }
}

fn page_response(status: StatusCode, page: Result<String>) -> Response {
    match page {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            error!("page rendering failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "page rendering failed").into_response()
        }
    }
}
