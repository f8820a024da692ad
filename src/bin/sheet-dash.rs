use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use sheet_dash::dashboard::{COMPLETION_MESSAGE, PageContext, render_page};
use sheet_dash::{ChartCategory, Dashboard, DisplayOptions, SheetSelection, dispatch, stats, workbook};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sheet-dash",
    version,
    about = "Draw every recognized sheet of a workbook as a chart dashboard"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the sheets in dashboard order with their chart type and shape.
    Sheets(SheetsArgs),
    /// Render the dashboard page to HTML.
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct SheetsArgs {
    /// Workbook file (.xlsx, .xlsm, .xls, .xlsb, .ods or .csv).
    workbook: PathBuf,
    /// Print per-column statistics for every readable sheet.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Workbook file (.xlsx, .xlsm, .xls, .xlsb, .ods or .csv).
    workbook: PathBuf,
    /// Write the page here instead of stdout.
    #[arg(short, long)]
    out: Option<PathBuf>,
    /// Render only this sheet (repeatable). Default: all sheets.
    #[arg(long = "sheet")]
    sheets: Vec<String>,
    /// Display options as JSON; flags given on the command line win.
    #[arg(long)]
    options: Option<PathBuf>,
    /// Hide chart titles.
    #[arg(long, default_value_t = false)]
    no_titles: bool,
    /// Use roomy margins instead of the tight layout.
    #[arg(long, default_value_t = false)]
    loose_layout: bool,
    /// Chart height in pixels (250-900).
    #[arg(long)]
    height: Option<u32>,
    /// Bubble fill opacity (0.1-1.0).
    #[arg(long)]
    bubble_opacity: Option<f64>,
    /// Locale for value tick labels (e.g., en, de, ko).
    #[arg(long)]
    locale: Option<String>,
}

impl RenderArgs {
    fn display_options(&self) -> Result<DisplayOptions> {
        let mut opts = match &self.options {
            Some(path) => DisplayOptions::from_json_file(path)?,
            None => DisplayOptions::default(),
        };
        if self.no_titles {
            opts.show_titles = false;
        }
        if self.loose_layout {
            opts.tight_layout = false;
        }
        if let Some(h) = self.height {
            opts.height_px = h;
        }
        if let Some(a) = self.bubble_opacity {
            opts.bubble_opacity = a;
        }
        if let Some(l) = &self.locale {
            opts.locale = l.clone();
        }
        Ok(opts.clamped())
    }
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 4 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Sheets(args) => cmd_sheets(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn cmd_sheets(args: SheetsArgs) -> Result<()> {
    let wb = workbook::load_path(&args.workbook)?;
    for name in dispatch::dashboard_order(&wb.sheet_names()) {
        let Some(sheet) = wb.sheet(&name) else {
            continue;
        };
        let kind = ChartCategory::from_sheet_name(&name)
            .map(ChartCategory::display_name)
            .unwrap_or("-");
        match &sheet.content {
            Ok(table) => {
                println!(
                    "{}\t{}\t{} rows x {} columns",
                    name,
                    kind,
                    table.row_count(),
                    table.column_count()
                );
                if args.stats {
                    for s in stats::column_summaries(table) {
                        println!(
                            "  {}  count={} missing={}  min={} max={} mean={} median={}",
                            s.column,
                            s.count,
                            s.missing,
                            fmt_opt(s.min),
                            fmt_opt(s.max),
                            fmt_opt(s.mean),
                            fmt_opt(s.median)
                        );
                    }
                }
            }
            Err(e) => println!("{}\t{}\tunreadable: {}", name, kind, e),
        }
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> Result<()> {
    let options = args.display_options()?;
    let wb = workbook::load_path(&args.workbook)?;
    let selection = if args.sheets.is_empty() {
        SheetSelection::All
    } else {
        SheetSelection::Only(args.sheets.clone())
    };

    let dashboard = Dashboard::build(&wb, &selection, &options);
    for notice in dashboard.notices() {
        eprintln!("{}", notice);
    }

    let file_name = args.workbook.file_name().and_then(|n| n.to_str());
    let ctx = PageContext {
        interactive: false,
        file_name,
        upload_error: None,
    };
    let html = render_page(Some(&dashboard), &options, &ctx)?;
    match args.out.as_ref() {
        Some(path) => {
            std::fs::write(path, html)?;
            eprintln!(
                "Wrote {} chart(s) to {}",
                dashboard.rendered_count(),
                path.display()
            );
        }
        None => print!("{}", html),
    }
    eprintln!("{}", COMPLETION_MESSAGE);
    Ok(())
}
