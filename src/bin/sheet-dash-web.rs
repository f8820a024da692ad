use anyhow::Result;
use clap::Parser;
use sheet_dash::web::{self, DEFAULT_ADDR, DEFAULT_MAX_UPLOAD_MB, ServerConfig};
use std::net::SocketAddr;

#[derive(Parser, Debug)]
#[command(
    name = "sheet-dash-web",
    version,
    about = "Upload a workbook in the browser and see its sheets as a chart dashboard"
)]
struct Cli {
    /// Address to listen on.
    #[arg(long, default_value = DEFAULT_ADDR)]
    addr: SocketAddr,
    /// Largest accepted upload in MiB.
    #[arg(long, default_value_t = DEFAULT_MAX_UPLOAD_MB)]
    max_upload_mb: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let config = ServerConfig {
        max_upload_bytes: cli.max_upload_mb.saturating_mul(1024 * 1024),
    };
    web::serve(cli.addr, config).await?;
    Ok(())
}
