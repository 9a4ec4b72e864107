//! DomScout web host.
//!
//! Serves the built client and answers every client-side route with the
//! index document.
//!
//! ```text
//!   Browser ──▶ /api/routes*          ──▶ route table as JSON
//!          ──▶ /<base>/<static file>  ──▶ file from static_dir
//!          ──▶ /<base>/<anything>     ──▶ index.html (+ x-route-name)
//! ```

use std::path::PathBuf;

use clap::Parser;

use domscout_router::config::{load_config, validate_config, AppConfig, ConfigError};
use domscout_router::lifecycle;
use domscout_router::observability::init_logging;

#[derive(Parser)]
#[command(name = "domscout-web")]
#[command(about = "Serve the DomScout client with history-mode routing", long_about = None)]
struct Args {
    /// TOML configuration file; watched for route table changes.
    #[arg(short, long, env = "DOMSCOUT_CONFIG")]
    config: Option<PathBuf>,

    /// Override server.bind_address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override router.base_path.
    #[arg(long, env = "BASE_URL")]
    base_path: Option<String>,

    /// Override server.static_dir.
    #[arg(long)]
    static_dir: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.server.bind_address = bind;
    }
    if let Some(base) = args.base_path {
        config.router.base_path = base;
    }
    if let Some(dir) = args.static_dir {
        config.server.static_dir = dir;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    init_logging(&config.observability.log_level);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.server.bind_address,
        base_path = %config.router.base_path,
        revision = %config.router.revision,
        "domscout-web starting"
    );

    lifecycle::start(config, args.config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
