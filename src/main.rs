//! Image fixture server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Browser under test
//!     ──────────────────▶ net listener ──▶ http server ──▶ fixture::image
//!                                           │  request ID      │ read green.png
//!                                           │  tracing         │ query → headers
//!     ◀────────────────── WireResponse ◀────┘  timeout    ◀────┘
//!
//!     config (TOML + CLI) ─▶ validation ─▶ HttpServer::new
//!     lifecycle: Ctrl+C / SIGTERM ─▶ graceful shutdown
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use image_fixture::config::{load_or_default, validate_config, ConfigError};
use image_fixture::http::HttpServer;
use image_fixture::lifecycle::Shutdown;
use image_fixture::observability::init_logging;

#[derive(Parser)]
#[command(name = "image-fixture")]
#[command(about = "Serve a PNG with query-controlled CORP/CORS headers", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overriding `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,

    /// Fixture directory, overriding `fixture.resource_dir`.
    #[arg(short, long)]
    resources: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_or_default(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if let Some(resources) = cli.resources {
        config.fixture.resource_dir = resources;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        route = %config.fixture.route,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
