//! Process form router (v1)
//!
//! Serves `{context}{servlet}/process/...`, `/processInstance/...` and
//! `/taskInstance/...` and sends each request to the right form.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http server ──▶ session middleware ──▶ form handler
//!                      (request id,                            │
//!                       trace, timeout)                        ▼
//!                                                   ┌──────────────────────┐
//!                                                   │      FormRouter      │
//!                                                   │ parse → resolve ids  │
//!                                                   │ → authorize → form   │
//!                                                   └───┬──────────────┬───┘
//!                                                       │              │
//!                                          ProcessFormService    PageRenderer
//!                                           (catalog / engine)   (custom pages)
//!                                                       │
//!     Client Response ◀── 302 legacy / external, rendered page, or 4xx/5xx
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use process_form_router::config::{load_config, RouterConfig};
use process_form_router::observability::{logging, metrics};
use process_form_router::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "process-form-router")]
#[command(about = "Routes portal form requests to legacy forms, custom pages or external pages", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);

    tracing::info!("process-form-router v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        mount = %config.portal.mount_path(),
        processes = config.catalog.processes.len(),
        sessions = config.session.sessions.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
