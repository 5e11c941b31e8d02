//! Locale Gateway (v1)
//!
//! A reverse proxy that puts locale routing in front of a web application.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────────┐
//!                         │                  LOCALE GATEWAY                  │
//!                         │                                                  │
//!   Client Request        │  ┌─────────┐   ┌────────────┐   ┌────────────┐   │
//!   ──────────────────────┼─▶│  http   │──▶│  routing   │──▶│   locale   │   │
//!                         │  │ server  │   │ exclusions │   │ dispatcher │   │
//!                         │  └─────────┘   └────────────┘   └─────┬──────┘   │
//!                         │                                       │          │
//!                         │              pass through / rewrite   │ redirect │
//!                         │                     ┌─────────────────┤          │
//!                         │                     ▼                 ▼          │
//!   Client Response       │              ┌────────────┐    ┌────────────┐    │
//!   ◀─────────────────────┼──────────────│  upstream  │    │ 307 + Loc. │    │
//!                         │              │  forward   │    └────────────┘    │
//!                         │              └─────┬──────┘                      │
//!                         └────────────────────┼─────────────────────────────┘
//!                                              ▼
//!                                     Application Server
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use locale_gateway::http::HttpServer;
use locale_gateway::lifecycle::{self, signals, Shutdown};
use locale_gateway::locale::OperatingMode;
use locale_gateway::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "locale-gateway")]
#[command(about = "Locale-routing gateway in front of a web application", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let prepared = lifecycle::prepare(cli.config.as_deref(), OperatingMode::from_env())?;
    let config = prepared.config;

    logging::init(&config.observability);

    tracing::info!("locale-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        mode = %prepared.mode,
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.address,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );
    tracing::info!(
        matcher = %prepared.dispatcher.exclusions().matcher_expression(),
        "Locale dispatch matcher"
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
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    let server = HttpServer::new(config, prepared.dispatcher)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
