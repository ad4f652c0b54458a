//! Exact-match router service.
//!
//! ```text
//!   Client ──▶ request-id ──▶ trace ──▶ timeout ──▶ dispatch ──┬──▶ 405 (method not routable)
//!                                                             ├──▶ 404 (no exact route)
//!                                                             └──▶ execute matched handler
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use exact_router::config::{load_config, ConfigWatcher, RouterConfig};
use exact_router::handlers::HandlerRegistry;
use exact_router::http::HttpServer;
use exact_router::lifecycle::{signals, Shutdown};
use exact_router::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "exact-router")]
#[command(about = "HTTP server dispatching on exact (method, path) routes", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reload routes when the configuration file changes.
    #[arg(short, long, requires = "config")]
    watch: bool,

    /// Validate the configuration and exit.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };

    logging::init(&config.observability.log_level);
    tracing::info!("exact-router v{} starting", env!("CARGO_PKG_VERSION"));

    let registry = HandlerRegistry::with_builtins();
    let server = HttpServer::new(config.clone(), registry)?;

    if cli.check {
        println!(
            "Configuration OK: {} route entries",
            server.routes().snapshot().table().len()
        );
        return Ok(());
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
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

    // Keep the watcher handle alive for the lifetime of the server.
    let (_watcher, config_updates) = match (&cli.config, cli.watch) {
        (Some(path), true) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            (Some(watcher.run()?), updates)
        }
        _ => (None, mpsc::unbounded_channel().1),
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(signals::shutdown_on_signal(shutdown));

    server.run(listener, config_updates, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
