//! Merge-and-echo server.
//!
//! ```text
//!     Client ──POST /echo──▶ ┌──────────────────────────────────────────┐
//!                            │ request id → trace → timeout → body limit │
//!                            │                  │                        │
//!                            │                  ▼                        │
//!                            │  EchoTarget { value, formatter }          │
//!                            │        merge(body) → invoke(formatter)    │
//!     Client ◀──JSON──────── └──────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use merge_echo::config::{load_config, validate_config, ConfigError, ServerConfig};
use merge_echo::http::HttpServer;
use merge_echo::lifecycle::Shutdown;
use merge_echo::observability::{logging, metrics};

#[derive(Parser, Debug)]
#[command(author, version, about = "HTTP server that deep-merges JSON bodies and echoes a value")]
struct Args {
    /// TOML configuration file. Built-in defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init_logging(&config.observability);

    tracing::info!("merge-echo v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config_file = ?args.config,
        bind_address = %config.listener.bind_address,
        merge_mode = ?config.echo.merge_mode,
        max_body_bytes = config.limits.max_body_bytes,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    shutdown.trigger_on_signal();

    HttpServer::new(config).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
