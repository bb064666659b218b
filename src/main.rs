//! TLS Static File Server
//!
//! A TLS-terminating static file server built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌───────────────────────────────────────────────┐
//!                        │              STATIC FILE SERVER               │
//!                        │                                               │
//!   Client (HTTPS)       │  ┌─────────┐   ┌─────────┐   ┌────────────┐  │
//!   ─────────────────────┼─▶│   net   │──▶│  http   │──▶│  content   │  │
//!                        │  │ listener│   │ server  │   │ resolve /  │  │
//!                        │  │  + tls  │   │ (axum)  │   │  listing   │  │
//!                        │  └─────────┘   └─────────┘   └─────┬──────┘  │
//!                        │                                    │         │
//!   Client Response      │                                    ▼         │
//!   ◀────────────────────┼───────────────────────────  filesystem root  │
//!                        │                                               │
//!                        │  ┌─────────────────────────────────────────┐  │
//!                        │  │          Cross-Cutting Concerns         │  │
//!                        │  │  ┌────────┐  ┌───────────────────────┐  │  │
//!                        │  │  │ config │  │ tracing + in-flight   │  │  │
//!                        │  │  │        │  │ request limit         │  │  │
//!                        │  │  └────────┘  └───────────────────────┘  │  │
//!                        │  └─────────────────────────────────────────┘  │
//!                        └───────────────────────────────────────────────┘
//! ```
//!
//! Startup is fail-fast: a bad bind address, a missing certificate file or
//! unparseable PEM terminates the process with a non-zero status. After
//! startup the server runs until externally terminated.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tls_fileserver::config::{load_config, ServerConfig};
use tls_fileserver::http::HttpServer;
use tls_fileserver::net;

#[derive(Parser)]
#[command(name = "tls-fileserver")]
#[command(about = "HTTPS static file server", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tls_fileserver=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("tls-fileserver v0.1.0 starting");

    let cli = Cli::parse();
    let config = match cli.config {
        Some(path) => load_config(&path)?,
        None => ServerConfig::default(),
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        cert_path = %config.tls.cert_path,
        key_path = %config.tls.key_path,
        root = %config.content.root,
        "Configuration loaded"
    );

    let listener = net::bind(&config.listener)?;
    let tls = net::load_tls_config(&config.tls).await?;

    let server = HttpServer::new(config);
    server.run(listener, tls).await?;

    Ok(())
}
