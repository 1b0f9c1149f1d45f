// ABOUTME: Server binary for the catalog admin control plane
// ABOUTME: Loads environment configuration, applies CLI overrides, and serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Catalog Admin Contributors

//! # Catalog Admin Server
//!
//! ```bash
//! SESSION_JWT_SECRET=... cargo run --bin catalog-admin-server
//!
//! # Override port and database
//! cargo run --bin catalog-admin-server -- --port 9000 --database-url sqlite:./data/catalog.db
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::info;

use catalog_admin_server::config::{LogFormat, ServerConfig};
use catalog_admin_server::{logging, server};

#[derive(Parser)]
#[command(
    name = "catalog-admin-server",
    about = "Catalog admin control plane",
    long_about = "Serves guarded admin statistics, category listings, and cache maintenance"
)]
struct ServerArgs {
    /// HTTP port override
    #[arg(long)]
    port: Option<u16>,

    /// Database URL override
    #[arg(long)]
    database_url: Option<String>,

    /// Emit JSON logs regardless of `LOG_FORMAT`
    #[arg(long)]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = ServerArgs::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.port {
        config.http_port = port;
    }
    if let Some(database_url) = args.database_url {
        config.database_url = database_url;
    }
    if args.json_logs {
        config.log_format = LogFormat::Json;
    }

    logging::init(config.log_format)?;
    info!(?config, "Starting catalog admin server");

    server::run(config).await?;
    Ok(())
}
