// ABOUTME: Server bootstrap wiring configuration, store, cache, and router together
// ABOUTME: Binds the HTTP listener and serves until a shutdown signal arrives
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Catalog Admin Contributors

use std::future;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};

use crate::cache::{CacheProvider, RedisCache};
use crate::config::ServerConfig;
use crate::database::{CatalogStore, SqliteCatalogStore};
use crate::errors::{AppError, AppResult};
use crate::resources::ServerResources;
use crate::routes::build_router;

/// Connect collaborators described by `config`
///
/// An absent `REDIS_URL` yields no cache. A configured but unreachable
/// Redis is a startup error rather than a silent downgrade.
///
/// # Errors
///
/// Returns an error if the catalog store or a configured cache cannot be reached
pub async fn build_resources(config: &ServerConfig) -> AppResult<ServerResources> {
    let store = SqliteCatalogStore::connect(&config.database_url)
        .await
        .map_err(|e| AppError::config("Catalog store unavailable").with_internal(e.to_string()))?;
    let store: Arc<dyn CatalogStore> = Arc::new(store);

    let cache: Option<Arc<dyn CacheProvider>> = match config.redis_url.as_deref() {
        Some(url) => {
            let cache = RedisCache::connect(url).await.map_err(|e| {
                AppError::config("Configured cache unavailable").with_internal(e.to_string())
            })?;
            let cache: Arc<dyn CacheProvider> = Arc::new(cache);
            Some(cache)
        }
        None => {
            warn!("REDIS_URL not set; cache flush will report unavailable");
            None
        }
    };

    if !config.require_auth_for_cache_clear {
        warn!("Cache clear endpoint is not behind the admin guard");
    }

    Ok(ServerResources::from_config(config, store, cache))
}

/// Run the HTTP server until Ctrl-C or SIGTERM
///
/// # Errors
///
/// Returns an error if startup wiring fails or the listener cannot bind
pub async fn run(config: ServerConfig) -> AppResult<()> {
    let resources = Arc::new(build_resources(&config).await?);
    let app = build_router(resources);

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.http_port));
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::config(format!("Failed to bind {addr}")).with_internal(e.to_string()))?;

    info!(%addr, "Catalog admin server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal("HTTP server failed").with_internal(e.to_string()))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl-C handler");
            future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
