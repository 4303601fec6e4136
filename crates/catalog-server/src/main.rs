//! Catalog Server
//!
//! HTTP service exposing create/read/update/delete operations over an
//! in-memory product collection.

mod config;
mod error;
mod handlers;
mod response;
mod storage;

use anyhow::{Context, Result};
use axum::{extract::DefaultBodyLimit, routing::any, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use config::{ServerConfig, StatusPolicy};
use storage::ProductStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ProductStore>,
    pub policy: StatusPolicy,
}

#[tokio::main]
async fn main() {
    install_panic_hook();

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("[FATAL] {:#}", e);
            std::process::exit(1);
        }
    };

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting Catalog Server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server(config).await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

/// Report panics through tracing as well as stderr
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_else(|| "unknown location".to_string());
        let message = info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        eprintln!("[PANIC] {}: {}", location, message);
        error!(%location, "panic: {}", message);
    }));
}

async fn run_server(config: ServerConfig) -> Result<()> {
    info!(
        "Config loaded: bind={}, policy={:?}, seed={}",
        config.bind_address, config.status_policy, config.seed
    );

    let store = if config.seed {
        ProductStore::seeded()
    } else {
        ProductStore::new()
    };
    if store.is_empty() {
        warn!("Product store starts empty, seeding disabled");
    } else {
        info!("Product store initialized with {} products", store.len());
    }

    let state = AppState {
        store: Arc::new(store),
        policy: config.status_policy,
    };
    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Server listening on {}", addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Build the router. Every route accepts any method; handlers enforce their own.
/// Request bodies are not size limited.
pub fn build_router(state: AppState) -> Router {
    let fallback = match state.policy {
        // `/` doubles as the catch-all for unmatched paths
        StatusPolicy::Legacy => any(handlers::root),
        StatusPolicy::Corrected => any(handlers::not_found),
    };

    Router::new()
        .route("/", any(handlers::root))
        .route("/get-products", any(handlers::products::list))
        .route("/get-product", any(handlers::products::get))
        .route("/delete-products", any(handlers::products::delete))
        .route("/add-products", any(handlers::products::add))
        .route("/update-products", any(handlers::products::update))
        .fallback(fallback)
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_failure_is_fatal() {
        let taken = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = taken.local_addr().unwrap();

        let config = ServerConfig {
            bind_address: addr.to_string(),
            status_policy: StatusPolicy::Legacy,
            seed: true,
            log_level: "info".to_string(),
        };

        let err = run_server(config).await.unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to bind"));
    }
}
