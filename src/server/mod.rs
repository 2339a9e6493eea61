use crate::config::Config;
use crate::images::ImageStorage;
use anyhow::{Context, Result};
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tower_http::trace::TraceLayer;

pub mod response;
pub mod routes_images;

/// Shared application context
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub storage: Arc<ImageStorage>,
}

impl AppContext {
    pub fn new(config: Config) -> Self {
        let storage = ImageStorage::from_config(&config.storage);
        Self {
            config: Arc::new(config),
            storage: Arc::new(storage),
        }
    }
}

/// Create the Axum router with all routes
pub fn create_router(ctx: AppContext) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        .merge(routes_images::image_routes(
            ctx.config.storage.max_upload_bytes,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

async fn health_check() -> &'static str {
    "ok"
}

/// Start the HTTP server
pub async fn start_server(config: Config) -> Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let image_dir = &config.storage.image_dir;
    if config.storage.create_dir {
        tokio::fs::create_dir_all(image_dir)
            .await
            .with_context(|| format!("Failed to create image directory: {:?}", image_dir))?;
    }
    tracing::info!("Storing images in {:?}", image_dir);

    let ctx = AppContext::new(config);
    let app = create_router(ctx);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                tracing::error!("Failed to install Ctrl+C handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
