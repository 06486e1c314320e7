//! Axum server setup
//!
//! Server skeleton with:
//! - CORS allow-list (local dev origins + one configurable frontend)
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::error::ApiError;
use super::routes;
use crate::db::{ensure_schema, DbError};

/// Origins always allowed to call the API (local frontend dev servers)
pub const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:3000", "http://localhost:3001"];

/// Frontend origin value meaning "any origin"
pub const ANY_ORIGIN: &str = "*";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:8000)
    pub bind_addr: SocketAddr,

    /// Extra allowed frontend origin, or `*` for any origin
    pub frontend_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            frontend_url: ANY_ORIGIN.to_owned(),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}

/// Build the CORS layer for the configured frontend origin.
///
/// Credentials are allowed, which rules out literal `*` responses, so
/// the wildcard case echoes the caller's origin, methods and headers.
pub fn cors_layer(frontend_url: &str) -> Result<CorsLayer, ServerError> {
    let frontend_url = frontend_url.trim();

    let origin = if frontend_url == ANY_ORIGIN {
        tracing::warn!("CORS: FRONTEND_URL is '*', any origin allowed");
        AllowOrigin::mirror_request()
    } else {
        let mut origins: Vec<HeaderValue> = DEFAULT_ALLOWED_ORIGINS
            .into_iter()
            .map(HeaderValue::from_static)
            .collect();
        let frontend = HeaderValue::from_str(frontend_url)
            .map_err(|_| ServerError::InvalidOrigin(frontend_url.to_owned()))?;
        origins.push(frontend);
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

/// Build the application router with all routes.
pub fn build_router(pool: PgPool, config: &ServerConfig) -> Result<Router, ServerError> {
    let cors = cors_layer(&config.frontend_url)?;
    let state = AppState { pool };

    Ok(Router::new()
        .merge(routes::health::router())
        .merge(routes::todos::router())
        .fallback(route_not_found)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(Arc::new(state)))
}

/// Fallback for paths no route matches
async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}

/// Run the HTTP server.
///
/// Ensures the schema exists before binding, then serves until a
/// shutdown signal arrives.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&database_url).await?;
/// let config = ServerConfig::default();
/// run_server(pool, config).await?;
/// ```
pub async fn run_server(pool: PgPool, config: ServerConfig) -> Result<(), ServerError> {
    ensure_schema(&pool).await?;

    let app = build_router(pool, &config)?;

    // Bind listener
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    // Run with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("schema setup failed: {0}")]
    Schema(#[from] DbError),

    #[error("invalid frontend origin: '{0}'")]
    InvalidOrigin(String),
}
