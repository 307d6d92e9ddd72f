//! # HTTP Server
//!
//! Main HTTP server combining the health route and both API versions.

use std::net::SocketAddr;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::config::HttpServerConfig;
use super::observability_routes::health_routes;
use crate::rest_api::wrapper::panic_response;
use crate::rest_api::{v1, v2, AppState};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid socket address {addr}: {source}")]
    InvalidAddress {
        addr: String,
        source: std::net::AddrParseError,
    },

    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// HTTP server for the word API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over `state`
    pub fn new(config: HttpServerConfig, state: AppState) -> Self {
        let router = Self::build_router(&config, state);
        Self { config, router }
    }

    /// Build the combined router
    fn build_router(config: &HttpServerConfig, state: AppState) -> Router {
        // v2 brings its own panic boundary and permissive CORS. The
        // configured layer wraps only the root and v1 routes, outside their
        // panic boundary so a 500 still carries CORS headers.
        let legacy = Router::new()
            .merge(health_routes())
            .nest("/api/v1", v1::routes(state.clone()))
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(Self::cors_layer(config));

        Router::new()
            .merge(legacy)
            .nest("/api/v2", v2::routes(state))
            .layer(TraceLayer::new_for_http())
    }

    fn cors_layer(config: &HttpServerConfig) -> CorsLayer {
        let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);
        match config.allowed_origins() {
            Some(origins) => cors.allow_origin(AllowOrigin::list(origins)),
            None => cors.allow_origin(Any),
        }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until ctrl-c
    pub async fn start(self) -> Result<(), ServerError> {
        let raw = self.config.socket_addr();
        let addr: SocketAddr = raw
            .parse()
            .map_err(|source| ServerError::InvalidAddress { addr: raw, source })?;

        let listener = TcpListener::bind(addr).await?;
        tracing::info!(%addr, "wordbank listening");
        tracing::info!("health check: http://{}/health", addr);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
