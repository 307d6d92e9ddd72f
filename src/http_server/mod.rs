//! # Wordbank HTTP Server Module
//!
//! Combines the versioned word routers into one Axum server.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/v1/*` - Legacy word API
//! - `/api/v2/*` - Paginated word API

pub mod config;
pub mod observability_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use server::{HttpServer, ServerError};
