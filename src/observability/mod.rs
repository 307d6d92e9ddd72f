//! Observability subsystem for Wordbank
//!
//! Structured logging through `tracing`. Request spans come from
//! `tower_http::trace::TraceLayer` in the HTTP server.

mod logger;

pub use logger::{init_logging, LogFormat, LoggingError};
