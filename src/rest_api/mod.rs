//! # Wordbank REST API Module
//!
//! Word endpoints in two versions over one shared core. v1 keeps the
//! legacy flat-array list responses; v2 adds pagination envelopes and
//! permissive CORS.

pub mod errors;
pub mod handlers;
pub mod parser;
pub mod response;
pub mod service;
pub mod state;
pub mod v1;
pub mod v2;
pub mod validation;
pub mod wrapper;

pub use errors::{ApiError, ApiResult};
pub use parser::{build_filter, build_search_filter, Pagination};
pub use service::WordService;
pub use state::{AppState, FeatureFlags};
pub use validation::{validate_and_transform_word_data, validate_required_fields};
