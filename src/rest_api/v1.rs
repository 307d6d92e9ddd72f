//! # v1 Routes
//!
//! Legacy response shapes: lists are flat arrays with no pagination
//! envelope. CORS comes from the server-wide layer.

use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    http::header,
    middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use super::errors::ApiResult;
use super::handlers;
use super::parser::{build_filter, Pagination};
use super::response::CACHE_LIST;
use super::state::AppState;
use super::wrapper::destructive_gate;

/// Build the v1 router, to be nested under `/api/v1`
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/words", get(list_words).post(handlers::create_word))
        .route("/words/random", get(handlers::random_word))
        .route("/words/search", get(handlers::search_words))
        .route(
            "/words/:id",
            get(handlers::get_word)
                .put(handlers::update_word)
                .delete(handlers::delete_word),
        )
        .route("/categories", get(handlers::list_categories))
        .route("/config", get(handlers::get_config))
        .route_layer(middleware::from_fn_with_state(state.flags, destructive_gate))
        .with_state(state)
}

/// GET /words. Paginates only when `limit` or `offset` is given.
async fn list_words(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<impl IntoResponse> {
    let filter = build_filter(&params);
    let words = state
        .words()
        .await?
        .list(&filter, Pagination::explicit(&params))
        .await?;

    Ok(([(header::CACHE_CONTROL, CACHE_LIST)], Json(words)))
}
