//! # v2 Routes
//!
//! Lists carry a pagination envelope and every response, preflight
//! and panic 500s included, carries permissive CORS headers.

use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    http::header,
    middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;

use super::errors::ApiResult;
use super::handlers;
use super::parser::{build_filter, Pagination};
use super::response::{WordListResponse, CACHE_LIST};
use super::state::AppState;
use super::wrapper::{destructive_gate, panic_response};

/// Build the v2 router, to be nested under `/api/v2`
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
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET /words
async fn list_words(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<impl IntoResponse> {
    let filter = build_filter(&params);
    let page = Pagination::from_params(&params);

    let page = state.words().await?.page(&filter, page).await?;
    Ok((
        [(header::CACHE_CONTROL, CACHE_LIST)],
        Json(WordListResponse::from(page)),
    ))
}
