//! # Word Handlers
//!
//! Handlers whose responses are identical in v1 and v2.

use std::collections::HashMap;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::Value;

use super::errors::ApiResult;
use super::parser::{build_filter, build_search_filter, search_term, Pagination};
use super::response::{
    ConfigResponse, MessageResponse, SearchResponse, CACHE_CATEGORIES, CACHE_NONE, CACHE_WORD,
};
use super::state::AppState;

/// GET /words/{id}
pub async fn get_word(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let word = state.words().await?.get(&id).await?;
    Ok(([(header::CACHE_CONTROL, CACHE_WORD)], Json(word)))
}

/// POST /words
pub async fn create_word(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(body) = body?;
    let word = state.words().await?.create(&body).await?;
    Ok((StatusCode::CREATED, Json(word)))
}

/// PUT /words/{id}
pub async fn update_word(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(body) = body?;
    let word = state.words().await?.update(&id, &body).await?;
    Ok(Json(word))
}

/// DELETE /words/{id}
pub async fn delete_word(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    state.words().await?.delete(&id).await?;
    Ok(Json(MessageResponse::deleted(id)))
}

/// GET /words/random
pub async fn random_word(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<impl IntoResponse> {
    let filter = build_filter(&params);
    let word = state.words().await?.random(&filter).await?;
    Ok(([(header::CACHE_CONTROL, CACHE_NONE)], Json(word)))
}

/// GET /words/search?q=
pub async fn search_words(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<impl IntoResponse> {
    let query = search_term(&params)?;
    let filter = build_search_filter(&params, &query);
    let page = Pagination::from_params(&params);

    let page = state.words().await?.page(&filter, page).await?;
    Ok(Json(SearchResponse::new(query, page)))
}

/// GET /categories
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let categories = state.words().await?.categories().await?;
    Ok(([(header::CACHE_CONTROL, CACHE_CATEGORIES)], Json(categories)))
}

/// GET /config
pub async fn get_config(State(state): State<AppState>) -> Json<ConfigResponse> {
    Json(ConfigResponse {
        destructive_endpoints_enabled: state.flags.destructive_endpoints_enabled,
    })
}
