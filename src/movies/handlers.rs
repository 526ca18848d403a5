use axum::{
    extract::{Query, State},
    Json,
};
use serde_json::Value;
use tracing::info;

use super::error::ApiError;
use crate::server::AppState;
use crate::util::QueryParams;

pub const DEFAULT_PAGE: u32 = 1;

/// Read the `page` query parameter. Missing or blank means page 1; anything
/// else that is not a positive integer is rejected.
pub fn parse_page(params: &QueryParams) -> Result<u32, ApiError> {
    let raw = match params.get("page") {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return Ok(DEFAULT_PAGE),
    };
    match raw.trim().parse::<u32>() {
        Ok(page) if page >= 1 => Ok(page),
        _ => Err(ApiError::InvalidPage(raw.to_string())),
    }
}

/// `GET /api/movies?page=N` relays TMDB's popular-movies list.
pub async fn popular_movies(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Result<Json<Value>, ApiError> {
    let page = parse_page(&params)?;
    info!(page, "Popular movies requested");

    let data = state.tmdb.popular(page).await?;
    Ok(Json(data))
}
