//! News handler.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use uuid::Uuid;

use chatboard_types::news::Article;

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// GET /api/v1/news - Cached news articles, refreshed when stale.
pub async fn get_news(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Article>>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let articles = state.news_service.get_cached_news().await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(articles, request_id, elapsed)))
}
