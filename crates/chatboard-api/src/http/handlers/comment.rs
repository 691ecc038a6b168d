//! Comment handlers for the REST API.
//!
//! HTTP counterparts of the `get_comments` / `new_comment` socket events.
//! Comments posted here are broadcast to connected sockets like any other.

use std::time::Instant;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use chatboard_types::comment::{Comment, CommentView, NewComment};

use crate::http::error::AppError;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// A tab and how many comments it holds.
#[derive(Debug, Serialize)]
pub struct TabSummary {
    pub tab: String,
    pub comments: i64,
}

/// GET /api/v1/tabs - List tabs with comment counts.
pub async fn list_tabs(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<TabSummary>>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let tabs = state
        .hub
        .comments()
        .list_tabs()
        .await?
        .into_iter()
        .map(|(tab, comments)| TabSummary { tab, comments })
        .collect();

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(tabs, request_id, elapsed)))
}

/// GET /api/v1/tabs/{tab}/comments - Comments in a tab, newest first.
pub async fn list_comments(
    State(state): State<AppState>,
    Path(tab): Path<String>,
) -> Result<Json<ApiResponse<Vec<CommentView>>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let comments = state.hub.comments().list_tab(&tab).await?;
    let views = comments.iter().map(Comment::view).collect();

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(views, request_id, elapsed)))
}

/// POST /api/v1/tabs/{tab}/comments - Post `{text, name?}` to a tab.
pub async fn post_comment(
    State(state): State<AppState>,
    Path(tab): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ApiResponse<CommentView>>, AppError> {
    let start = Instant::now();
    let request_id = Uuid::now_v7().to_string();

    let Json(body) = body?;
    let payload = with_tab(body, tab);
    let new = NewComment::from_payload(&payload, state.hub.comments().default_name())?;
    let comment = state.hub.post_comment(new).await?;

    let elapsed = start.elapsed().as_millis() as u64;
    Ok(Json(ApiResponse::success(comment.view(), request_id, elapsed)))
}

/// Put the path's tab into the body. Non-object bodies are left alone and
/// fail validation.
fn with_tab(mut body: Value, tab: String) -> Value {
    if let Some(obj) = body.as_object_mut() {
        obj.insert("tab".to_string(), Value::String(tab));
    }
    body
}
