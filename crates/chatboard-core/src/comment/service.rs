//! Comment service: validate, persist, and query comments.
//!
//! Validation always runs before the repository is touched, so a rejected
//! submission never leaves a partial row behind.

use chatboard_types::comment::{Comment, NewComment, TabQuery};
use chatboard_types::error::CommentError;
use chrono::Utc;
use serde_json::Value;
use tracing::{debug, info};

use crate::repository::comment::CommentRepository;

/// Orchestrates comment validation and persistence.
///
/// Generic over `CommentRepository` so chatboard-core never depends on
/// chatboard-infra.
pub struct CommentService<R: CommentRepository> {
    repo: R,
    default_name: String,
}

impl<R: CommentRepository> CommentService<R> {
    /// Create a comment service. `default_name` is stored for submissions
    /// without a usable `name`.
    pub fn new(repo: R, default_name: impl Into<String>) -> Self {
        Self {
            repo,
            default_name: default_name.into(),
        }
    }

    /// Access the comment repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn default_name(&self) -> &str {
        &self.default_name
    }

    /// Validate a raw `{text, name?, tab}` payload and persist it.
    pub async fn submit(&self, payload: &Value) -> Result<Comment, CommentError> {
        let new = NewComment::from_payload(payload, &self.default_name)?;
        self.add(new).await
    }

    /// Persist an already validated comment.
    pub async fn add(&self, new: NewComment) -> Result<Comment, CommentError> {
        let comment = Comment::from_new(new, Utc::now());
        self.repo.insert_comment(&comment).await?;
        info!(comment_id = %comment.id, tab = %comment.tab, name = %comment.name, "Comment stored");
        Ok(comment)
    }

    /// Validate a raw `{tab}` payload and return that tab's comments.
    pub async fn comments_for(&self, payload: &Value) -> Result<Vec<Comment>, CommentError> {
        let query = TabQuery::from_payload(payload)?;
        self.list_tab(&query.tab).await
    }

    /// Comments in `tab`, newest first.
    pub async fn list_tab(&self, tab: &str) -> Result<Vec<Comment>, CommentError> {
        let comments = self.repo.list_by_tab(tab).await?;
        debug!(tab = %tab, count = comments.len(), "Loaded comments");
        Ok(comments)
    }

    /// Known tabs with their comment counts.
    pub async fn list_tabs(&self) -> Result<Vec<(String, i64)>, CommentError> {
        Ok(self.repo.list_tabs().await?)
    }
}
