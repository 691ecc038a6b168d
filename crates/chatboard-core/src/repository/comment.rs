//! Comment repository trait definition.

use chatboard_types::comment::Comment;
use chatboard_types::error::RepositoryError;

/// Repository trait for comment persistence.
///
/// Comments are append-only: there is no update or delete.
///
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait CommentRepository: Send + Sync {
    /// Persist a new comment.
    fn insert_comment(
        &self,
        comment: &Comment,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// All comments in a tab, newest first.
    fn list_by_tab(
        &self,
        tab: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Comment>, RepositoryError>> + Send;

    /// Distinct tabs with their comment counts, ordered by tab name.
    fn list_tabs(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<(String, i64)>, RepositoryError>> + Send;
}
