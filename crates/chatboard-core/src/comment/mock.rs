//! In-memory `CommentRepository` for unit tests.

use std::sync::Mutex;

use chatboard_types::comment::Comment;
use chatboard_types::error::RepositoryError;

use crate::repository::comment::CommentRepository;

#[derive(Default)]
pub struct MockCommentRepository {
    pub comments: Mutex<Vec<Comment>>,
    pub fail_writes: bool,
}

impl MockCommentRepository {
    pub fn failing() -> Self {
        Self {
            comments: Mutex::new(Vec::new()),
            fail_writes: true,
        }
    }

    pub fn stored(&self) -> Vec<Comment> {
        self.comments.lock().unwrap().clone()
    }
}

impl CommentRepository for MockCommentRepository {
    async fn insert_comment(&self, comment: &Comment) -> Result<(), RepositoryError> {
        if self.fail_writes {
            return Err(RepositoryError::Connection);
        }
        self.comments.lock().unwrap().push(comment.clone());
        Ok(())
    }

    async fn list_by_tab(&self, tab: &str) -> Result<Vec<Comment>, RepositoryError> {
        let mut matching: Vec<Comment> = self
            .comments
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.tab == tab)
            .cloned()
            .collect();
        matching.reverse();
        Ok(matching)
    }

    async fn list_tabs(&self) -> Result<Vec<(String, i64)>, RepositoryError> {
        let mut tabs: std::collections::BTreeMap<String, i64> = Default::default();
        for c in self.comments.lock().unwrap().iter() {
            *tabs.entry(c.tab.clone()).or_default() += 1;
        }
        Ok(tabs.into_iter().collect())
    }
}
