//! JSON file implementation of `NewsCacheStore`.
//!
//! The file holds `{"timestamp": <epoch secs>, "articles": [...]}`. Writes go
//! to a sibling temp file first and are renamed into place, so a reader never
//! sees a half-written cache.

use std::path::{Path, PathBuf};

use chatboard_core::news::NewsCacheStore;
use chatboard_types::error::NewsError;
use chatboard_types::news::NewsCache;

/// News cache stored as a single JSON file.
pub struct JsonFileNewsCache {
    path: PathBuf,
}

impl JsonFileNewsCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl NewsCacheStore for JsonFileNewsCache {
    async fn load(&self) -> Result<Option<NewsCache>, NewsError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No news cache file");
                return Ok(None);
            }
            Err(err) => return Err(NewsError::CacheRead(err.to_string())),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| NewsError::CacheParse(e.to_string()))
    }

    async fn save(&self, cache: &NewsCache) -> Result<(), NewsError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| NewsError::CacheWrite(e.to_string()))?;
        }

        let json =
            serde_json::to_string_pretty(cache).map_err(|e| NewsError::CacheWrite(e.to_string()))?;

        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, json)
            .await
            .map_err(|e| NewsError::CacheWrite(e.to_string()))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| NewsError::CacheWrite(e.to_string()))?;

        tracing::debug!(path = %self.path.display(), articles = cache.articles.len(), "News cache written");
        Ok(())
    }
}
