//! Ports for reading/writing the news cache and fetching fresh articles.

use chatboard_types::error::NewsError;
use chatboard_types::news::{Article, NewsCache};

/// Persistent storage for the news cache.
pub trait NewsCacheStore: Send + Sync {
    /// Load the cache. `Ok(None)` if nothing has been cached yet.
    fn load(&self) -> impl std::future::Future<Output = Result<Option<NewsCache>, NewsError>> + Send;

    /// Replace the cache.
    fn save(&self, cache: &NewsCache) -> impl std::future::Future<Output = Result<(), NewsError>> + Send;
}

/// Upstream source of news articles.
pub trait NewsFetcher: Send + Sync {
    /// Fetch the current top headlines.
    fn fetch_headlines(&self) -> impl std::future::Future<Output = Result<Vec<Article>, NewsError>> + Send;
}
