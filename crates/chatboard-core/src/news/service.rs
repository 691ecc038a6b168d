//! Read-through news cache.
//!
//! A fresh cache is returned as-is. A stale or missing cache is refreshed
//! from the fetcher when one is configured; if that is impossible the stale
//! articles are served instead, and only a missing cache with no way to
//! refetch is an error.

use std::time::Duration;

use chatboard_types::error::NewsError;
use chatboard_types::news::{Article, NewsCache};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::news::source::{NewsCacheStore, NewsFetcher};

pub struct NewsService<S: NewsCacheStore, F: NewsFetcher> {
    store: S,
    fetcher: Option<F>,
    ttl: Duration,
}

impl<S: NewsCacheStore, F: NewsFetcher> NewsService<S, F> {
    /// Create a news service. Without a fetcher the cache is never refreshed.
    pub fn new(store: S, fetcher: Option<F>, ttl: Duration) -> Self {
        Self { store, fetcher, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn has_fetcher(&self) -> bool {
        self.fetcher.is_some()
    }

    /// Cached articles, refreshed if the cache is stale.
    pub async fn get_cached_news(&self) -> Result<Vec<Article>, NewsError> {
        self.get_cached_news_at(Utc::now()).await
    }

    /// Same as [`get_cached_news`](Self::get_cached_news) with an explicit clock.
    pub async fn get_cached_news_at(&self, now: DateTime<Utc>) -> Result<Vec<Article>, NewsError> {
        let cached = match self.store.load().await {
            Ok(cached) => cached,
            Err(err) => {
                warn!(error = %err, "Ignoring unreadable news cache");
                None
            }
        };

        let stale = match cached {
            Some(cache) if cache.is_fresh_at(now, self.ttl) => {
                debug!(
                    age_secs = cache.age_secs_at(now),
                    articles = cache.articles.len(),
                    "Serving fresh news cache"
                );
                return Ok(cache.articles);
            }
            other => other,
        };

        let Some(fetcher) = &self.fetcher else {
            return match stale {
                Some(cache) => {
                    warn!(
                        age_secs = cache.age_secs_at(now),
                        "News cache is stale and no fetcher is configured, serving stale articles"
                    );
                    Ok(cache.articles)
                }
                None => Err(NewsError::Unavailable),
            };
        };

        match fetcher.fetch_headlines().await {
            Ok(articles) => {
                let cache = NewsCache::new(now, articles);
                if let Err(err) = self.store.save(&cache).await {
                    warn!(error = %err, "Failed to write news cache");
                }
                info!(articles = cache.articles.len(), "News cache refreshed");
                Ok(cache.articles)
            }
            Err(err) => match stale {
                Some(cache) => {
                    warn!(error = %err, "News refresh failed, serving stale articles");
                    Ok(cache.articles)
                }
                None => Err(err),
            },
        }
    }
}
