//! GNews API client -- concrete [`NewsFetcher`] for `top-headlines`.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is only exposed
//! when building the request query.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use chatboard_core::news::NewsFetcher;
use chatboard_types::config::NewsConfig;
use chatboard_types::error::NewsError;
use chatboard_types::news::Article;

/// Environment variable holding the GNews API key.
pub const API_KEY_ENV: &str = "GNEWS_API_KEY";

pub struct GNewsFetcher {
    client: reqwest::Client,
    api_key: SecretString,
    endpoint: String,
    lang: String,
    max_articles: u32,
}

#[derive(Debug, Deserialize)]
struct TopHeadlinesResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

impl GNewsFetcher {
    pub fn new(api_key: SecretString, config: &NewsConfig) -> Result<Self, NewsError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| NewsError::Fetch(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            lang: config.lang.clone(),
            max_articles: config.max_articles,
        })
    }

    /// Build a fetcher if `GNEWS_API_KEY` is set, `Ok(None)` otherwise.
    pub fn from_env(config: &NewsConfig) -> Result<Option<Self>, NewsError> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Self::new(SecretString::from(key), config).map(Some),
            _ => Ok(None),
        }
    }

    fn headlines_url(&self) -> String {
        format!("{}/top-headlines", self.endpoint)
    }
}

impl NewsFetcher for GNewsFetcher {
    async fn fetch_headlines(&self) -> Result<Vec<Article>, NewsError> {
        let max = self.max_articles.to_string();
        let response = self
            .client
            .get(self.headlines_url())
            .query(&[
                ("lang", self.lang.as_str()),
                ("max", max.as_str()),
                ("apikey", self.api_key.expose_secret()),
            ])
            .send()
            .await
            .map_err(|e| NewsError::Fetch(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NewsError::Fetch(format!("news API error: {status}")));
        }

        let body: TopHeadlinesResponse = response
            .json()
            .await
            .map_err(|e| NewsError::Fetch(format!("invalid news API response: {e}")))?;

        tracing::debug!(articles = body.articles.len(), "Fetched top headlines");
        Ok(body.articles)
    }
}
