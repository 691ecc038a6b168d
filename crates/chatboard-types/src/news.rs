//! Cached news types.
//!
//! The cache file is a JSON object `{timestamp, articles}` where `timestamp`
//! is fractional epoch seconds. Articles are kept as the JSON objects the
//! upstream news API returned, so reading and re-serializing a cache
//! preserves every key, including unknown ones, explicit `null`s, and keys
//! that were never present.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single news article, as returned by the news API.
///
/// Every field is optional and may be `null`; accessors return `None` for
/// absent, `null`, or non-string values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Article(Value);

impl Article {
    pub fn title(&self) -> Option<&str> {
        self.str_field("title")
    }

    pub fn description(&self) -> Option<&str> {
        self.str_field("description")
    }

    pub fn content(&self) -> Option<&str> {
        self.str_field("content")
    }

    pub fn url(&self) -> Option<&str> {
        self.str_field("url")
    }

    pub fn image(&self) -> Option<&str> {
        self.str_field("image")
    }

    /// Publication time as sent upstream (`publishedAt`).
    pub fn published_at(&self) -> Option<&str> {
        self.str_field("publishedAt")
    }

    /// Name of the publishing outlet (`source.name`).
    pub fn source_name(&self) -> Option<&str> {
        self.0.get("source")?.get("name")?.as_str()
    }

    /// The article exactly as stored.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key)?.as_str()
    }
}

impl From<Value> for Article {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// The persisted news cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsCache {
    /// When the articles were fetched, in epoch seconds.
    pub timestamp: f64,
    pub articles: Vec<Article>,
}

impl NewsCache {
    /// Create a cache stamped at `at`.
    pub fn new(at: DateTime<Utc>, articles: Vec<Article>) -> Self {
        Self {
            timestamp: at.timestamp_millis() as f64 / 1000.0,
            articles,
        }
    }

    /// Age of the cache in seconds at `now`. Negative if stamped in the future.
    pub fn age_secs_at(&self, now: DateTime<Utc>) -> f64 {
        now.timestamp_millis() as f64 / 1000.0 - self.timestamp
    }

    /// Whether the cache is still usable at `now` without refetching.
    pub fn is_fresh_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.age_secs_at(now) < ttl.as_secs_f64()
    }
}
