//! Cached news feed.
//!
//! The cache store and the upstream fetcher are ports implemented in
//! chatboard-infra; [`NewsService`] holds the freshness policy.

pub mod service;
pub mod source;

pub use service::NewsService;
pub use source::{NewsCacheStore, NewsFetcher};
