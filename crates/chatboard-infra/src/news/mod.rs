//! News cache adapters: the JSON cache file and the GNews API client.

pub mod file_cache;
pub mod gnews;

pub use file_cache::JsonFileNewsCache;
pub use gnews::GNewsFetcher;
