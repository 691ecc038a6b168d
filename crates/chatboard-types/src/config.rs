//! Global configuration types for Chatboard.
//!
//! `GlobalConfig` represents the top-level `config.toml` that controls the
//! server address, comment defaults, and the news cache.

use serde::{Deserialize, Serialize};

use crate::comment::DEFAULT_COMMENT_NAME;

/// Top-level configuration for Chatboard.
///
/// Loaded from `~/.chatboard/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub comments: CommentsConfig,

    #[serde(default)]
    pub news: NewsConfig,
}

/// HTTP/WebSocket listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory holding the built web client (`index.html` + assets).
    #[serde(default = "default_web_dir")]
    pub web_dir: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_web_dir() -> String {
    "web/dist".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            web_dir: default_web_dir(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentsConfig {
    /// Name stored when a submission has no usable `name`.
    #[serde(default = "default_comment_name")]
    pub default_name: String,
}

fn default_comment_name() -> String {
    DEFAULT_COMMENT_NAME.to_string()
}

impl Default for CommentsConfig {
    fn default() -> Self {
        Self {
            default_name: default_comment_name(),
        }
    }
}

/// News cache and upstream API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    /// Cache file name, resolved relative to the data directory.
    #[serde(default = "default_cache_file")]
    pub cache_file: String,

    /// Maximum cache age before a refetch, in seconds.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Base URL of the news API.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_lang")]
    pub lang: String,

    #[serde(default = "default_max_articles")]
    pub max_articles: u32,
}

fn default_cache_file() -> String {
    "news_cache.json".to_string()
}

fn default_ttl_secs() -> u64 {
    3600
}

fn default_endpoint() -> String {
    "https://gnews.io/api/v4".to_string()
}

fn default_lang() -> String {
    "en".to_string()
}

fn default_max_articles() -> u32 {
    10
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            cache_file: default_cache_file(),
            ttl_secs: default_ttl_secs(),
            endpoint: default_endpoint(),
            lang: default_lang(),
            max_articles: default_max_articles(),
        }
    }
}
