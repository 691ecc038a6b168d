//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI and HTTP
//! handlers. Services are generic over repository/cache/fetcher traits, but
//! AppState pins them to the concrete infra implementations.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chatboard_core::comment::{CommentHub, CommentService};
use chatboard_core::event::EventBus;
use chatboard_core::news::NewsService;
use chatboard_infra::config::load_global_config;
use chatboard_infra::filesystem::{resolve_data_dir, resolve_in_data_dir};
use chatboard_infra::news::{GNewsFetcher, JsonFileNewsCache};
use chatboard_infra::sqlite::comment::SqliteCommentRepository;
use chatboard_infra::sqlite::pool::{DatabasePool, database_url};
use chatboard_types::config::GlobalConfig;
use tokio_util::sync::CancellationToken;

/// Capacity of the broadcast channel feeding connected sockets.
const EVENT_BUS_CAPACITY: usize = 1024;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcreteCommentHub = CommentHub<SqliteCommentRepository>;

pub type ConcreteNewsService = NewsService<JsonFileNewsCache, GNewsFetcher>;

/// Shared application state.
///
/// Used by both CLI commands and HTTP/WebSocket handlers.
#[derive(Clone)]
pub struct AppState {
    pub hub: Arc<ConcreteCommentHub>,
    pub news_service: Arc<ConcreteNewsService>,
    pub config: Arc<GlobalConfig>,
    pub data_dir: PathBuf,
    /// Cancelled on server shutdown; open sockets close when it fires.
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Initialize the application state: load config, connect to DB, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_global_config(&data_dir).await;
        let db_pool = DatabasePool::new(&database_url(&data_dir)).await?;

        Self::from_parts(config, data_dir, db_pool)
    }

    /// Wire services from already loaded configuration and database.
    pub fn from_parts(
        config: GlobalConfig,
        data_dir: PathBuf,
        db_pool: DatabasePool,
    ) -> anyhow::Result<Self> {
        let comment_service = CommentService::new(
            SqliteCommentRepository::new(db_pool),
            config.comments.default_name.clone(),
        );
        let hub = CommentHub::new(comment_service, EventBus::new(EVENT_BUS_CAPACITY));

        let cache_path = resolve_in_data_dir(&data_dir, &config.news.cache_file);
        let fetcher = GNewsFetcher::from_env(&config.news)?;
        if fetcher.is_none() {
            tracing::info!("No news API key configured, news cache will not be refreshed");
        }
        let news_service = NewsService::new(
            JsonFileNewsCache::new(cache_path),
            fetcher,
            Duration::from_secs(config.news.ttl_secs),
        );

        Ok(Self {
            hub: Arc::new(hub),
            news_service: Arc::new(news_service),
            config: Arc::new(config),
            data_dir,
            shutdown: CancellationToken::new(),
        })
    }
}
