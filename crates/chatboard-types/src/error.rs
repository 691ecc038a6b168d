use thiserror::Error;

/// Errors raised when a socket or HTTP payload does not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("payload must be a JSON object")]
    NotAnObject,

    #[error("missing field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' must be a {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("unknown event '{0}'")]
    UnknownEvent(String),

    #[error("malformed frame: {0}")]
    Malformed(String),
}

/// Errors from repository operations (used by trait definitions in chatboard-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database connection error")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,
}

/// Errors related to comment submission and retrieval.
#[derive(Debug, Error)]
pub enum CommentError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}

/// Errors related to the cached news feed.
#[derive(Debug, Error)]
pub enum NewsError {
    #[error("failed to read news cache: {0}")]
    CacheRead(String),

    #[error("failed to parse news cache: {0}")]
    CacheParse(String),

    #[error("failed to write news cache: {0}")]
    CacheWrite(String),

    #[error("news fetch failed: {0}")]
    Fetch(String),

    #[error("no news available: cache is empty and no fetcher is configured")]
    Unavailable,
}
