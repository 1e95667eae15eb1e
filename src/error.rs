use thiserror::Error;

/// errors surfaced by the storage layer and the request handlers
#[derive(Debug, Error)]
pub enum Error {
    /// requested identifier absent, malformed or not in storage
    #[error("record not found")]
    NotFound,

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("table {0} failed integrity check")]
    Integrity(String),

    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
