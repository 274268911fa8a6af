use std::path::PathBuf;

use thiserror::Error;

/// Failures of either pipeline. None of them are recovered below the binaries.
#[derive(Error, Debug)]
pub enum Error {
    #[error("GET {url} returned HTTP {status}")]
    Network { url: String, status: u16 },

    #[error("GET {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected JSON shape in {origin}: {source}")]
    Schema {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize {name}: {source}")]
    Serialize {
        name: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot replay move text {pgn:?}: {reason}")]
    MalformedMoveText { pgn: String, reason: String },

    #[error("opening row has fewer than three columns: {row:?}")]
    MalformedRow { row: String },

    #[error("invalid config {path}: {reason}")]
    Config { path: String, reason: String },

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }
}
