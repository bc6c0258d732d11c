use std::path::PathBuf;

use thiserror::Error;

use crate::gateway::GatewayError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("directory does not exist or is not accessible: {}", .0.display())]
    InvalidDirectory(PathBuf),

    #[error("{context}: {source}")]
    Gateway {
        context: String,
        #[source]
        source: GatewayError,
    },

    #[error("cannot read {}: {source}", path.display())]
    Store {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid history file: {0}")]
    StoreFormat(#[from] serde_json::Error),

    #[error("cannot read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("repo group {0:?} has no repos to analyze")]
    EmptyRepoGroup(String),

    #[error("no session with id {0} in the history")]
    UnknownSession(i64),

    #[error("session {0} has no transcript to analyze")]
    EmptyTranscript(i64),
}
