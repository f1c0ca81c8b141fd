use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Operation(#[from] lazy_release_operations::OperationError),

    #[error("failed to connect to GitHub")]
    GitHub(#[from] lazy_release_github::GitHubError),

    #[error("invalid repository")]
    Repository(#[from] lazy_release_core::CoreError),

    #[error("failed to determine current directory")]
    CurrentDir(#[source] std::io::Error),

    #[error("missing required setting {name}")]
    MissingSetting { name: &'static str },

    #[error("failed to read event payload '{path}'")]
    EventRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse event payload '{path}'")]
    EventParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("event is not a pull request event")]
    NotAPullRequest,

    #[error("failed to serialize output")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, CliError>;
