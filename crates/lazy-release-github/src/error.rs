use thiserror::Error;

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("GitHub token is not set")]
    MissingToken,

    #[error("failed to start async runtime")]
    Runtime(#[source] std::io::Error),

    #[error("failed to create GitHub client")]
    Client(#[source] octocrab::Error),

    #[error("GitHub API request failed: {operation}")]
    Api {
        operation: &'static str,
        #[source]
        source: octocrab::Error,
    },
}
