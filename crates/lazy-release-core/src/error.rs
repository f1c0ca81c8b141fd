use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown change type '{value}'")]
    UnknownChangeType { value: String },

    #[error("unknown bump type '{value}': expected major, minor or patch")]
    UnknownBumpType { value: String },

    #[error("failed to parse URL '{url}'")]
    UrlParse {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid repository path in '{url}': expected owner/repo format")]
    InvalidRepositoryPath { url: String },
}

pub type Result<T> = std::result::Result<T, CoreError>;
