use thiserror::Error;

#[derive(Debug, Error)]
pub enum VersionError {
    #[error("invalid pre-release identifier '{identifier}'")]
    InvalidPrerelease {
        identifier: String,
        #[source]
        source: semver::Error,
    },
}
