use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error(transparent)]
    Core(#[from] lazy_release_core::CoreError),

    #[error(transparent)]
    Git(#[from] lazy_release_git::GitError),

    #[error(transparent)]
    GitHub(#[from] lazy_release_github::GitHubError),

    #[error(transparent)]
    Workspace(#[from] lazy_release_workspace::WorkspaceError),

    #[error(transparent)]
    Manifest(#[from] lazy_release_manifest::ManifestError),

    #[error(transparent)]
    Changelog(#[from] lazy_release_changelog::ChangelogError),

    #[error("version calculation failed")]
    Version(#[from] lazy_release_version::VersionError),

    #[error("invalid pull request title: '{title}'")]
    InvalidPullRequestTitle { title: String },

    #[error("no package manager detected in '{path}'")]
    PackageManagerNotDetected { path: PathBuf },

    #[error("failed to run '{command}'")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{command}' exited with {status}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("failed to write action output to '{path}'")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to publish: {}", packages.join(", "))]
    PublishFailed { packages: Vec<String> },
}

pub type Result<T> = std::result::Result<T, OperationError>;
