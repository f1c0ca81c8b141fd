use std::path::PathBuf;

use lazy_release_core::RepositoryInfo;
use lazy_release_core::constants::DEFAULT_BRANCH;

/// Where and against what an operation runs.
#[derive(Debug, Clone)]
pub struct ActionContext {
    pub root: PathBuf,
    pub repository: Option<RepositoryInfo>,
    pub default_branch: String,
}

impl ActionContext {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            repository: None,
            default_branch: DEFAULT_BRANCH.to_string(),
        }
    }

    #[must_use]
    pub fn with_repository(mut self, repository: RepositoryInfo) -> Self {
        self.repository = Some(repository);
        self
    }

    #[must_use]
    pub fn with_default_branch(mut self, branch: impl Into<String>) -> Self {
        self.default_branch = branch.into();
        self
    }

    /// `owner/repo`, when the repository is known.
    #[must_use]
    pub fn slug(&self) -> Option<String> {
        self.repository.as_ref().map(RepositoryInfo::slug)
    }
}

/// The pull request that triggered the run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestContext {
    pub number: u64,
    pub title: String,
    pub body: String,
    pub merged: bool,
    pub head_sha: Option<String>,
}
