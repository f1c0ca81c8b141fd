//! Action inputs and GitHub Actions environment.

use std::path::PathBuf;

use lazy_release_core::RepositoryInfo;
use lazy_release_core::constants::DEFAULT_BRANCH;

use crate::error::{CliError, Result};

pub const NPM_REGISTRY: &str = "registry.npmjs.org";
pub const GITHUB_PACKAGES_REGISTRY: &str = "npm.pkg.github.com";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionConfig {
    pub github_token: Option<String>,
    pub npm_token: Option<String>,
    pub default_branch: String,
    pub snapshots: bool,
    /// `owner/repo` of the repository the workflow runs in.
    pub repository: Option<String>,
    pub event_path: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
}

impl ActionConfig {
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through `lookup`. Empty values count as
    /// unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            github_token: get("INPUT_GITHUB-TOKEN").or_else(|| get("GITHUB_TOKEN")),
            npm_token: get("INPUT_NPM-TOKEN"),
            default_branch: get("INPUT_DEFAULT-BRANCH")
                .unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
            snapshots: get("INPUT_SNAPSHOTS").is_some_and(|value| value == "true"),
            repository: get("GITHUB_REPOSITORY"),
            event_path: get("GITHUB_EVENT_PATH").map(PathBuf::from),
            output_path: get("GITHUB_OUTPUT").map(PathBuf::from),
        }
    }

    /// # Errors
    ///
    /// Returns `CliError::MissingSetting` when no token is configured.
    pub fn require_github_token(&self) -> Result<&str> {
        self.github_token
            .as_deref()
            .ok_or(CliError::MissingSetting {
                name: "INPUT_GITHUB-TOKEN",
            })
    }

    /// # Errors
    ///
    /// Returns `CliError::MissingSetting` when `GITHUB_EVENT_PATH` is unset.
    pub fn require_event_path(&self) -> Result<&PathBuf> {
        self.event_path.as_ref().ok_or(CliError::MissingSetting {
            name: "GITHUB_EVENT_PATH",
        })
    }

    /// # Errors
    ///
    /// Returns `CliError::MissingSetting` when `GITHUB_REPOSITORY` is unset,
    /// or an error if it is not an `owner/repo` slug.
    pub fn require_repository(&self) -> Result<RepositoryInfo> {
        let slug = self.repository.as_deref().ok_or(CliError::MissingSetting {
            name: "GITHUB_REPOSITORY",
        })?;
        Ok(RepositoryInfo::from_slug(slug)?)
    }

    /// Registries to authenticate against, with their tokens.
    #[must_use]
    pub fn registry_tokens(&self) -> Vec<(&'static str, &str)> {
        let mut tokens = Vec::new();
        if let Some(token) = &self.npm_token {
            tokens.push((NPM_REGISTRY, token.as_str()));
        }
        if let Some(token) = &self.github_token {
            tokens.push((GITHUB_PACKAGES_REGISTRY, token.as_str()));
        }
        tokens
    }
}
