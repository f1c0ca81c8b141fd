//! The `pull_request` event payload at `GITHUB_EVENT_PATH`.

use std::path::Path;

use lazy_release_operations::PullRequestContext;
use serde::Deserialize;

use crate::error::{CliError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestEvent {
    pub pull_request: Option<PullRequestPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestPayload {
    pub number: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub merged: bool,
    pub head: Option<HeadRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeadRef {
    pub sha: String,
}

impl PullRequestEvent {
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CliError::EventRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| CliError::EventParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// # Errors
    ///
    /// Returns `CliError::NotAPullRequest` for events without a pull request.
    pub fn into_pull_request(self) -> Result<PullRequestContext> {
        let pr = self.pull_request.ok_or(CliError::NotAPullRequest)?;
        Ok(PullRequestContext {
            number: pr.number,
            title: pr.title,
            body: pr.body.unwrap_or_default(),
            merged: pr.merged,
            head_sha: pr.head.map(|head| head.sha),
        })
    }
}
