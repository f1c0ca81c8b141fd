use lazy_release_github::IssueComment;

use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestDraft {
    pub title: String,
    pub body: String,
    pub head: String,
    pub base: String,
}

pub trait HostingProvider: Send + Sync {
    /// Updates the open pull request from `draft.head` into `draft.base`, or
    /// opens one. Returns the pull request number.
    ///
    /// # Errors
    ///
    /// Returns an error if the hosting API request fails.
    fn create_or_update_pull_request(&self, draft: &PullRequestDraft) -> Result<u64>;

    /// # Errors
    ///
    /// Returns an error if the hosting API request fails.
    fn list_comments(&self, number: u64) -> Result<Vec<IssueComment>>;

    /// # Errors
    ///
    /// Returns an error if the hosting API request fails.
    fn create_comment(&self, number: u64, body: &str) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the hosting API request fails.
    fn update_comment(&self, comment_id: u64, body: &str) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the hosting API request fails.
    fn create_release(&self, tag_name: &str, name: &str, body: &str) -> Result<()>;
}
