use std::path::Path;

use lazy_release_git::{CommitInfo, TagInfo};

use crate::Result;

pub trait GitProvider: Send + Sync {
    /// Commits reachable from HEAD, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened or walked.
    fn list_commits(&self, project_root: &Path) -> Result<Vec<CommitInfo>>;

    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened or HEAD is unborn.
    fn head_message(&self, project_root: &Path) -> Result<String>;

    /// # Errors
    ///
    /// Returns an error if the repository cannot be opened.
    fn remote_url(&self, project_root: &Path) -> Result<Option<String>>;

    /// # Errors
    ///
    /// Returns an error if the remote cannot be queried.
    fn remote_tag_exists(&self, project_root: &Path, tag_name: &str) -> Result<bool>;

    /// # Errors
    ///
    /// Returns an error if the tag cannot be created or already exists.
    fn create_tag(&self, project_root: &Path, tag_name: &str, message: &str) -> Result<TagInfo>;

    /// # Errors
    ///
    /// Returns an error if the push is rejected.
    fn push_tags(&self, project_root: &Path) -> Result<()>;

    /// Fetches `branch` from the remote and checks it out.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch or checkout fails.
    fn checkout_branch(&self, project_root: &Path, branch: &str) -> Result<()>;

    /// Checks out `branch` and brings it up to date with `default_branch`,
    /// or creates it when it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the branch cannot be updated or created.
    fn create_or_checkout_branch(
        &self,
        project_root: &Path,
        branch: &str,
        default_branch: &str,
    ) -> Result<()>;

    /// Whether the working tree has uncommitted or untracked changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the status check fails.
    fn has_changes(&self, project_root: &Path) -> Result<bool>;

    /// # Errors
    ///
    /// Returns an error if staging, committing or pushing fails.
    fn commit_all_and_push(&self, project_root: &Path, message: &str) -> Result<CommitInfo>;

    /// # Errors
    ///
    /// Returns an error if the git configuration cannot be written.
    fn configure_identity(&self, project_root: &Path) -> Result<()>;
}
