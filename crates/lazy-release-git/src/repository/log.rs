use crate::{CommitInfo, Result};

use super::Repository;

impl Repository {
    /// Commits reachable from HEAD, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if HEAD cannot be resolved or the history cannot be
    /// walked.
    pub fn log(&self, limit: Option<usize>) -> Result<Vec<CommitInfo>> {
        let mut walk = self.inner.revwalk()?;
        walk.set_sorting(git2::Sort::TOPOLOGICAL | git2::Sort::TIME)?;
        walk.push_head()?;

        let mut commits = Vec::new();
        for oid in walk.take(limit.unwrap_or(usize::MAX)) {
            let commit = self.inner.find_commit(oid?)?;
            commits.push(CommitInfo {
                sha: commit.id().to_string(),
                message: String::from_utf8_lossy(commit.message_bytes()).into_owned(),
            });
        }
        Ok(commits)
    }

    /// # Errors
    ///
    /// Returns an error if HEAD does not point at a commit.
    pub fn head_message(&self) -> Result<String> {
        let head = self.inner.head()?.peel_to_commit()?;
        Ok(String::from_utf8_lossy(head.message_bytes()).into_owned())
    }
}
