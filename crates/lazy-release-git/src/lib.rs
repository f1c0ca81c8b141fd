mod cli;
mod error;
mod repository;
mod revert;
mod types;

pub use cli::GitCli;
pub use error::GitError;
pub use repository::Repository;
pub use revert::{reverted_commit, reverted_pull_request};
pub use types::{CommitInfo, TagInfo};

use std::path::Path;

pub type Result<T> = std::result::Result<T, GitError>;

/// # Errors
///
/// Returns an error if the path is not a git repository or if the status check fails.
pub fn is_working_tree_clean(path: &Path) -> Result<bool> {
    Repository::open(path)?.is_working_tree_clean()
}
