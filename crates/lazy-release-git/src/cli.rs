use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::{GitError, Result};

/// Runs the `git` executable for operations that talk to a remote or touch
/// the checked-out branch.
#[derive(Debug, Clone)]
pub struct GitCli {
    root: PathBuf,
}

impl GitCli {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Runs `git` with `args` and returns its standard output.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::Spawn`] if git cannot be started and
    /// [`GitError::Command`] if it exits unsuccessfully.
    pub fn run(&self, args: &[&str]) -> Result<String> {
        let command = format!("git {}", args.join(" "));
        debug!(%command, "running git");

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()
            .map_err(|source| GitError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(GitError::Command {
                command,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// # Errors
    ///
    /// Returns an error if the fetch fails.
    pub fn fetch(&self, refspec: &str) -> Result<()> {
        self.run(&["fetch", "origin", refspec]).map(drop)
    }

    /// # Errors
    ///
    /// Returns an error if the fetch fails.
    pub fn fetch_tags(&self) -> Result<()> {
        self.run(&["fetch", "--tags"]).map(drop)
    }

    /// # Errors
    ///
    /// Returns an error if the branch does not exist or cannot be checked out.
    pub fn checkout(&self, branch: &str) -> Result<()> {
        self.run(&["checkout", branch]).map(drop)
    }

    /// # Errors
    ///
    /// Returns an error if the branch already exists.
    pub fn checkout_new_branch(&self, branch: &str) -> Result<()> {
        self.run(&["checkout", "-b", branch]).map(drop)
    }

    /// Merges `target` into the current branch. With `theirs` set, conflicting
    /// hunks resolve to the incoming side.
    ///
    /// # Errors
    ///
    /// Returns an error if the merge fails, including on conflicts.
    pub fn merge(&self, target: &str, theirs: bool) -> Result<()> {
        if theirs {
            self.run(&["merge", "-X", "theirs", target]).map(drop)
        } else {
            self.run(&["merge", target]).map(drop)
        }
    }

    /// # Errors
    ///
    /// Returns an error if no merge is in progress.
    pub fn merge_abort(&self) -> Result<()> {
        self.run(&["merge", "--abort"]).map(drop)
    }

    /// # Errors
    ///
    /// Returns an error if the push is rejected.
    pub fn push(&self, refspec: &str) -> Result<()> {
        self.run(&["push", "origin", refspec]).map(drop)
    }

    /// # Errors
    ///
    /// Returns an error if the push is rejected.
    pub fn push_tags(&self) -> Result<()> {
        self.run(&["push", "origin", "--tags"]).map(drop)
    }

    /// Whether `origin` has the tag `name`.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote cannot be queried.
    pub fn remote_tag_exists(&self, name: &str) -> Result<bool> {
        let output = self.run(&["ls-remote", "--tags", "origin", &format!("refs/tags/{name}")])?;
        Ok(!output.trim().is_empty())
    }

    /// # Errors
    ///
    /// Returns an error if the configuration cannot be written.
    pub fn config_set_global(&self, key: &str, value: &str) -> Result<()> {
        self.run(&["config", "--global", key, value]).map(drop)
    }

    /// # Errors
    ///
    /// Returns an error if the configuration cannot be written.
    pub fn config_add_global(&self, key: &str, value: &str) -> Result<()> {
        self.run(&["config", "--global", "--add", key, value]).map(drop)
    }
}
