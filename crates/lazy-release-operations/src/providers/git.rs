use std::path::Path;

use lazy_release_git::{CommitInfo, GitCli, Repository, TagInfo};
use tracing::{debug, info, warn};

use crate::Result;
use crate::traits::GitProvider;

const BOT_NAME: &str = "github-actions[bot]";
const BOT_EMAIL: &str = "41898282+github-actions[bot]@users.noreply.github.com";

pub struct Git2Provider;

impl Git2Provider {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for Git2Provider {
    fn default() -> Self {
        Self::new()
    }
}

impl GitProvider for Git2Provider {
    fn list_commits(&self, project_root: &Path) -> Result<Vec<CommitInfo>> {
        let repo = Repository::open(project_root)?;
        Ok(repo.log(None)?)
    }

    fn head_message(&self, project_root: &Path) -> Result<String> {
        let repo = Repository::open(project_root)?;
        Ok(repo.head_message()?)
    }

    fn remote_url(&self, project_root: &Path) -> Result<Option<String>> {
        let repo = Repository::open(project_root)?;
        Ok(repo.remote_url()?)
    }

    fn remote_tag_exists(&self, project_root: &Path, tag_name: &str) -> Result<bool> {
        let cli = GitCli::new(project_root);
        if let Err(error) = cli.fetch_tags() {
            debug!(%error, "fetching tags failed, querying the remote directly");
        }
        Ok(cli.remote_tag_exists(tag_name)?)
    }

    fn create_tag(&self, project_root: &Path, tag_name: &str, message: &str) -> Result<TagInfo> {
        let repo = Repository::open(project_root)?;
        Ok(repo.create_tag(tag_name, message)?)
    }

    fn push_tags(&self, project_root: &Path) -> Result<()> {
        Ok(GitCli::new(project_root).push_tags()?)
    }

    fn checkout_branch(&self, project_root: &Path, branch: &str) -> Result<()> {
        let cli = GitCli::new(project_root);
        cli.fetch(branch)?;
        cli.checkout(branch)?;
        Ok(())
    }

    fn create_or_checkout_branch(
        &self,
        project_root: &Path,
        branch: &str,
        default_branch: &str,
    ) -> Result<()> {
        let cli = GitCli::new(project_root);

        if let Err(error) = cli.checkout(branch) {
            info!(%branch, %error, "branch does not exist, creating it");
            cli.checkout_new_branch(branch)?;
            return Ok(());
        }

        let upstream = format!("origin/{default_branch}");
        if let Err(error) = cli.merge(&upstream, false) {
            warn!(%upstream, %error, "merge conflicts, retrying with the theirs strategy");
            cli.merge_abort()?;
            cli.merge(&upstream, true)?;
        }
        info!(%branch, %upstream, "merged default branch");

        cli.push(branch)?;
        Ok(())
    }

    fn has_changes(&self, project_root: &Path) -> Result<bool> {
        let repo = Repository::open(project_root)?;
        Ok(!repo.is_working_tree_clean()?)
    }

    fn commit_all_and_push(&self, project_root: &Path, message: &str) -> Result<CommitInfo> {
        let repo = Repository::open(project_root)?;
        repo.stage_all()?;
        let commit = repo.commit(message)?;
        GitCli::new(repo.root()).push("HEAD")?;
        Ok(commit)
    }

    fn configure_identity(&self, project_root: &Path) -> Result<()> {
        let cli = GitCli::new(project_root);
        cli.config_set_global("user.name", BOT_NAME)?;
        cli.config_set_global("user.email", BOT_EMAIL)?;
        cli.config_add_global("safe.directory", &project_root.to_string_lossy())?;
        Ok(())
    }
}
