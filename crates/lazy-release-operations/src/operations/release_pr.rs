use std::path::PathBuf;

use chrono::NaiveDate;
use lazy_release_changelog::{append_release_id, update_changelog};
use lazy_release_core::constants::{
    CHANGELOG_FILE, COMMIT_MESSAGE, RELEASE_BRANCH, RELEASE_PR_TITLE,
};
use lazy_release_workspace::Workspace;
use tracing::{debug, info};

use super::SkipReason;
use super::commits::collect_release_commits;
use crate::planner::ReleasePlan;
use crate::traits::{
    ChangelogStore, GitProvider, HostingProvider, ManifestStore, PackageManager, PullRequestDraft,
};
use crate::{ActionContext, Result};

pub struct ReleasePrInput {
    /// Date written into changelog headings.
    pub date: NaiveDate,
}

impl ReleasePrInput {
    /// Dates changelog headings with the local date.
    #[must_use]
    pub fn today() -> Self {
        Self {
            date: chrono::Local::now().date_naive(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePrOutput {
    pub number: u64,
    pub plan: ReleasePlan,
    /// Whether the release branch received a new commit.
    pub committed: bool,
    pub changelogs: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleasePrOutcome {
    Skipped(SkipReason),
    Opened(ReleasePrOutput),
}

/// Brings the release branch up to date with the default branch, writes new
/// versions and changelogs, and opens or updates the release pull request.
pub struct ReleasePrOperation<G, M, C, P, H> {
    git: G,
    manifests: M,
    changelogs: C,
    package_manager: P,
    hosting: H,
}

impl<G, M, C, P, H> ReleasePrOperation<G, M, C, P, H>
where
    G: GitProvider,
    M: ManifestStore,
    C: ChangelogStore,
    P: PackageManager,
    H: HostingProvider,
{
    pub fn new(git: G, manifests: M, changelogs: C, package_manager: P, hosting: H) -> Self {
        Self {
            git,
            manifests,
            changelogs,
            package_manager,
            hosting,
        }
    }

    /// # Errors
    ///
    /// Returns an error if any git, file, package manager or hosting step
    /// fails. Files written before the failure stay on the release branch.
    pub fn execute(
        &self,
        context: &ActionContext,
        input: &ReleasePrInput,
    ) -> Result<ReleasePrOutcome> {
        let root = context.root.as_path();
        self.git
            .create_or_checkout_branch(root, RELEASE_BRANCH, &context.default_branch)?;

        let log = self.git.list_commits(root)?;
        let commits = collect_release_commits(&log, context.slug().as_deref());
        info!(commits = commits.len(), "collected unreleased commits");

        let workspace = self.manifests.discover_workspace(root)?;
        if workspace.packages.is_empty() {
            return Ok(ReleasePrOutcome::Skipped(SkipReason::NoPackages));
        }

        let plan = ReleasePlan::from_commits(&commits, &workspace, context.repository.as_ref());
        if plan.is_empty() {
            info!("no packages changed since the last release");
            return Ok(ReleasePrOutcome::Skipped(SkipReason::NoChangedPackages));
        }

        self.write_manifests(&plan, &workspace)?;
        let changelogs = self.write_changelogs(&plan, &workspace, input.date)?;

        let kind = self.package_manager.detect(root)?;
        self.package_manager.install(kind, root)?;

        let committed = if self.git.has_changes(root)? {
            let commit = self.git.commit_all_and_push(root, COMMIT_MESSAGE)?;
            info!(sha = %commit.sha, "pushed release branch");
            true
        } else {
            info!("release branch already up to date");
            false
        };

        let number = self
            .hosting
            .create_or_update_pull_request(&PullRequestDraft {
                title: RELEASE_PR_TITLE.to_string(),
                body: append_release_id(&plan.markdown(context.repository.as_ref())),
                head: RELEASE_BRANCH.to_string(),
                base: context.default_branch.clone(),
            })?;
        info!(number, "release pull request ready");

        Ok(ReleasePrOutcome::Opened(ReleasePrOutput {
            number,
            plan,
            committed,
            changelogs,
        }))
    }

    fn write_manifests(&self, plan: &ReleasePlan, workspace: &Workspace) -> Result<()> {
        for (path, update) in plan.manifest_updates(workspace) {
            let changes = self.manifests.write_update(&path, &update)?;
            debug!(
                path = %path.display(),
                version = ?update.version.as_ref().map(ToString::to_string),
                dependencies = changes.len(),
                "updated manifest"
            );
        }
        Ok(())
    }

    fn write_changelogs(
        &self,
        plan: &ReleasePlan,
        workspace: &Workspace,
        date: NaiveDate,
    ) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for (package, section) in plan.changelog_sections(date) {
            let path = workspace.package_dir(package).join(CHANGELOG_FILE);
            let existing = self.changelogs.read(&path)?.unwrap_or_default();
            let content = update_changelog(&existing, &section, package.effective_version());
            self.changelogs.write(&path, &content)?;
            written.push(path);
        }
        Ok(written)
    }
}
