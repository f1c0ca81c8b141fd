use lazy_release_core::Commit;
use tracing::info;

use super::commits::collect_release_commits;
use crate::planner::ReleasePlan;
use crate::traits::{GitProvider, ManifestStore};
use crate::{ActionContext, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanOutput {
    pub commits: Vec<Commit>,
    pub plan: ReleasePlan,
    /// Body the release pull request would get.
    pub markdown: String,
}

/// Computes the next release from the local checkout without touching the
/// working tree, the remote or the hosting service.
pub struct PlanOperation<G, M> {
    git: G,
    manifests: M,
}

impl<G, M> PlanOperation<G, M>
where
    G: GitProvider,
    M: ManifestStore,
{
    pub fn new(git: G, manifests: M) -> Self {
        Self { git, manifests }
    }

    /// # Errors
    ///
    /// Returns an error if the history or the workspace cannot be read.
    pub fn execute(&self, context: &ActionContext) -> Result<PlanOutput> {
        let root = context.root.as_path();
        let log = self.git.list_commits(root)?;
        let commits = collect_release_commits(&log, context.slug().as_deref());

        let workspace = self.manifests.discover_workspace(root)?;
        let plan = ReleasePlan::from_commits(&commits, &workspace, context.repository.as_ref());
        info!(
            commits = commits.len(),
            packages = plan.package_count(),
            "computed release plan"
        );

        let markdown = plan.markdown(context.repository.as_ref());
        Ok(PlanOutput {
            commits,
            plan,
            markdown,
        })
    }
}
