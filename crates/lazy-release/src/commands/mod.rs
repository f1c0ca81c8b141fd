mod plan;
mod publish;
mod release_pr;
mod run;
mod status;

use std::path::Path;

use clap::Subcommand;
use lazy_release_github::GitHubClient;
use lazy_release_operations::ActionContext;
use lazy_release_operations::providers::GitHubHostingProvider;

use crate::config::ActionConfig;
use crate::error::Result;
use crate::event::PullRequestEvent;

pub(crate) use plan::PlanArgs;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the action for the pull request event that triggered the workflow
    Run,
    /// Post or update the status comment on the triggering pull request
    Status,
    /// Create or update the release pull request from unreleased commits
    ReleasePr,
    /// Tag, publish and release the packages of a merged release pull request
    Publish,
    /// Show the next release computed from the local git history
    Plan(PlanArgs),
}

impl Commands {
    pub(crate) fn execute(self, root: &Path) -> Result<()> {
        match self {
            Self::Run => run::run(root),
            Self::Status => status::run(root),
            Self::ReleasePr => release_pr::run(root),
            Self::Publish => publish::run(root),
            Self::Plan(args) => plan::run(root, &args),
        }
    }
}

/// Context for commands that talk to GitHub: the repository comes from
/// `GITHUB_REPOSITORY`.
fn action_context(root: &Path, config: &ActionConfig) -> Result<ActionContext> {
    Ok(ActionContext::new(root)
        .with_repository(config.require_repository()?)
        .with_default_branch(&config.default_branch))
}

fn hosting(config: &ActionConfig, context: &ActionContext) -> Result<GitHubHostingProvider> {
    let repository = config.require_repository()?;
    let client = GitHubClient::new(
        config.require_github_token()?,
        repository.owner,
        repository.repo,
    )?;
    tracing::debug!(root = %context.root.display(), "connected to GitHub");
    Ok(GitHubHostingProvider::new(client))
}

fn triggering_pull_request(
    config: &ActionConfig,
) -> Result<lazy_release_operations::PullRequestContext> {
    PullRequestEvent::read(config.require_event_path()?)?.into_pull_request()
}
