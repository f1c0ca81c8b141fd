use std::path::Path;

use lazy_release_operations::ActionContext;
use lazy_release_operations::operations::{PublishInput, PublishOperation, PublishOutcome};
use lazy_release_operations::providers::{
    FileSystemManifestStore, Git2Provider, GitHubOutputFile, NodePackageManager,
};
use tracing::info;

use super::{action_context, hosting, triggering_pull_request};
use crate::config::ActionConfig;
use crate::error::Result;

pub(crate) fn run(root: &Path) -> Result<()> {
    let config = ActionConfig::from_env();
    let pr = triggering_pull_request(&config)?;
    let context = action_context(root, &config)?;
    execute(&context, &config, pr.body)
}

pub(super) fn execute(
    context: &ActionContext,
    config: &ActionConfig,
    release_body: String,
) -> Result<()> {
    let operation = PublishOperation::new(
        Git2Provider::new(),
        FileSystemManifestStore::new(),
        NodePackageManager::new(),
        hosting(config, context)?,
        GitHubOutputFile::new(config.output_path.clone()),
    );

    match operation.execute(context, &PublishInput { release_body })? {
        PublishOutcome::Skipped(reason) => info!(%reason, "publish skipped"),
        PublishOutcome::Completed(report) => info!(
            tags = report.tags_created.len(),
            published = report.published.len(),
            already_published = report.already_published.len(),
            releases = report.releases.len(),
            "publish finished"
        ),
    }
    Ok(())
}
