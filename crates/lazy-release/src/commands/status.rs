use std::path::Path;

use lazy_release_operations::operations::{
    StatusCommentInput, StatusCommentOperation, StatusCommentOutcome,
};
use lazy_release_operations::providers::{FileSystemManifestStore, NodePackageManager};
use lazy_release_operations::{ActionContext, PullRequestContext};
use tracing::info;

use super::{action_context, hosting, triggering_pull_request};
use crate::config::ActionConfig;
use crate::error::Result;

pub(crate) fn run(root: &Path) -> Result<()> {
    let config = ActionConfig::from_env();
    let pr = triggering_pull_request(&config)?;
    let context = action_context(root, &config)?;
    execute(&context, &config, pr)
}

pub(super) fn execute(
    context: &ActionContext,
    config: &ActionConfig,
    pull_request: PullRequestContext,
) -> Result<()> {
    let operation = StatusCommentOperation::new(
        FileSystemManifestStore::new(),
        hosting(config, context)?,
        NodePackageManager::new(),
    );

    let outcome = operation.execute(
        context,
        &StatusCommentInput {
            pull_request,
            snapshots: config.snapshots,
            timestamp: chrono::Utc::now().timestamp_millis(),
        },
    )?;

    match outcome {
        StatusCommentOutcome::Skipped(reason) => info!(%reason, "status comment skipped"),
        StatusCommentOutcome::Posted {
            updated, snapshots, ..
        } => info!(
            updated = updated.is_some(),
            snapshots = snapshots.len(),
            "status comment posted"
        ),
    }
    Ok(())
}
