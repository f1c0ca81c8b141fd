use std::path::Path;

use lazy_release_operations::ActionContext;
use lazy_release_operations::operations::{ReleasePrInput, ReleasePrOperation, ReleasePrOutcome};
use lazy_release_operations::providers::{
    FileSystemChangelogStore, FileSystemManifestStore, Git2Provider, NodePackageManager,
};
use tracing::info;

use super::{action_context, hosting};
use crate::config::ActionConfig;
use crate::error::Result;

pub(crate) fn run(root: &Path) -> Result<()> {
    let config = ActionConfig::from_env();
    let context = action_context(root, &config)?;
    execute(&context, &config)
}

pub(super) fn execute(context: &ActionContext, config: &ActionConfig) -> Result<()> {
    let operation = ReleasePrOperation::new(
        Git2Provider::new(),
        FileSystemManifestStore::new(),
        FileSystemChangelogStore::new(),
        NodePackageManager::new(),
        hosting(config, context)?,
    );

    match operation.execute(context, &ReleasePrInput::today())? {
        ReleasePrOutcome::Skipped(reason) => info!(%reason, "release pull request skipped"),
        ReleasePrOutcome::Opened(output) => {
            for package in output.plan.packages.iter() {
                if let Some(new_version) = &package.new_version {
                    info!(
                        package = %package.name,
                        from = %package.version,
                        to = %new_version,
                        "version planned"
                    );
                }
            }
            info!(number = output.number, committed = output.committed, "release pull request updated");
        }
    }
    Ok(())
}
