use std::path::Path;

use lazy_release_core::constants::RELEASE_ID;
use lazy_release_operations::providers::{Git2Provider, NodePackageManager};
use lazy_release_operations::traits::{GitProvider, PackageManager};
use tracing::info;

use super::{action_context, triggering_pull_request};
use crate::config::ActionConfig;
use crate::error::Result;

/// Entry point of the action.
///
/// An open pull request gets its status comment. A merged pull request
/// either publishes, when the default branch head is a release commit, or
/// refreshes the release pull request.
pub(crate) fn run(root: &Path) -> Result<()> {
    let config = ActionConfig::from_env();
    let pr = triggering_pull_request(&config)?;
    let context = action_context(root, &config)?;

    let git = Git2Provider::new();
    git.configure_identity(&context.root)?;

    let package_manager = NodePackageManager::new();
    for (registry, token) in config.registry_tokens() {
        info!(registry, "configuring registry token");
        package_manager.configure_auth(&context.root, registry, token)?;
    }

    if !pr.merged {
        info!(number = pr.number, "pull request is open");
        return super::status::execute(&context, &config, pr);
    }

    info!(number = pr.number, "pull request was merged");
    git.checkout_branch(&context.root, &context.default_branch)?;

    if git.head_message(&context.root)?.contains(RELEASE_ID) {
        info!("release pull request was merged, publishing");
        super::publish::execute(&context, &config, pr.body)
    } else {
        super::release_pr::execute(&context, &config)
    }
}
