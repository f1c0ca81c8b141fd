use lazy_release_changelog::{ReleaseEntry, parse_release_pr_body};
use lazy_release_core::PackageInfo;
use tracing::{error, info, warn};

use super::SkipReason;
use crate::traits::{
    GitProvider, HostingProvider, ManifestStore, OutputSink, PackageManager, PackageManagerKind,
    PublishResult,
};
use crate::{ActionContext, OperationError, Result};

/// Output set to `true` or `false` depending on whether anything was
/// published.
pub const PUBLISHED_OUTPUT: &str = "published";

pub struct PublishInput {
    /// Body of the merged release pull request.
    pub release_body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReport {
    pub tags_created: Vec<String>,
    pub published: Vec<String>,
    pub already_published: Vec<String>,
    pub releases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Skipped(SkipReason),
    Completed(PublishReport),
}

/// Tags, publishes and creates releases for the packages listed in a merged
/// release pull request.
pub struct PublishOperation<G, M, P, H, O> {
    git: G,
    manifests: M,
    package_manager: P,
    hosting: H,
    outputs: O,
}

impl<G, M, P, H, O> PublishOperation<G, M, P, H, O>
where
    G: GitProvider,
    M: ManifestStore,
    P: PackageManager,
    H: HostingProvider,
    O: OutputSink,
{
    pub fn new(git: G, manifests: M, package_manager: P, hosting: H, outputs: O) -> Self {
        Self {
            git,
            manifests,
            package_manager,
            hosting,
            outputs,
        }
    }

    /// # Errors
    ///
    /// Tag and release failures are returned immediately. A package that
    /// fails to publish does not stop the others; the operation then returns
    /// `OperationError::PublishFailed` once releases have been created.
    pub fn execute(&self, context: &ActionContext, input: &PublishInput) -> Result<PublishOutcome> {
        let root = context.root.as_path();

        let entries = parse_release_pr_body(&input.release_body);
        if entries.is_empty() {
            info!("release pull request lists no packages, nothing to publish");
            return Ok(PublishOutcome::Skipped(SkipReason::NoReleaseEntries));
        }

        let workspace = self.manifests.discover_workspace(root)?;
        if workspace.packages.is_empty() {
            return Ok(PublishOutcome::Skipped(SkipReason::NoPackages));
        }

        let releases: Vec<(&PackageInfo, &ReleaseEntry)> = workspace
            .packages
            .iter()
            .filter_map(|package| {
                entries
                    .iter()
                    .find(|entry| entry_matches(entry, package))
                    .map(|entry| (package, entry))
            })
            .collect();
        if releases.is_empty() {
            warn!("no workspace package matches the release pull request");
            return Ok(PublishOutcome::Skipped(SkipReason::NoChangedPackages));
        }

        let mut report = PublishReport::default();

        for (package, entry) in &releases {
            if package.version != entry.heading.new_version {
                warn!(
                    package = %package.name,
                    manifest = %package.version,
                    expected = %entry.heading.new_version,
                    "manifest version differs from release pull request"
                );
            }

            let tag = package.tag_name();
            if self.git.remote_tag_exists(root, &tag)? {
                info!(%tag, "tag already exists, skipping");
                continue;
            }
            self.git.create_tag(root, &tag, &format!("Release {tag}"))?;
            self.outputs.set_output(
                &format!("{}_version", package.unscoped_name()),
                &package.version.to_string(),
            )?;
            report.tags_created.push(tag);
        }
        if !report.tags_created.is_empty() {
            self.git.push_tags(root)?;
        }

        let failed = self.publish_packages(&releases, &workspace.root, &mut report)?;
        self.outputs.set_output(
            PUBLISHED_OUTPUT,
            if report.published.is_empty() { "false" } else { "true" },
        )?;

        for (package, entry) in &releases {
            let tag = package.tag_name();
            if !self.git.remote_tag_exists(root, &tag)? {
                warn!(%tag, "tag missing on remote, not creating release");
                continue;
            }
            self.hosting
                .create_release(&tag, &package.release_name(), &entry.content)?;
            info!(%tag, "created release");
            report.releases.push(tag);
        }

        if !failed.is_empty() {
            return Err(OperationError::PublishFailed { packages: failed });
        }
        Ok(PublishOutcome::Completed(report))
    }

    /// Publishes every public package and returns the names of those that
    /// failed.
    fn publish_packages(
        &self,
        releases: &[(&PackageInfo, &ReleaseEntry)],
        workspace_root: &std::path::Path,
        report: &mut PublishReport,
    ) -> Result<Vec<String>> {
        let public: Vec<&PackageInfo> = releases
            .iter()
            .map(|(package, _)| *package)
            .filter(|package| !package.is_private)
            .collect();
        if public.is_empty() {
            return Ok(Vec::new());
        }

        let kind: PackageManagerKind = self.package_manager.detect(workspace_root)?;
        let mut failed = Vec::new();

        for package in public {
            let dir = workspace_root.join(package.directory());
            match self.package_manager.publish(kind, &dir, None) {
                Ok(PublishResult::Published) => {
                    info!(package = %package.name, version = %package.version, "published");
                    report.published.push(package.name.clone());
                }
                Ok(PublishResult::AlreadyExists) => {
                    report.already_published.push(package.name.clone());
                }
                Err(err) => {
                    error!(package = %package.name, error = %err, "publish failed");
                    failed.push(package.name.clone());
                }
            }
        }
        Ok(failed)
    }
}

fn entry_matches(entry: &ReleaseEntry, package: &PackageInfo) -> bool {
    match &entry.heading.package_name {
        Some(name) => name == &package.name || name == package.unscoped_name(),
        None => package.is_root,
    }
}
