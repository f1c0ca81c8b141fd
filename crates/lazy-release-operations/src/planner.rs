//! Turns change records into the set of package releases they imply.

use std::path::PathBuf;

use chrono::NaiveDate;
use indexmap::IndexMap;
use lazy_release_changelog::{generate_changelog_content, generate_markdown};
use lazy_release_core::{ChangeRecord, Commit, PackageInfo, RepositoryInfo};
use lazy_release_manifest::ManifestUpdate;
use lazy_release_parse::records_from_commits;
use lazy_release_version::{apply_indirect_version, apply_new_version};
use lazy_release_workspace::{ChangedPackages, Workspace, resolve_changed_packages};
use semver::Version;
use tracing::debug;

/// Records together with the packages they release, new versions applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePlan {
    pub records: Vec<ChangeRecord>,
    pub packages: ChangedPackages,
}

impl ReleasePlan {
    #[must_use]
    pub fn new(records: Vec<ChangeRecord>, workspace: &Workspace) -> Self {
        let mut packages = resolve_changed_packages(&records, &workspace.packages);

        for package in &mut packages.changed {
            apply_new_version(package, &records);
        }
        for package in &mut packages.indirect {
            apply_indirect_version(package);
        }

        debug!(
            records = records.len(),
            changed = packages.changed.len(),
            indirect = packages.indirect.len(),
            "planned release"
        );
        Self { records, packages }
    }

    #[must_use]
    pub fn from_commits(
        commits: &[Commit],
        workspace: &Workspace,
        repo: Option<&RepositoryInfo>,
    ) -> Self {
        let root_name = workspace.root_package().map(|p| p.name.as_str());
        let records = records_from_commits(commits, root_name, repo);
        Self::new(records, workspace)
    }

    /// A plan releases something only when a package changed directly.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packages.changed.is_empty()
    }

    #[must_use]
    pub fn package_count(&self) -> usize {
        self.packages.changed.len() + self.packages.indirect.len()
    }

    /// New version of every released package, keyed by full name.
    #[must_use]
    pub fn new_versions(&self) -> IndexMap<String, Version> {
        self.packages
            .iter()
            .filter_map(|p| p.new_version.clone().map(|v| (p.name.clone(), v)))
            .collect()
    }

    #[must_use]
    pub fn markdown(&self, repo: Option<&RepositoryInfo>) -> String {
        generate_markdown(
            &self.packages.changed,
            &self.packages.indirect,
            &self.records,
            repo,
        )
    }

    /// Manifest edits for the whole workspace: released packages get their
    /// new version, and every package depending on a released package gets
    /// its specifier rewritten.
    #[must_use]
    pub fn manifest_updates(&self, workspace: &Workspace) -> Vec<(PathBuf, ManifestUpdate)> {
        let new_versions = self.new_versions();

        workspace
            .packages
            .iter()
            .filter_map(|package| {
                let update = ManifestUpdate {
                    version: new_versions.get(&package.name).cloned(),
                    dependencies: new_versions
                        .iter()
                        .filter(|(name, _)| package.dependencies.contains(name))
                        .map(|(name, version)| (name.clone(), version.clone()))
                        .collect(),
                };
                (!update.is_empty()).then(|| (workspace.manifest_path(package), update))
            })
            .collect()
    }

    /// `CHANGELOG.md` section for each released package. Indirect packages
    /// get the dependency notice.
    #[must_use]
    pub fn changelog_sections(&self, date: NaiveDate) -> Vec<(&PackageInfo, String)> {
        let changed = self
            .packages
            .changed
            .iter()
            .map(|p| (p, generate_changelog_content(p, &self.records, date)));
        let indirect = self
            .packages
            .indirect
            .iter()
            .map(|p| (p, generate_changelog_content(p, &[], date)));
        changed.chain(indirect).collect()
    }
}
