use indexmap::IndexMap;
use lazy_release_core::PackageInfo;
use lazy_release_manifest::ManifestUpdate;
use lazy_release_version::snapshot_version;
use lazy_release_workspace::{ChangedPackages, Workspace};
use semver::Version;
use tracing::{info, warn};

use crate::Result;
use crate::traits::{ManifestStore, PackageManager, PackageManagerKind};

pub const SNAPSHOT_DIST_TAG: &str = "snapshot";

/// A prerelease published from an open pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub package: String,
    pub version: Version,
    /// Command a user runs to install the snapshot.
    pub install_command: String,
}

/// Publishes every released, non-private package at
/// `{new version}-snapshot-{timestamp}` under the `snapshot` dist-tag.
///
/// Each package's manifest is rewritten to the snapshot version and every
/// workspace package depending on it is pinned to that exact version before
/// the package is installed and published. The working tree is left
/// modified.
///
/// # Errors
///
/// Returns an error if a manifest cannot be rewritten, no package manager is
/// detected, or installing or publishing fails.
pub fn create_snapshots<M, P>(
    manifests: &M,
    package_manager: &P,
    workspace: &Workspace,
    packages: &ChangedPackages,
    timestamp: i64,
) -> Result<Vec<Snapshot>>
where
    M: ManifestStore,
    P: PackageManager,
{
    let candidates: Vec<&PackageInfo> = packages
        .iter()
        .filter(|package| {
            if package.is_private {
                info!(package = %package.name, "not publishing snapshot of private package");
                return false;
            }
            true
        })
        .filter(|package| {
            let dir = workspace.package_dir(package);
            if !dir.is_dir() {
                warn!(package = %package.name, dir = %dir.display(), "package directory missing");
                return false;
            }
            true
        })
        .collect();

    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    let kind = package_manager.detect(&workspace.root)?;
    let mut snapshots = Vec::with_capacity(candidates.len());

    for package in candidates {
        let version = snapshot_version(package.effective_version(), timestamp)?;
        pin_snapshot(manifests, workspace, package, &version)?;

        let dir = workspace.package_dir(package);
        package_manager.install(kind, &dir)?;
        package_manager.publish(kind, &dir, Some(SNAPSHOT_DIST_TAG))?;
        info!(package = %package.name, version = %version, "published snapshot");

        snapshots.push(snapshot(kind, package, version));
    }

    Ok(snapshots)
}

fn pin_snapshot<M: ManifestStore>(
    manifests: &M,
    workspace: &Workspace,
    package: &PackageInfo,
    version: &Version,
) -> Result<()> {
    manifests.write_update(
        &workspace.manifest_path(package),
        &ManifestUpdate {
            version: Some(version.clone()),
            dependencies: IndexMap::new(),
        },
    )?;

    let pinned: IndexMap<String, Version> =
        IndexMap::from([(package.name.clone(), version.clone())]);
    for dependent in workspace
        .packages
        .iter()
        .filter(|p| p.dependencies.contains(&package.name))
    {
        manifests.write_update(
            &workspace.manifest_path(dependent),
            &ManifestUpdate {
                version: None,
                dependencies: pinned.clone(),
            },
        )?;
    }
    Ok(())
}

fn snapshot(kind: PackageManagerKind, package: &PackageInfo, version: Version) -> Snapshot {
    Snapshot {
        install_command: kind.add_command(&format!("{}@{version}", package.name)),
        package: package.name.clone(),
        version,
    }
}
