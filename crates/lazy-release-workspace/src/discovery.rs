use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use lazy_release_core::PackageInfo;
use lazy_release_core::constants::MANIFEST_FILE;
use lazy_release_manifest::{PackageManifest, read_manifest};
use tracing::{debug, warn};

use crate::error::WorkspaceError;

pub const DEFAULT_IGNORE_PATTERNS: [&str; 3] = ["**/node_modules", "**/dist", "**/.git"];

#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// Directory globs, relative to the workspace root, that are not
    /// searched for manifests.
    pub ignore: Vec<String>,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            ignore: DEFAULT_IGNORE_PATTERNS.iter().map(ToString::to_string).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    pub root: PathBuf,
    /// Packages in manifest path order. The root package, if any, is first.
    pub packages: Vec<PackageInfo>,
}

impl Workspace {
    #[must_use]
    pub fn root_package(&self) -> Option<&PackageInfo> {
        self.packages.iter().find(|package| package.is_root)
    }

    /// Looks a package up by full name, unscoped name or directory name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&PackageInfo> {
        self.packages
            .iter()
            .find(|package| package.name == name || package.matches_name(name))
    }

    #[must_use]
    pub fn manifest_path(&self, package: &PackageInfo) -> PathBuf {
        self.root.join(&package.path)
    }

    #[must_use]
    pub fn package_dir(&self, package: &PackageInfo) -> PathBuf {
        self.root.join(package.directory())
    }
}

/// Finds every `package.json` below `root` and reads it as a workspace
/// package.
///
/// Manifests without a `name` or `version` (typically a private workspace
/// root) are skipped. A tree with no usable manifest yields an empty
/// workspace.
///
/// # Errors
///
/// Returns `WorkspaceError` if a directory cannot be listed, an ignore
/// pattern is invalid, or a manifest cannot be parsed.
pub fn discover_workspace(
    root: &Path,
    options: &DiscoveryOptions,
) -> Result<Workspace, WorkspaceError> {
    let ignore = build_ignore_set(&options.ignore)?;

    let mut members = Vec::new();
    collect_manifests(root, root, &ignore, &mut members)?;
    members.sort();

    let mut manifest_paths = Vec::with_capacity(members.len() + 1);
    if root.join(MANIFEST_FILE).is_file() {
        manifest_paths.push(PathBuf::from(MANIFEST_FILE));
    }
    manifest_paths.extend(members);

    let mut manifests: Vec<(PackageInfo, PackageManifest)> = Vec::new();
    for relative in manifest_paths {
        let path = root.join(&relative);
        let manifest = read_manifest(&path)?;

        let Some(name) = manifest.name.clone() else {
            debug!(path = %relative.display(), "skipping manifest without a name");
            continue;
        };
        if manifest.version.is_none() {
            debug!(package = %name, "skipping manifest without a version");
            continue;
        }
        let version = manifest.parsed_version(&path)?;

        if manifests.iter().any(|(existing, _)| existing.name == name) {
            warn!(package = %name, path = %relative.display(), "duplicate package name, keeping the first");
            continue;
        }

        let package = PackageInfo::new(name, version, relative).with_private(manifest.private);
        manifests.push((package, manifest));
    }

    let names: Vec<String> = manifests.iter().map(|(p, _)| p.name.clone()).collect();
    let packages = manifests
        .into_iter()
        .map(|(package, manifest)| {
            let dependencies = names
                .iter()
                .filter(|name| **name != package.name && manifest.depends_on(name))
                .cloned()
                .collect();
            package.with_dependencies(dependencies)
        })
        .collect();

    Ok(Workspace {
        root: root.to_path_buf(),
        packages,
    })
}

fn build_ignore_set(patterns: &[String]) -> Result<GlobSet, WorkspaceError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| WorkspaceError::GlobPattern {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| WorkspaceError::GlobPattern {
        pattern: patterns.join(", "),
        source,
    })
}

fn collect_manifests(
    base: &Path,
    current: &Path,
    ignore: &GlobSet,
    results: &mut Vec<PathBuf>,
) -> Result<(), WorkspaceError> {
    let read_dir_error = |source| WorkspaceError::ReadDir {
        path: current.to_path_buf(),
        source,
    };
    let entries = std::fs::read_dir(current).map_err(read_dir_error)?;

    for entry in entries {
        let path = entry.map_err(read_dir_error)?.path();
        if !path.is_dir() {
            continue;
        }

        let relative = path.strip_prefix(base).unwrap_or(&path);
        if ignore.is_match(relative) {
            continue;
        }

        if path.join(MANIFEST_FILE).is_file() {
            results.push(relative.join(MANIFEST_FILE));
        }

        collect_manifests(base, &path, ignore, results)?;
    }

    Ok(())
}
