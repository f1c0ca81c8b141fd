use std::path::{Path, PathBuf};

use semver::Version;

use crate::types::ChangeRecord;

/// Strips an npm scope: `@scope/name` becomes `name`.
#[must_use]
pub fn unscoped_name(name: &str) -> &str {
    if name.starts_with('@') {
        name.split_once('/').map_or(name, |(_, rest)| rest)
    } else {
        name
    }
}

/// A package of the workspace as read from its `package.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageInfo {
    pub name: String,
    pub version: Version,
    pub new_version: Option<Version>,
    /// Manifest path relative to the workspace root.
    pub path: PathBuf,
    pub is_root: bool,
    pub is_private: bool,
    /// Names of other workspace packages this package depends on.
    pub dependencies: Vec<String>,
}

impl PackageInfo {
    #[must_use]
    pub fn new(name: impl Into<String>, version: Version, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let is_root = path == Path::new("package.json");
        Self {
            name: name.into(),
            version,
            new_version: None,
            path,
            is_root,
            is_private: false,
            dependencies: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_dependencies(mut self, dependencies: Vec<String>) -> Self {
        self.dependencies = dependencies;
        self
    }

    #[must_use]
    pub fn with_private(mut self, is_private: bool) -> Self {
        self.is_private = is_private;
        self
    }

    #[must_use]
    pub fn unscoped_name(&self) -> &str {
        unscoped_name(&self.name)
    }

    /// Name of the directory holding the manifest. `None` for the root
    /// manifest.
    #[must_use]
    pub fn directory_name(&self) -> Option<&str> {
        self.path
            .parent()
            .and_then(Path::file_name)
            .and_then(|name| name.to_str())
    }

    /// Directory of the manifest relative to the workspace root.
    #[must_use]
    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or(Path::new(""))
    }

    /// Whether `name` refers to this package, either by its unscoped name
    /// or by its directory name.
    #[must_use]
    pub fn matches_name(&self, name: &str) -> bool {
        self.unscoped_name() == name || self.directory_name() == Some(name)
    }

    /// Whether `record` should count towards this package's release.
    #[must_use]
    pub fn is_relevant(&self, record: &ChangeRecord) -> bool {
        if record.packages.is_empty() {
            return self.is_root;
        }
        record.packages.iter().any(|name| self.matches_name(name))
    }

    #[must_use]
    pub fn tag_name(&self) -> String {
        self.tag_name_for(&self.version)
    }

    /// Tag for this package at `version`: `v1.2.3` for the root package,
    /// `name@1.2.3` for every other package.
    #[must_use]
    pub fn tag_name_for(&self, version: &Version) -> String {
        if self.is_root {
            format!("v{version}")
        } else {
            format!("{}@{version}", self.name)
        }
    }

    #[must_use]
    pub fn release_name(&self) -> String {
        if self.is_root {
            format!("v{}", self.version)
        } else {
            format!("{}@{}", self.unscoped_name(), self.version)
        }
    }

    /// Version the package is released at: the computed new version if any.
    #[must_use]
    pub fn effective_version(&self) -> &Version {
        self.new_version.as_ref().unwrap_or(&self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BumpType, ChangeType};

    fn record(packages: &[&str]) -> ChangeRecord {
        ChangeRecord {
            change_type: ChangeType::Fix,
            description: "Fix".to_string(),
            packages: packages.iter().map(ToString::to_string).collect(),
            is_breaking_change: false,
            semver_bump: BumpType::Patch,
            has_explicit_version_bump: false,
        }
    }

    fn package(name: &str, path: &str) -> PackageInfo {
        PackageInfo::new(name, Version::new(1, 0, 0), path)
    }

    #[test]
    fn unscoped_name_strips_scope() {
        assert_eq!(unscoped_name("@acme/ui"), "ui");
        assert_eq!(unscoped_name("ui"), "ui");
        assert_eq!(unscoped_name("@broken"), "@broken");
    }

    #[test]
    fn root_manifest_has_no_directory_name() {
        let root = package("monorepo", "package.json");
        assert!(root.is_root);
        assert_eq!(root.directory_name(), None);
        assert_eq!(root.directory(), Path::new(""));
    }

    #[test]
    fn directory_name_is_manifest_parent() {
        let pkg = package("@acme/ui-kit", "packages/ui/package.json");
        assert!(!pkg.is_root);
        assert_eq!(pkg.directory_name(), Some("ui"));
        assert_eq!(pkg.directory(), Path::new("packages/ui"));
    }

    #[test]
    fn matches_by_unscoped_or_directory_name() {
        let pkg = package("@acme/ui-kit", "packages/ui/package.json");
        assert!(pkg.matches_name("ui-kit"));
        assert!(pkg.matches_name("ui"));
        assert!(!pkg.matches_name("@acme/ui-kit"));
    }

    #[test]
    fn root_records_are_relevant_only_to_root() {
        let root = package("monorepo", "package.json");
        let pkg = package("a", "packages/a/package.json");

        assert!(root.is_relevant(&record(&[])));
        assert!(!pkg.is_relevant(&record(&[])));
        assert!(pkg.is_relevant(&record(&["a"])));
        assert!(!root.is_relevant(&record(&["a"])));
    }

    #[test]
    fn tag_and_release_names() {
        let root = package("monorepo", "package.json");
        let pkg = package("@acme/ui", "packages/ui/package.json");

        assert_eq!(root.tag_name(), "v1.0.0");
        assert_eq!(root.release_name(), "v1.0.0");
        assert_eq!(pkg.tag_name(), "@acme/ui@1.0.0");
        assert_eq!(pkg.release_name(), "ui@1.0.0");
    }

    #[test]
    fn effective_version_prefers_new_version() {
        let mut pkg = package("a", "packages/a/package.json");
        assert_eq!(pkg.effective_version(), &Version::new(1, 0, 0));

        pkg.new_version = Some(Version::new(1, 1, 0));
        assert_eq!(pkg.effective_version(), &Version::new(1, 1, 0));
    }
}
