use std::path::Path;

use indexmap::IndexMap;
use semver::Version;
use serde::Deserialize;

use crate::error::ManifestError;

/// Manifest fields whose entries can point at other workspace packages.
pub const DEPENDENCY_FIELDS: [&str; 4] = [
    "dependencies",
    "devDependencies",
    "peerDependencies",
    "optionalDependencies",
];

/// The parts of a `package.json` the release process reads. Everything
/// else in the file is left alone when writing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    pub name: Option<String>,
    pub version: Option<String>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub dependencies: IndexMap<String, String>,
    #[serde(default)]
    pub dev_dependencies: IndexMap<String, String>,
    #[serde(default)]
    pub peer_dependencies: IndexMap<String, String>,
    #[serde(default)]
    pub optional_dependencies: IndexMap<String, String>,
}

impl PackageManifest {
    /// Dependency maps keyed by their manifest field name, in
    /// [`DEPENDENCY_FIELDS`] order.
    #[must_use]
    pub fn dependency_fields(&self) -> [(&'static str, &IndexMap<String, String>); 4] {
        [
            (DEPENDENCY_FIELDS[0], &self.dependencies),
            (DEPENDENCY_FIELDS[1], &self.dev_dependencies),
            (DEPENDENCY_FIELDS[2], &self.peer_dependencies),
            (DEPENDENCY_FIELDS[3], &self.optional_dependencies),
        ]
    }

    /// Whether any dependency field names `package`.
    #[must_use]
    pub fn depends_on(&self, package: &str) -> bool {
        self.dependency_fields()
            .iter()
            .any(|(_, deps)| deps.contains_key(package))
    }

    /// # Errors
    ///
    /// Returns `ManifestError::MissingField` if there is no `version`, or
    /// `ManifestError::InvalidVersion` if it is not valid semver.
    pub fn parsed_version(&self, path: &Path) -> Result<Version, ManifestError> {
        let version = self
            .version
            .as_deref()
            .ok_or_else(|| ManifestError::MissingField {
                path: path.to_path_buf(),
                field: "version".to_string(),
            })?;

        Version::parse(version).map_err(|source| ManifestError::InvalidVersion {
            path: path.to_path_buf(),
            version: version.to_string(),
            source,
        })
    }
}

/// # Errors
///
/// Returns `ManifestError::Read` if the file cannot be read, or
/// `ManifestError::Parse` if the JSON is malformed.
pub fn read_manifest(path: &Path) -> Result<PackageManifest, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| ManifestError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// # Errors
///
/// Returns an error if the manifest cannot be read, has no `version`, or
/// the version is not valid semver.
pub fn read_version(path: &Path) -> Result<Version, ManifestError> {
    read_manifest(path)?.parsed_version(path)
}
