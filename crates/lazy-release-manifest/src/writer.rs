use std::ops::Range;
use std::path::Path;

use indexmap::IndexMap;
use semver::Version;

use crate::error::ManifestError;
use crate::locate::{self, StringValue};
use crate::reader::{PackageManifest, read_version};
use crate::specifier::rewrite_specifier;

/// Edits to apply to one manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestUpdate {
    pub version: Option<Version>,
    /// New versions of workspace packages, keyed by full package name.
    pub dependencies: IndexMap<String, Version>,
}

impl ManifestUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.version.is_none() && self.dependencies.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyChange {
    pub field: &'static str,
    pub name: String,
    pub from: String,
    pub to: String,
}

/// Applies `update` to the manifest text and returns the new text. Bytes
/// outside the edited string values are preserved.
///
/// # Errors
///
/// Returns `ManifestError::Parse` if `content` is not valid JSON, or
/// `ManifestError::MissingField` when a version is requested for a manifest
/// without a `version` field.
pub fn apply_update(
    content: &str,
    path: &Path,
    update: &ManifestUpdate,
) -> Result<(String, Vec<DependencyChange>), ManifestError> {
    let manifest: PackageManifest =
        serde_json::from_str(content).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let values = locate::string_values(content).ok_or_else(|| ManifestError::MissingField {
        path: path.to_path_buf(),
        field: "<root object>".to_string(),
    })?;

    let mut edits: Vec<(Range<usize>, String)> = Vec::new();

    if let Some(version) = &update.version {
        let located = locate::find(&values, &["version"]).ok_or_else(|| {
            ManifestError::MissingField {
                path: path.to_path_buf(),
                field: "version".to_string(),
            }
        })?;
        edits.push((located.span.clone(), version.to_string()));
    }

    let mut changes = Vec::new();
    for (field, deps) in manifest.dependency_fields() {
        for (name, current) in deps {
            let Some(new_version) = update.dependencies.get(name) else {
                continue;
            };
            let Some(rewritten) = rewrite_specifier(current, new_version) else {
                continue;
            };
            let Some(StringValue { span, .. }) = locate::find(&values, &[field, name.as_str()])
            else {
                continue;
            };
            edits.push((span.clone(), escape(&rewritten)));
            changes.push(DependencyChange {
                field,
                name: name.clone(),
                from: current.clone(),
                to: rewritten,
            });
        }
    }

    edits.sort_by_key(|(span, _)| std::cmp::Reverse(span.start));
    let mut output = content.to_string();
    for (span, replacement) in edits {
        output.replace_range(span, &replacement);
    }

    Ok((output, changes))
}

/// # Errors
///
/// Returns an error if the manifest cannot be read, parsed, or written.
pub fn write_update(
    path: &Path,
    update: &ManifestUpdate,
) -> Result<Vec<DependencyChange>, ManifestError> {
    let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let (output, changes) = apply_update(&content, path, update)?;
    if output != content {
        std::fs::write(path, output).map_err(|source| ManifestError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    }
    Ok(changes)
}

/// # Errors
///
/// Returns an error if the manifest cannot be read, parsed, or written.
pub fn write_version(path: &Path, version: &Version) -> Result<(), ManifestError> {
    let update = ManifestUpdate {
        version: Some(version.clone()),
        dependencies: IndexMap::new(),
    };
    write_update(path, &update).map(|_| ())
}

/// # Errors
///
/// Returns `ManifestError::VerificationFailed` if the version in the manifest
/// does not match the expected version.
pub fn verify_version(path: &Path, expected: &Version) -> Result<(), ManifestError> {
    let actual = read_version(path)?;

    if actual != *expected {
        return Err(ManifestError::VerificationFailed {
            path: path.to_path_buf(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        });
    }

    Ok(())
}

fn escape(value: &str) -> String {
    let quoted = serde_json::Value::String(value.to_string()).to_string();
    quoted[1..quoted.len() - 1].to_string()
}
