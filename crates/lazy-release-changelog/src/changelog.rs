use std::path::Path;

use semver::Version;

use crate::error::ChangelogError;

/// Inserts `new_section` for `new_version` into an existing changelog.
///
/// A section already present for that version is replaced in place;
/// otherwise the new section goes on top, separated from older releases by
/// two blank lines.
#[must_use]
pub fn update_changelog(existing: &str, new_section: &str, new_version: &Version) -> String {
    if let Some(replaced) = replace_changelog_section(existing, new_section, new_version) {
        return replaced;
    }

    if existing.trim().is_empty() {
        format!("{new_section}\n")
    } else {
        format!("{new_section}\n\n\n{existing}")
    }
}

/// Replaces the section headed `## {version}` (optionally followed by a
/// date) with `new_section`. `None` when there is no such section.
#[must_use]
pub fn replace_changelog_section(
    existing: &str,
    new_section: &str,
    version: &Version,
) -> Option<String> {
    let start = find_version_heading(existing, version)?;
    let after_heading = existing[start..]
        .find('\n')
        .map_or(existing.len(), |offset| start + offset);

    let mut result = String::with_capacity(existing.len() + new_section.len());
    result.push_str(&existing[..start]);
    result.push_str(new_section);

    if let Some(end) = existing[after_heading..].find("\n## ") {
        result.push_str("\n\n");
        result.push_str(&existing[after_heading + end..]);
    }

    Some(result)
}

fn find_version_heading(content: &str, version: &Version) -> Option<usize> {
    let heading = format!("## {version}");
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        let text = line.trim_end();
        if let Some(rest) = text.strip_prefix(&heading) {
            if rest.is_empty() || rest.starts_with(' ') {
                return Some(offset);
            }
        }
        offset += line.len();
    }
    None
}

/// A package's `CHANGELOG.md`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changelog {
    content: String,
}

impl Changelog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_content(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    /// # Errors
    ///
    /// Returns `ChangelogError::Read` if the file cannot be read.
    pub fn from_file(path: &Path) -> Result<Self, ChangelogError> {
        let content = std::fs::read_to_string(path).map_err(|source| ChangelogError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self { content })
    }

    /// Like [`Changelog::from_file`], but a missing file is an empty
    /// changelog.
    ///
    /// # Errors
    ///
    /// Returns `ChangelogError::Read` if the file exists but cannot be read.
    pub fn from_file_or_default(path: &Path) -> Result<Self, ChangelogError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Self { content }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::new()),
            Err(source) => Err(ChangelogError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn add_release(&mut self, section: &str, version: &Version) {
        self.content = update_changelog(&self.content, section, version);
    }

    /// # Errors
    ///
    /// Returns `ChangelogError::Write` if the file cannot be written.
    pub fn write_to_file(&self, path: &Path) -> Result<(), ChangelogError> {
        std::fs::write(path, &self.content).map_err(|source| ChangelogError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}
