use std::path::Path;

use lazy_release_changelog::{Changelog, ChangelogError};

use crate::Result;
use crate::traits::ChangelogStore;

pub struct FileSystemChangelogStore;

impl FileSystemChangelogStore {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemChangelogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangelogStore for FileSystemChangelogStore {
    fn read(&self, path: &Path) -> Result<Option<String>> {
        if !path.exists() {
            return Ok(None);
        }
        let changelog = Changelog::from_file(path)?;
        Ok(Some(changelog.content().to_string()))
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ChangelogError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        Changelog::from_content(content).write_to_file(path)?;
        Ok(())
    }
}
