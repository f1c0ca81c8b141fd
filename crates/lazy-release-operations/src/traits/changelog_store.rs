use std::path::Path;

use crate::Result;

pub trait ChangelogStore: Send + Sync {
    /// Current content of the changelog, `None` when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing changelog cannot be read.
    fn read(&self, path: &Path) -> Result<Option<String>>;

    /// # Errors
    ///
    /// Returns an error if the changelog cannot be written.
    fn write(&self, path: &Path, content: &str) -> Result<()>;
}
