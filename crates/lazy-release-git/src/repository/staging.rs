use crate::Result;

use super::Repository;

impl Repository {
    /// Stages every modified, added and deleted file in the working tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the index cannot be updated.
    pub fn stage_all(&self) -> Result<()> {
        let mut index = self.inner.index()?;

        index.add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)?;
        index.update_all(["*"].iter(), None)?;
        index.write()?;

        Ok(())
    }
}
