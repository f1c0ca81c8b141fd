use crate::{Result, TagInfo};

use super::Repository;

impl Repository {
    /// Creates an annotated tag on HEAD.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag cannot be created or already exists.
    pub fn create_tag(&self, name: &str, message: &str) -> Result<TagInfo> {
        let head = self.inner.head()?.peel_to_commit()?;
        let sig = self.inner.signature()?;

        self.inner
            .tag(name, head.as_object(), &sig, message, false)?;

        Ok(TagInfo {
            name: name.to_string(),
            target_sha: head.id().to_string(),
        })
    }

    /// # Errors
    ///
    /// Returns an error if the reference lookup fails for a reason other than
    /// the tag being absent.
    pub fn tag_exists(&self, name: &str) -> Result<bool> {
        match self.inner.find_reference(&format!("refs/tags/{name}")) {
            Ok(_) => Ok(true),
            Err(err) if err.code() == git2::ErrorCode::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}
