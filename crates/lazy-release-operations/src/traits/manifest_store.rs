use std::path::Path;

use lazy_release_manifest::{DependencyChange, ManifestUpdate};
use lazy_release_workspace::Workspace;

use crate::Result;

pub trait ManifestStore: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the workspace manifests cannot be read.
    fn discover_workspace(&self, project_root: &Path) -> Result<Workspace>;

    /// # Errors
    ///
    /// Returns an error if the manifest cannot be read, parsed, or written.
    fn write_update(
        &self,
        manifest_path: &Path,
        update: &ManifestUpdate,
    ) -> Result<Vec<DependencyChange>>;
}
