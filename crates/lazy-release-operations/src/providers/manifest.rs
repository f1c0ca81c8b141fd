use std::path::Path;

use lazy_release_manifest::{DependencyChange, ManifestUpdate};
use lazy_release_workspace::{DiscoveryOptions, Workspace};

use crate::Result;
use crate::traits::ManifestStore;

pub struct FileSystemManifestStore {
    options: DiscoveryOptions,
}

impl FileSystemManifestStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: DiscoveryOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(options: DiscoveryOptions) -> Self {
        Self { options }
    }
}

impl Default for FileSystemManifestStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestStore for FileSystemManifestStore {
    fn discover_workspace(&self, project_root: &Path) -> Result<Workspace> {
        Ok(lazy_release_workspace::discover_workspace(
            project_root,
            &self.options,
        )?)
    }

    fn write_update(
        &self,
        manifest_path: &Path,
        update: &ManifestUpdate,
    ) -> Result<Vec<DependencyChange>> {
        Ok(lazy_release_manifest::write_update(manifest_path, update)?)
    }
}
