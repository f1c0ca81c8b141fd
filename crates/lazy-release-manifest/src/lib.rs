mod error;
mod locate;
mod reader;
mod specifier;
mod writer;

pub use error::ManifestError;
pub use reader::{DEPENDENCY_FIELDS, PackageManifest, read_manifest, read_version};
pub use specifier::{rewrite_specifier, version_prefix};
pub use writer::{
    DependencyChange, ManifestUpdate, apply_update, verify_version, write_update, write_version,
};

pub type Result<T> = std::result::Result<T, ManifestError>;
