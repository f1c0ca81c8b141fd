mod calculator;
mod error;

pub use calculator::{apply_indirect_version, apply_new_version, resolve_bump};
pub use error::VersionError;

use lazy_release_core::BumpType;
use semver::{BuildMetadata, Prerelease, Version};

pub type Result<T> = std::result::Result<T, VersionError>;

/// Increments `version` by `bump_type`.
///
/// Pre-release versions are first released at their own core version when
/// the bump does not go past it: `2.0.0-beta.1` bumped by major is `2.0.0`,
/// `1.2.4-rc.0` bumped by patch is `1.2.4`.
#[must_use]
pub fn bump_version(version: &Version, bump_type: BumpType) -> Version {
    let mut new_version = version.clone();
    let is_prerelease = !version.pre.is_empty();

    match bump_type {
        BumpType::Major => {
            if !(is_prerelease && version.minor == 0 && version.patch == 0) {
                new_version.major += 1;
            }
            new_version.minor = 0;
            new_version.patch = 0;
        }
        BumpType::Minor => {
            if !(is_prerelease && version.patch == 0) {
                new_version.minor += 1;
            }
            new_version.patch = 0;
        }
        BumpType::Patch => {
            if !is_prerelease {
                new_version.patch += 1;
            }
        }
    }

    new_version.pre = Prerelease::EMPTY;
    new_version.build = BuildMetadata::EMPTY;
    new_version
}

/// Whether `version` is in the `0.x` range, where breaking changes only
/// bump the minor component.
#[must_use]
pub fn is_zero_version(version: &Version) -> bool {
    version.major == 0
}

/// `1.2.3` becomes `1.2.3-snapshot-<timestamp>`.
///
/// # Errors
///
/// Returns `VersionError::InvalidPrerelease` if the timestamp does not form a
/// valid pre-release identifier.
pub fn snapshot_version(version: &Version, timestamp: impl std::fmt::Display) -> Result<Version> {
    let identifier = format!("snapshot-{timestamp}");
    let pre = Prerelease::new(&identifier).map_err(|source| VersionError::InvalidPrerelease {
        identifier: identifier.clone(),
        source,
    })?;

    Ok(Version {
        pre,
        build: BuildMetadata::EMPTY,
        ..version.clone()
    })
}

/// Whether `version` was produced by [`snapshot_version`].
#[must_use]
pub fn is_snapshot_version(version: &Version) -> bool {
    version.pre.as_str().starts_with("snapshot-")
}
