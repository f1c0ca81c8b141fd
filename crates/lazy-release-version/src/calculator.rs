use lazy_release_core::{BumpType, ChangeRecord, PackageInfo};
use tracing::debug;

use crate::{bump_version, is_zero_version};

/// Bump a package receives from the records relevant to it.
///
/// An explicit `#major`/`#minor`/`#patch` marker on any relevant record
/// decides the bump outright; with several markers the strongest wins.
/// Otherwise a breaking change is a major bump (minor on `0.x`), a feature
/// is a minor bump, and everything else is a patch.
#[must_use]
pub fn resolve_bump(package: &PackageInfo, records: &[ChangeRecord]) -> BumpType {
    let relevant: Vec<&ChangeRecord> = records
        .iter()
        .filter(|record| package.is_relevant(record))
        .collect();

    let explicit = relevant
        .iter()
        .filter(|record| record.has_explicit_version_bump)
        .map(|record| record.semver_bump)
        .max();
    if let Some(bump) = explicit {
        return bump;
    }

    let zero = is_zero_version(&package.version);
    let mut bump = BumpType::Patch;
    for record in relevant {
        if record.is_breaking_change {
            if zero {
                bump = BumpType::Minor;
                continue;
            }
            return BumpType::Major;
        }
        if record.semver_bump == BumpType::Minor {
            bump = BumpType::Minor;
        }
    }
    bump
}

/// Sets `new_version` from the records relevant to the package.
pub fn apply_new_version(package: &mut PackageInfo, records: &[ChangeRecord]) {
    let bump = resolve_bump(package, records);
    let new_version = bump_version(&package.version, bump);
    debug!(
        package = %package.name,
        from = %package.version,
        to = %new_version,
        bump = %bump,
        "resolved new version"
    );
    package.new_version = Some(new_version);
}

/// Packages released only because a dependency changed get a patch bump.
pub fn apply_indirect_version(package: &mut PackageInfo) {
    package.new_version = Some(bump_version(&package.version, BumpType::Patch));
}
