use lazy_release_core::{ChangeRecord, PackageInfo};

/// Packages a set of records releases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangedPackages {
    /// Packages named by at least one record.
    pub changed: Vec<PackageInfo>,
    /// Packages depending on a changed package without being changed
    /// themselves.
    pub indirect: Vec<PackageInfo>,
}

impl ChangedPackages {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changed.is_empty() && self.indirect.is_empty()
    }

    /// Changed packages followed by indirect ones.
    pub fn iter(&self) -> impl Iterator<Item = &PackageInfo> {
        self.changed.iter().chain(&self.indirect)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut PackageInfo> {
        self.changed.iter_mut().chain(&mut self.indirect)
    }
}

/// Splits `all_packages` into the packages the records change directly and
/// their direct dependents.
///
/// Propagation stops after one hop: a dependent of an indirect package is
/// not released. Records naming packages that are not in the workspace are
/// ignored. Both lists keep workspace order.
#[must_use]
pub fn resolve_changed_packages(
    records: &[ChangeRecord],
    all_packages: &[PackageInfo],
) -> ChangedPackages {
    let changes_root = records.iter().any(ChangeRecord::targets_root);
    let named: Vec<&str> = records
        .iter()
        .flat_map(|record| record.packages.iter().map(String::as_str))
        .collect();

    let changed: Vec<PackageInfo> = all_packages
        .iter()
        .filter(|package| {
            (package.is_root && changes_root)
                || named.iter().any(|name| package.matches_name(name))
        })
        .cloned()
        .collect();

    let indirect = all_packages
        .iter()
        .filter(|package| !changed.iter().any(|c| c.name == package.name))
        .filter(|package| {
            package
                .dependencies
                .iter()
                .any(|dependency| changed.iter().any(|c| &c.name == dependency))
        })
        .cloned()
        .collect();

    ChangedPackages { changed, indirect }
}
