use std::fmt;
use std::path::Path;

use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManagerKind {
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl PackageManagerKind {
    /// Lockfiles in detection order.
    pub const LOCKFILES: [(&'static str, Self); 5] = [
        ("pnpm-lock.yaml", Self::Pnpm),
        ("yarn.lock", Self::Yarn),
        ("bun.lock", Self::Bun),
        ("bun.lockb", Self::Bun),
        ("package-lock.json", Self::Npm),
    ];

    #[must_use]
    pub const fn program(self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Pnpm => "pnpm",
            Self::Yarn => "yarn",
            Self::Bun => "bun",
        }
    }

    /// Command a user runs to add `package` as a dependency.
    #[must_use]
    pub fn add_command(self, package: &str) -> String {
        match self {
            Self::Npm => format!("npm install {package}"),
            Self::Pnpm | Self::Yarn | Self::Bun => format!("{} add {package}", self.program()),
        }
    }

    /// Arguments for publishing the package in the current directory.
    #[must_use]
    pub fn publish_args(self, dist_tag: Option<&str>) -> Vec<&str> {
        let mut args = vec!["publish"];
        if let Some(tag) = dist_tag {
            args.extend(["--tag", tag]);
        }
        if self == Self::Pnpm {
            // pnpm refuses to publish from a dirty tree or a non-default branch.
            args.push("--no-git-checks");
        }
        args
    }
}

impl fmt::Display for PackageManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishResult {
    Published,
    /// The registry already has this version.
    AlreadyExists,
}

pub trait PackageManager: Send + Sync {
    /// # Errors
    ///
    /// Returns `OperationError::PackageManagerNotDetected` if `project_root`
    /// has no recognizable lockfile.
    fn detect(&self, project_root: &Path) -> Result<PackageManagerKind>;

    /// # Errors
    ///
    /// Returns an error if the install command fails.
    fn install(&self, kind: PackageManagerKind, dir: &Path) -> Result<()>;

    /// # Errors
    ///
    /// Returns an error if the publish command fails for a reason other than
    /// the version already existing.
    fn publish(
        &self,
        kind: PackageManagerKind,
        dir: &Path,
        dist_tag: Option<&str>,
    ) -> Result<PublishResult>;

    /// Stores `token` for `registry` (a host such as `registry.npmjs.org`).
    ///
    /// # Errors
    ///
    /// Returns an error if the registry configuration cannot be written.
    fn configure_auth(&self, project_root: &Path, registry: &str, token: &str) -> Result<()>;
}
