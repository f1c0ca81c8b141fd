use std::path::Path;
use std::process::{Command, Output};

use tracing::{debug, info, warn};

use crate::traits::{PackageManager, PackageManagerKind, PublishResult};
use crate::{OperationError, Result};

/// Registry responses that mean the version is already published.
const ALREADY_PUBLISHED_MARKERS: [&str; 3] = [
    "409 Conflict",
    "EPUBLISHCONFLICT",
    "cannot publish over the previously published versions",
];

/// Runs npm, pnpm, yarn or bun as a subprocess.
pub struct NodePackageManager;

impl NodePackageManager {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn run(program: &str, args: &[&str], dir: &Path) -> Result<Output> {
        let command = format!("{program} {}", args.join(" "));
        info!(%command, dir = %dir.display(), "running package manager");

        let output = Command::new(program)
            .args(args)
            .current_dir(dir)
            .output()
            .map_err(|source| OperationError::CommandSpawn {
                command: command.clone(),
                source,
            })?;

        debug!(
            stdout = %String::from_utf8_lossy(&output.stdout),
            stderr = %String::from_utf8_lossy(&output.stderr),
            "package manager finished"
        );
        Ok(output)
    }

    fn failure(program: &str, args: &[&str], output: &Output) -> OperationError {
        OperationError::CommandFailed {
            command: format!("{program} {}", args.join(" ")),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}

impl Default for NodePackageManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Package manager owning the lockfile in `root`.
///
/// # Errors
///
/// Returns `OperationError::PackageManagerNotDetected` if no known lockfile
/// exists.
pub fn detect_package_manager(root: &Path) -> Result<PackageManagerKind> {
    PackageManagerKind::LOCKFILES
        .iter()
        .find(|(lockfile, _)| root.join(lockfile).is_file())
        .map(|(_, kind)| *kind)
        .ok_or_else(|| OperationError::PackageManagerNotDetected {
            path: root.to_path_buf(),
        })
}

fn is_already_published(output: &Output) -> bool {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    ALREADY_PUBLISHED_MARKERS
        .iter()
        .any(|marker| stderr.contains(marker) || stdout.contains(marker))
}

impl PackageManager for NodePackageManager {
    fn detect(&self, project_root: &Path) -> Result<PackageManagerKind> {
        let kind = detect_package_manager(project_root)?;
        debug!(%kind, "detected package manager");
        Ok(kind)
    }

    fn install(&self, kind: PackageManagerKind, dir: &Path) -> Result<()> {
        let args = ["install"];
        let output = Self::run(kind.program(), &args, dir)?;
        if !output.status.success() {
            return Err(Self::failure(kind.program(), &args, &output));
        }
        Ok(())
    }

    fn publish(
        &self,
        kind: PackageManagerKind,
        dir: &Path,
        dist_tag: Option<&str>,
    ) -> Result<PublishResult> {
        let args = kind.publish_args(dist_tag);
        let output = Self::run(kind.program(), &args, dir)?;

        if output.status.success() {
            return Ok(PublishResult::Published);
        }
        if is_already_published(&output) {
            warn!(dir = %dir.display(), "version already published");
            return Ok(PublishResult::AlreadyExists);
        }
        Err(Self::failure(kind.program(), &args, &output))
    }

    fn configure_auth(&self, project_root: &Path, registry: &str, token: &str) -> Result<()> {
        let setting = format!("//{registry}/:_authToken={token}");
        let args = ["config", "set", setting.as_str()];
        let output = Self::run("npm", &args, project_root)?;
        if !output.status.success() {
            // Keep the token out of the error message.
            return Err(OperationError::CommandFailed {
                command: format!("npm config set //{registry}/:_authToken=***"),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}
