use std::path::Path;

use clap::Args;
use lazy_release_core::{ChangeRecord, RepositoryInfo};
use lazy_release_operations::ActionContext;
use lazy_release_operations::operations::{PlanOperation, PlanOutput};
use lazy_release_operations::providers::{FileSystemManifestStore, Git2Provider};
use lazy_release_operations::traits::GitProvider;
use serde::Serialize;
use tracing::debug;

use crate::error::{CliError, Result};

#[derive(Args)]
pub(crate) struct PlanArgs {
    /// Repository slug (`owner/repo`) used for comparison links. Defaults to
    /// the `origin` remote.
    #[arg(long)]
    repository: Option<String>,

    /// Print the plan as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct PlanReport<'a> {
    packages: Vec<PackageReport<'a>>,
    records: &'a [ChangeRecord],
    markdown: &'a str,
}

#[derive(Serialize)]
struct PackageReport<'a> {
    name: &'a str,
    version: String,
    new_version: Option<String>,
    indirect: bool,
}

pub(crate) fn run(root: &Path, args: &PlanArgs) -> Result<()> {
    let git = Git2Provider::new();
    let mut context = ActionContext::new(root);
    if let Some(repository) = resolve_repository(&git, root, args.repository.as_deref())? {
        context = context.with_repository(repository);
    }

    let output = PlanOperation::new(git, FileSystemManifestStore::new()).execute(&context)?;

    if args.json {
        print_json(&output)
    } else {
        print_text(&output);
        Ok(())
    }
}

fn resolve_repository(
    git: &Git2Provider,
    root: &Path,
    slug: Option<&str>,
) -> Result<Option<RepositoryInfo>> {
    if let Some(slug) = slug {
        return Ok(Some(RepositoryInfo::from_slug(slug)?));
    }

    let url = match git.remote_url(root) {
        Ok(url) => url,
        Err(err) => {
            debug!(error = %err, "no remote to link comparisons against");
            return Ok(None);
        }
    };
    Ok(url.and_then(|url| match RepositoryInfo::from_url(&url) {
        Ok(repository) => Some(repository),
        Err(err) => {
            debug!(%url, error = %err, "remote is not a recognized forge");
            None
        }
    }))
}

fn print_text(output: &PlanOutput) {
    let packages = &output.plan.packages;
    if packages.changed.is_empty() {
        println!("No packages to release.");
        return;
    }

    for package in &packages.changed {
        print_package_line(package, "");
    }
    for package in &packages.indirect {
        print_package_line(package, " (dependency)");
    }
    println!();
    println!("{}", output.markdown.trim_end());
}

fn print_package_line(package: &lazy_release_core::PackageInfo, suffix: &str) {
    match &package.new_version {
        Some(new_version) => println!(
            "{}: {} -> {new_version}{suffix}",
            package.name, package.version
        ),
        None => println!("{}: {}{suffix}", package.name, package.version),
    }
}

fn print_json(output: &PlanOutput) -> Result<()> {
    let packages = &output.plan.packages;
    let report = PlanReport {
        packages: packages
            .changed
            .iter()
            .map(|p| (p, false))
            .chain(packages.indirect.iter().map(|p| (p, true)))
            .map(|(package, indirect)| PackageReport {
                name: &package.name,
                version: package.version.to_string(),
                new_version: package.new_version.as_ref().map(ToString::to_string),
                indirect,
            })
            .collect(),
        records: &output.plan.records,
        markdown: &output.markdown,
    };

    let json = serde_json::to_string_pretty(&report).map_err(CliError::Serialize)?;
    println!("{json}");
    Ok(())
}
