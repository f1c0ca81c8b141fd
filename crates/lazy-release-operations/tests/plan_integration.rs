use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use git2::{Repository, Signature};
use lazy_release_changelog::update_changelog;
use lazy_release_core::RepositoryInfo;
use lazy_release_operations::ActionContext;
use lazy_release_operations::operations::PlanOperation;
use lazy_release_operations::providers::{
    FileSystemChangelogStore, FileSystemManifestStore, Git2Provider,
};
use lazy_release_operations::traits::{ChangelogStore, ManifestStore};
use semver::Version;
use tempfile::TempDir;

fn write(dir: &Path, relative: &str, content: &str) -> anyhow::Result<()> {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

fn commit_all(repo: &Repository, message: &str) -> anyhow::Result<()> {
    let mut index = repo.index()?;
    index.add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)?;
    index.write()?;
    let tree = repo.find_tree(index.write_tree()?)?;
    let signature = Signature::now("Test", "test@example.com")?;

    let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
    repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;
    Ok(())
}

fn setup_monorepo() -> anyhow::Result<(TempDir, Repository)> {
    let dir = TempDir::new()?;
    let repo = Repository::init(dir.path())?;

    write(
        dir.path(),
        "package.json",
        r#"{
  "name": "acme",
  "version": "1.0.0",
  "private": true,
  "devDependencies": { "@acme/core": "workspace:*" }
}
"#,
    )?;
    write(
        dir.path(),
        "packages/core/package.json",
        r#"{
  "name": "@acme/core",
  "version": "0.3.1"
}
"#,
    )?;
    write(
        dir.path(),
        "packages/ui/package.json",
        r#"{
  "name": "@acme/ui",
  "version": "2.0.0",
  "dependencies": {
    "@acme/core": "^0.3.1",
    "react": "^19.0.0"
  }
}
"#,
    )?;
    commit_all(&repo, "chore: initial commit")?;
    Ok((dir, repo))
}

fn context(dir: &TempDir) -> ActionContext {
    ActionContext::new(dir.path())
        .with_repository(RepositoryInfo::from_slug("acme/monorepo").expect("valid slug"))
}

#[test]
fn plans_release_from_history() -> anyhow::Result<()> {
    let (dir, repo) = setup_monorepo()?;
    write(dir.path(), "packages/core/src/index.js", "export {}\n")?;
    commit_all(&repo, "feat(core): add parser (#4)")?;
    write(dir.path(), "README.md", "# acme\n")?;
    commit_all(&repo, "Update readme")?;

    let operation = PlanOperation::new(Git2Provider::new(), FileSystemManifestStore::new());
    let output = operation.execute(&context(&dir))?;

    let subjects: Vec<_> = output.commits.iter().map(|c| c.subject.as_str()).collect();
    assert_eq!(
        subjects,
        vec!["feat(core): add parser (#4)", "chore: initial commit"]
    );

    let versions = output.plan.new_versions();
    assert_eq!(versions["@acme/core"], Version::new(0, 4, 0));
    assert_eq!(versions["@acme/ui"], Version::new(2, 0, 1));
    assert_eq!(versions["acme"], Version::new(1, 0, 1));
    assert!(output.markdown.contains(
        "[compare changes](https://github.com/acme/monorepo/compare/@acme/core@0.3.1...@acme/core@0.4.0)"
    ));
    Ok(())
}

#[test]
fn release_commit_bounds_the_plan() -> anyhow::Result<()> {
    let (dir, repo) = setup_monorepo()?;
    commit_all(&repo, "feat(ui): old feature (#2)")?;
    commit_all(
        &repo,
        &format!(
            "Version Packages (#3)\n\n{}",
            lazy_release_changelog::append_release_id("# 👉 Changelog\n\n")
        ),
    )?;
    commit_all(&repo, "fix(ui): new fix (#5)")?;

    let operation = PlanOperation::new(Git2Provider::new(), FileSystemManifestStore::new());
    let output = operation.execute(&context(&dir))?;

    assert_eq!(output.commits.len(), 1);
    assert_eq!(output.plan.new_versions()["@acme/ui"], Version::new(2, 0, 1));
    assert!(!output.plan.new_versions().contains_key("@acme/core"));
    Ok(())
}

#[test]
fn applying_the_plan_rewrites_files_in_place() -> anyhow::Result<()> {
    let (dir, repo) = setup_monorepo()?;
    commit_all(&repo, "feat(core): add parser")?;

    let manifests = FileSystemManifestStore::new();
    let changelogs = FileSystemChangelogStore::new();
    let output = PlanOperation::new(Git2Provider::new(), FileSystemManifestStore::new())
        .execute(&ActionContext::new(dir.path()))?;
    let workspace = manifests.discover_workspace(dir.path())?;

    for (path, update) in output.plan.manifest_updates(&workspace) {
        manifests.write_update(&path, &update)?;
    }
    let date = NaiveDate::from_ymd_opt(2025, 6, 29).expect("valid date");
    for (package, section) in output.plan.changelog_sections(date) {
        let path = workspace.package_dir(package).join("CHANGELOG.md");
        let existing = changelogs.read(&path)?.unwrap_or_default();
        changelogs.write(
            &path,
            &update_changelog(&existing, &section, package.effective_version()),
        )?;
    }

    let ui = fs::read_to_string(dir.path().join("packages/ui/package.json"))?;
    assert_eq!(
        ui,
        r#"{
  "name": "@acme/ui",
  "version": "2.0.1",
  "dependencies": {
    "@acme/core": "^0.4.0",
    "react": "^19.0.0"
  }
}
"#
    );

    let root = fs::read_to_string(dir.path().join("package.json"))?;
    assert!(root.contains(r#""version": "1.0.1""#));
    assert!(root.contains(r#""@acme/core": "workspace:*""#));

    let changelog = fs::read_to_string(dir.path().join("packages/core/CHANGELOG.md"))?;
    assert_eq!(
        changelog,
        "## 0.4.0 (2025-06-29)\n\n### 🚀 New Features\n- Add parser\n"
    );
    Ok(())
}
