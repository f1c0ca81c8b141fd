use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::NaiveDate;
use lazy_release_core::{ChangeRecord, ChangeType, PackageInfo, RepositoryInfo};

pub const MARKDOWN_TITLE: &str = "# 👉 Changelog";
pub const BREAKING_CHANGES_HEADING: &str = "### ⚠️ Breaking Changes";
pub const DEPENDENCY_NOTICE: &str = "📦 Updated due to dependency changes";

/// `## name@1.0.0➡️1.1.0`, or `## 1.0.0➡️1.1.0` for the root package.
#[must_use]
pub fn package_heading(package: &PackageInfo) -> String {
    if package.is_root {
        with_new_version(format!("## {}", package.version), package)
    } else {
        named_heading(package)
    }
}

/// `## name@1.0.0➡️1.1.0` for every package, the root included. Used for
/// packages released only because of a dependency.
fn named_heading(package: &PackageInfo) -> String {
    with_new_version(
        format!("## {}@{}", package.unscoped_name(), package.version),
        package,
    )
}

fn with_new_version(mut heading: String, package: &PackageInfo) -> String {
    if let Some(new_version) = &package.new_version {
        let _ = write!(heading, "➡️{new_version}");
    }
    heading
}

/// The `CHANGELOG.md` section for one package release.
#[must_use]
pub fn generate_changelog_content(
    package: &PackageInfo,
    records: &[ChangeRecord],
    date: NaiveDate,
) -> String {
    let mut content = format!(
        "## {} ({})\n\n",
        package.effective_version(),
        date.format("%Y-%m-%d")
    );

    let relevant = relevant_records(package, records);
    if relevant.is_empty() {
        content.push_str(DEPENDENCY_NOTICE);
    } else {
        content.push_str(&render_changes(&relevant));
    }

    content.trim().to_string()
}

/// Body of the release pull request: one section per released package.
///
/// Changed packages without a relevant record are left out. With a known
/// repository each changed package links to the comparison between its old
/// and new tag.
#[must_use]
pub fn generate_markdown(
    changed: &[PackageInfo],
    indirect: &[PackageInfo],
    records: &[ChangeRecord],
    repo: Option<&RepositoryInfo>,
) -> String {
    let mut markdown = format!("{MARKDOWN_TITLE}\n\n");

    for package in changed {
        let relevant = relevant_records(package, records);
        if relevant.is_empty() {
            continue;
        }

        markdown.push_str(&package_heading(package));
        markdown.push_str("\n\n");

        if let (Some(repo), Some(new_version)) = (repo, &package.new_version) {
            let url = repo.comparison_url(
                &package.tag_name_for(&package.version),
                &package.tag_name_for(new_version),
            );
            let _ = write!(markdown, "[compare changes]({url})\n\n");
        }

        markdown.push_str(&render_changes(&relevant));
    }

    for package in indirect {
        let _ = write!(
            markdown,
            "{}\n\n{DEPENDENCY_NOTICE}\n\n",
            named_heading(package)
        );
    }

    markdown
}

fn relevant_records<'a>(package: &PackageInfo, records: &'a [ChangeRecord]) -> Vec<&'a ChangeRecord> {
    records
        .iter()
        .filter(|record| package.is_relevant(record))
        .collect()
}

/// Breaking changes first, then one group per change type in display order.
/// Every group ends with a blank line.
fn render_changes(records: &[&ChangeRecord]) -> String {
    let mut out = String::new();

    let breaking: Vec<&&ChangeRecord> = records.iter().filter(|r| r.is_breaking_change).collect();
    if !breaking.is_empty() {
        out.push_str(BREAKING_CHANGES_HEADING);
        out.push('\n');
        for record in breaking {
            let _ = writeln!(out, "- {}", record.description);
        }
        out.push('\n');
    }

    let mut groups: BTreeMap<ChangeType, Vec<&str>> = BTreeMap::new();
    for record in records.iter().filter(|r| !r.is_breaking_change) {
        groups
            .entry(record.change_type)
            .or_default()
            .push(&record.description);
    }

    for (change_type, descriptions) in groups {
        let _ = writeln!(out, "### {}", change_type.heading());
        for description in descriptions {
            let _ = writeln!(out, "- {description}");
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazy_release_core::BumpType;
    use semver::Version;

    fn record(change_type: ChangeType, description: &str, packages: &[&str]) -> ChangeRecord {
        ChangeRecord {
            change_type,
            description: description.to_string(),
            packages: packages.iter().map(ToString::to_string).collect(),
            is_breaking_change: false,
            semver_bump: BumpType::Patch,
            has_explicit_version_bump: false,
        }
    }

    fn package(name: &str, version: &str, new_version: &str) -> PackageInfo {
        let mut package = PackageInfo::new(
            name,
            Version::parse(version).expect("version"),
            format!("packages/{name}/package.json"),
        );
        package.new_version = Some(Version::parse(new_version).expect("version"));
        package
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 29).expect("valid date")
    }

    #[test]
    fn changelog_content_groups_by_type() {
        let pkg = package("package-a", "1.0.0", "1.0.1");
        let records = vec![
            record(ChangeType::Fix, "Fixed a bug", &["package-a"]),
            record(ChangeType::Feat, "Added new feature", &["package-a"]),
            record(ChangeType::Chore, "Unrelated", &["package-b"]),
        ];

        assert_eq!(
            generate_changelog_content(&pkg, &records, date()),
            "## 1.0.1 (2025-06-29)\n\n### 🚀 New Features\n- Added new feature\n\n### 🐛 Bug Fixes\n- Fixed a bug"
        );
    }

    #[test]
    fn changelog_content_lists_breaking_changes_first() {
        let pkg = package("package-a", "1.0.0", "2.0.0");
        let mut breaking = record(ChangeType::Fix, "Removed option", &["package-a"]);
        breaking.is_breaking_change = true;
        let records = vec![record(ChangeType::Chore, "Tidy", &["package-a"]), breaking];

        assert_eq!(
            generate_changelog_content(&pkg, &records, date()),
            "## 2.0.0 (2025-06-29)\n\n### ⚠️ Breaking Changes\n- Removed option\n\n### 🏠 Chores\n- Tidy"
        );
    }

    #[test]
    fn changelog_content_without_records_uses_notice() {
        let pkg = package("package-b", "1.0.0", "1.0.1");

        assert_eq!(
            generate_changelog_content(&pkg, &[], date()),
            "## 1.0.1 (2025-06-29)\n\n📦 Updated due to dependency changes"
        );
    }

    #[test]
    fn markdown_with_compare_link() {
        let pkg = package("package-a", "1.0.0", "1.0.1");
        let repo = RepositoryInfo::from_slug("test-owner/test-repo").expect("slug");
        let records = vec![record(ChangeType::Fix, "Some description 2", &["package-a"])];

        assert_eq!(
            generate_markdown(&[pkg], &[], &records, Some(&repo)),
            "# 👉 Changelog\n\n## package-a@1.0.0➡️1.0.1\n\n\
             [compare changes](https://github.com/test-owner/test-repo/compare/package-a@1.0.0...package-a@1.0.1)\n\n\
             ### 🐛 Bug Fixes\n- Some description 2\n\n"
        );
    }

    #[test]
    fn markdown_lists_indirect_packages() {
        let changed = package("@acme/core", "0.3.1", "0.4.0");
        let indirect = package("@acme/ui", "2.0.0", "2.0.1");
        let records = vec![record(ChangeType::Feat, "New api", &["core"])];

        let markdown = generate_markdown(&[changed], &[indirect], &records, None);

        assert_eq!(
            markdown,
            "# 👉 Changelog\n\n## core@0.3.1➡️0.4.0\n\n### 🚀 New Features\n- New api\n\n\
             ## ui@2.0.0➡️2.0.1\n\n📦 Updated due to dependency changes\n\n"
        );
    }

    #[test]
    fn indirect_root_heading_keeps_package_name() {
        let changed = package("@acme/core", "0.3.1", "0.3.2");
        let mut root = PackageInfo::new("@acme/monorepo", Version::new(1, 4, 0), "package.json");
        root.new_version = Some(Version::new(1, 4, 1));
        let records = vec![record(ChangeType::Fix, "Parser", &["core"])];

        let markdown = generate_markdown(&[changed], &[root], &records, None);

        assert!(markdown.ends_with(
            "## monorepo@1.4.0➡️1.4.1\n\n📦 Updated due to dependency changes\n\n"
        ));
    }

    #[test]
    fn markdown_skips_changed_package_without_records() {
        let pkg = package("package-a", "1.0.0", "1.0.1");
        let markdown = generate_markdown(&[pkg], &[], &[], None);
        assert_eq!(markdown, "# 👉 Changelog\n\n");
    }

    #[test]
    fn root_heading_has_no_name() {
        let mut root = PackageInfo::new("monorepo", Version::new(1, 0, 0), "package.json");
        assert_eq!(package_heading(&root), "## 1.0.0");

        root.new_version = Some(Version::new(1, 1, 0));
        assert_eq!(package_heading(&root), "## 1.0.0➡️1.1.0");
    }
}
