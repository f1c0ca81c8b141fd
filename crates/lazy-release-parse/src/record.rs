use lazy_release_core::{
    BumpType, ChangeRecord, ChangeType, Commit, RepositoryInfo, unscoped_name,
};
use tracing::{debug, warn};

use crate::description::transform_description;
use crate::header::{
    extract_commit_type, extract_commit_type_parts, extract_description, strip_header_marker,
};
use crate::section::{changelog_items, changelog_section, normalize_newlines};

const EXPLICIT_MARKERS: [(&str, BumpType); 3] = [
    ("#major", BumpType::Major),
    ("#minor", BumpType::Minor),
    ("#patch", BumpType::Patch),
];

/// First `#major`, `#minor` or `#patch` marker in `text`.
#[must_use]
pub fn explicit_bump(text: &str) -> Option<BumpType> {
    text.match_indices('#').find_map(|(index, _)| {
        let candidate = &text[index..];
        EXPLICIT_MARKERS
            .iter()
            .find(|(marker, _)| candidate.starts_with(marker))
            .map(|(_, bump)| *bump)
    })
}

/// Builds a record from a single changelog item such as
/// `feat(ui)!: add table #major` or `feat(ui)#major: add table`.
///
/// Items without a conventional type are logged and dropped. An empty
/// description still yields a record. `root_package_name` is removed from the scope list so that
/// naming the root package explicitly behaves like naming nothing.
#[must_use]
pub fn create_change_record(
    item: &str,
    root_package_name: Option<&str>,
    repo: Option<&RepositoryInfo>,
) -> Option<ChangeRecord> {
    build_record(item, root_package_name, None, repo)
}

fn build_record(
    item: &str,
    root_package_name: Option<&str>,
    pr_number: Option<u64>,
    repo: Option<&RepositoryInfo>,
) -> Option<ChangeRecord> {
    let header = extract_commit_type(item);
    let parts = extract_commit_type_parts(strip_header_marker(header));
    let Some(change_type) = parts.change_type else {
        warn!(item, "skipping changelog item without a conventional type");
        return None;
    };

    let description = extract_description(item);
    let explicit = explicit_bump(header).or_else(|| explicit_bump(description));
    let semver_bump = explicit.unwrap_or(if parts.is_breaking_change {
        BumpType::Major
    } else if change_type == ChangeType::Feat {
        BumpType::Minor
    } else {
        BumpType::Patch
    });

    let root = root_package_name.map(unscoped_name);
    let packages = parts
        .package_names
        .into_iter()
        .filter(|name| Some(unscoped_name(name)) != root)
        .collect();

    Some(ChangeRecord {
        change_type,
        description: transform_description(description, pr_number, repo),
        packages,
        is_breaking_change: parts.is_breaking_change,
        semver_bump,
        has_explicit_version_bump: explicit.is_some(),
    })
}

fn records_from_section(
    section: &str,
    root_package_name: Option<&str>,
    pr_number: Option<u64>,
    repo: Option<&RepositoryInfo>,
) -> Vec<ChangeRecord> {
    changelog_items(section)
        .into_iter()
        .filter_map(|item| build_record(item, root_package_name, pr_number, repo))
        .collect()
}

/// Records for a list of commits, in commit order.
///
/// A commit whose body has a `## Changelog` section contributes one record
/// per item; any other commit contributes its subject.
#[must_use]
pub fn records_from_commits(
    commits: &[Commit],
    root_package_name: Option<&str>,
    repo: Option<&RepositoryInfo>,
) -> Vec<ChangeRecord> {
    let mut records = Vec::new();
    for commit in commits {
        let body = normalize_newlines(&commit.body);
        match changelog_section(&body) {
            Some(section) => {
                debug!(commit = %commit.hash, "reading changelog section from commit body");
                records.extend(records_from_section(section, root_package_name, None, repo));
            }
            None => {
                records.extend(create_change_record(&commit.subject, root_package_name, repo));
            }
        }
    }
    records
}

/// Records for the `## Changelog` section of a markdown document. Empty when
/// there is no such section.
#[must_use]
pub fn records_from_markdown(
    markdown: &str,
    root_package_name: Option<&str>,
    repo: Option<&RepositoryInfo>,
) -> Vec<ChangeRecord> {
    let markdown = normalize_newlines(markdown);
    changelog_section(&markdown)
        .map(|section| records_from_section(section, root_package_name, None, repo))
        .unwrap_or_default()
}

/// Records for an open pull request: the items of its body's changelog
/// section, or its title when the body has none. Descriptions link back to
/// the pull request.
#[must_use]
pub fn records_from_pull_request(
    title: &str,
    body: &str,
    number: u64,
    root_package_name: Option<&str>,
    repo: Option<&RepositoryInfo>,
) -> Vec<ChangeRecord> {
    let body = normalize_newlines(body);
    match changelog_section(&body) {
        Some(section) => records_from_section(section, root_package_name, Some(number), repo),
        None => build_record(title, root_package_name, Some(number), repo)
            .into_iter()
            .collect(),
    }
}
