use lazy_release_changelog::has_release_id;
use lazy_release_core::Commit;
use lazy_release_git::{CommitInfo, reverted_commit, reverted_pull_request};
use lazy_release_parse::{has_changelog_section, is_pr_title_valid};
use tracing::{debug, warn};

/// Commits on the default branch since the last merged release pull
/// request, newest first, reduced to those carrying changelog information.
///
/// The walk stops at the first release commit, except when that commit is
/// the newest one, has no pull request number, or was reverted by the commit
/// right after it. Commits reverted within the range are dropped together
/// with their revert.
#[must_use]
pub fn collect_release_commits(log: &[CommitInfo], slug: Option<&str>) -> Vec<Commit> {
    let mut unreleased: Vec<&CommitInfo> = Vec::new();

    for (index, commit) in log.iter().enumerate() {
        if has_release_id(&commit.message) {
            if is_reverted_release(log, index, slug) {
                debug!(sha = %commit.sha, "skipping reverted or unusable release commit");
                continue;
            }
            debug!(sha = %commit.sha, "stopping at previous release");
            break;
        }
        unreleased.push(commit);
    }

    let reverted: Vec<&str> = unreleased
        .iter()
        .filter_map(|commit| reverted_commit(&commit.message))
        .collect();
    let unreleased_shas: Vec<&str> = unreleased.iter().map(|&c| c.sha.as_str()).collect();

    unreleased
        .into_iter()
        .filter(|commit| {
            if reverted.iter().any(|sha| commit.sha.starts_with(sha)) {
                debug!(sha = %commit.sha, "dropping reverted commit");
                return false;
            }
            if let Some(target) = reverted_commit(&commit.message) {
                if unreleased_shas.iter().any(|sha| sha.starts_with(target)) {
                    debug!(sha = %commit.sha, "dropping revert");
                    return false;
                }
            }
            true
        })
        .filter(|commit| {
            is_pr_title_valid(commit.subject()) || has_changelog_section(&commit.message)
        })
        .map(|commit| Commit::new(&commit.sha, commit.subject(), commit.body()))
        .collect()
}

fn is_reverted_release(log: &[CommitInfo], index: usize, slug: Option<&str>) -> bool {
    let commit = &log[index];
    let Some(number) = pull_request_number(&commit.message) else {
        warn!(sha = %commit.sha, "release commit does not reference a pull request");
        return true;
    };
    if index == 0 {
        return true;
    }

    let Some(slug) = slug else {
        return false;
    };
    reverted_pull_request(&log[index - 1].message, slug) == Some(number)
}

/// First `#123` reference in a commit message.
fn pull_request_number(message: &str) -> Option<u64> {
    message.match_indices('#').find_map(|(index, _)| {
        let digits: String = message[index + 1..]
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        digits.parse().ok()
    })
}
