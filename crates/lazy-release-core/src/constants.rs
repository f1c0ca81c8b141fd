//! Markers and names shared between the status comment, the release pull
//! request and the publish step.

/// Branch the release pull request is opened from.
pub const RELEASE_BRANCH: &str = "lazy-release/main";

/// Title of the release pull request. Pull requests with this title skip
/// title validation.
pub const RELEASE_PR_TITLE: &str = "Version Packages";

/// Identifies the release pull request body and the commit it is merged as.
pub const RELEASE_ID: &str = "9f1c2a7e-3b4d-4c8e-a6f5-0d2e7b9c1a34";

/// Identifies the status comment so it can be updated in place.
pub const PR_COMMENT_STATUS_ID: &str = "b3da20ce-59b6-4bbd-a6e3-6d625f45d008";

pub const COMMIT_MESSAGE: &str = "chore: update release branch";

pub const DEFAULT_BRANCH: &str = "main";

pub const CHANGELOG_FILE: &str = "CHANGELOG.md";

pub const MANIFEST_FILE: &str = "package.json";
