mod commits;
mod plan;
mod publish;
mod release_pr;
mod snapshot;
mod status_comment;

use std::fmt;

pub use commits::collect_release_commits;
pub use plan::{PlanOperation, PlanOutput};
pub use publish::{PUBLISHED_OUTPUT, PublishInput, PublishOperation, PublishOutcome, PublishReport};
pub use release_pr::{ReleasePrInput, ReleasePrOperation, ReleasePrOutcome, ReleasePrOutput};
pub use snapshot::{SNAPSHOT_DIST_TAG, Snapshot, create_snapshots};
pub use status_comment::{
    STATUS_COMMENT_HEADING, StatusCommentInput, StatusCommentOperation, StatusCommentOutcome,
    StatusView, render_status_comment,
};

/// Why an operation finished without doing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The pull request is the release pull request itself.
    ReleasePullRequest,
    /// No `package.json` with a name and version was found.
    NoPackages,
    /// No record names a workspace package.
    NoChangedPackages,
    /// The release pull request body has no package sections.
    NoReleaseEntries,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::ReleasePullRequest => "pull request is the release pull request",
            Self::NoPackages => "no packages found",
            Self::NoChangedPackages => "no packages changed",
            Self::NoReleaseEntries => "release pull request body lists no packages",
        };
        f.write_str(text)
    }
}
