use std::fmt::Write as _;

use lazy_release_changelog::{has_release_id, increase_heading_level};
use lazy_release_core::RepositoryInfo;
use lazy_release_core::constants::{PR_COMMENT_STATUS_ID, RELEASE_PR_TITLE};
use lazy_release_parse::{has_changelog_section, is_pr_title_valid, records_from_pull_request};
use tracing::{info, warn};

use super::SkipReason;
use super::snapshot::{Snapshot, create_snapshots};
use crate::planner::ReleasePlan;
use crate::traits::{HostingProvider, ManifestStore, PackageManager};
use crate::{ActionContext, OperationError, PullRequestContext, Result};

pub const STATUS_COMMENT_HEADING: &str = "## 🚀 Lazy Release Action";

const INVALID_TITLE: &str =
    "❌ The pull request title does not follow conventional commits, e.g. `feat(ui): add button`.";

pub struct StatusCommentInput {
    pub pull_request: PullRequestContext,
    pub snapshots: bool,
    /// Suffix of snapshot versions, usually the current Unix time in
    /// milliseconds.
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusCommentOutcome {
    Skipped(SkipReason),
    Posted {
        /// Id of the comment that was updated, `None` when a new comment was
        /// created.
        updated: Option<u64>,
        body: String,
        snapshots: Vec<Snapshot>,
    },
}

/// Keeps one comment on an open pull request up to date with the release it
/// would produce.
pub struct StatusCommentOperation<M, H, P> {
    manifests: M,
    hosting: H,
    package_manager: P,
}

impl<M, H, P> StatusCommentOperation<M, H, P>
where
    M: ManifestStore,
    H: HostingProvider,
    P: PackageManager,
{
    pub fn new(manifests: M, hosting: H, package_manager: P) -> Self {
        Self {
            manifests,
            hosting,
            package_manager,
        }
    }

    /// # Errors
    ///
    /// Returns `OperationError::InvalidPullRequestTitle` after posting the
    /// comment when the title is not conventional. Any failure to discover
    /// the workspace, publish snapshots or talk to the hosting service is
    /// returned as is.
    pub fn execute(
        &self,
        context: &ActionContext,
        input: &StatusCommentInput,
    ) -> Result<StatusCommentOutcome> {
        let pr = &input.pull_request;
        if has_release_id(&pr.body) {
            info!(number = pr.number, "skipping status comment on release pull request");
            return Ok(StatusCommentOutcome::Skipped(SkipReason::ReleasePullRequest));
        }

        let title_valid = pr.title == RELEASE_PR_TITLE || is_pr_title_valid(&pr.title);
        if !title_valid {
            warn!(title = %pr.title, "pull request title is not a conventional commit");
        }

        let workspace = self.manifests.discover_workspace(&context.root)?;
        let root_name = workspace.root_package().map(|p| p.name.as_str());
        let records = records_from_pull_request(
            &pr.title,
            &pr.body,
            pr.number,
            root_name,
            context.repository.as_ref(),
        );
        let plan = ReleasePlan::new(records, &workspace);

        let snapshots = if input.snapshots && title_valid && !plan.is_empty() {
            create_snapshots(
                &self.manifests,
                &self.package_manager,
                &workspace,
                &plan.packages,
                input.timestamp,
            )?
        } else {
            Vec::new()
        };

        let body = render_status_comment(&StatusView {
            title_valid,
            has_changelog: has_changelog_section(&pr.body),
            head_sha: pr.head_sha.as_deref(),
            plan: &plan,
            repo: context.repository.as_ref(),
            snapshots: &snapshots,
        });

        let updated = self.post(pr.number, &body)?;

        if !title_valid {
            return Err(OperationError::InvalidPullRequestTitle {
                title: pr.title.clone(),
            });
        }

        Ok(StatusCommentOutcome::Posted {
            updated,
            body,
            snapshots,
        })
    }

    fn post(&self, number: u64, body: &str) -> Result<Option<u64>> {
        let existing = self
            .hosting
            .list_comments(number)?
            .into_iter()
            .find(|comment| comment.body.contains(PR_COMMENT_STATUS_ID));

        match existing {
            Some(comment) => {
                info!(number, comment = comment.id, "updating status comment");
                self.hosting.update_comment(comment.id, body)?;
                Ok(Some(comment.id))
            }
            None => {
                info!(number, "creating status comment");
                self.hosting.create_comment(number, body)?;
                Ok(None)
            }
        }
    }
}

/// Everything the status comment shows.
pub struct StatusView<'a> {
    pub title_valid: bool,
    pub has_changelog: bool,
    pub head_sha: Option<&'a str>,
    pub plan: &'a ReleasePlan,
    pub repo: Option<&'a RepositoryInfo>,
    pub snapshots: &'a [Snapshot],
}

#[must_use]
pub fn render_status_comment(view: &StatusView<'_>) -> String {
    let mut out = format!("{STATUS_COMMENT_HEADING}\n");

    if !view.title_valid {
        let _ = writeln!(out, "{INVALID_TITLE}");
    }

    out.push_str(if view.has_changelog {
        "✅ Changelogs found.\n"
    } else {
        "⚠️ No changelogs found.\n"
    });

    match view.plan.package_count() {
        0 => out.push_str("⚠️ No packages changed.\n"),
        1 => out.push_str("📦 1 package will be updated.\n"),
        n => {
            let _ = writeln!(out, "📦 {n} packages will be updated.");
        }
    }

    if let Some(sha) = view.head_sha {
        let _ = writeln!(out, "Latest commit: {sha}");
    }
    out.push('\n');

    out.push_str(&increase_heading_level(view.plan.markdown(view.repo).trim()));

    if !view.snapshots.is_empty() {
        out.push_str("\n\n## 📸 Snapshots\n");
        let blocks: Vec<String> = view
            .snapshots
            .iter()
            .map(|s| format!("```\n{}\n```", s.install_command))
            .collect();
        out.push_str(&blocks.join("\n\n"));
    }

    let _ = write!(out, "\n\n<!-- {PR_COMMENT_STATUS_ID} -->");
    out
}
