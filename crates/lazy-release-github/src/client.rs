use octocrab::Octocrab;
use octocrab::models::CommentId;
use octocrab::params::State;
use tokio::runtime::Runtime;
use tracing::{debug, info};

use crate::{GitHubError, IssueComment, PullRequest, Release, Result};

pub struct GitHubClient {
    runtime: Runtime,
    octocrab: Octocrab,
    owner: String,
    repo: String,
}

impl GitHubClient {
    /// Creates a client for `owner/repo` authenticated with `token`.
    ///
    /// # Errors
    ///
    /// Returns [`GitHubError::MissingToken`] for an empty token and an error
    /// if the runtime or HTTP client cannot be built.
    pub fn new(token: &str, owner: impl Into<String>, repo: impl Into<String>) -> Result<Self> {
        if token.trim().is_empty() {
            return Err(GitHubError::MissingToken);
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(GitHubError::Runtime)?;

        // The HTTP client spawns its connection pool on the current runtime.
        let octocrab = {
            let _guard = runtime.enter();
            Octocrab::builder()
                .personal_token(token.to_string())
                .build()
                .map_err(GitHubError::Client)?
        };

        Ok(Self {
            runtime,
            octocrab,
            owner: owner.into(),
            repo: repo.into(),
        })
    }

    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[must_use]
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Open pull request from `head` into `base`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`GitHubError::Api`] if the request fails.
    pub fn find_open_pull_request(&self, head: &str, base: &str) -> Result<Option<PullRequest>> {
        let head = format!("{}:{head}", self.owner);
        debug!(%head, %base, "listing pull requests");

        let page = self
            .runtime
            .block_on(
                self.octocrab
                    .pulls(&self.owner, &self.repo)
                    .list()
                    .state(State::Open)
                    .head(head)
                    .base(base)
                    .send(),
            )
            .map_err(|source| GitHubError::Api {
                operation: "list pull requests",
                source,
            })?;

        Ok(page.items.into_iter().next().map(PullRequest::from))
    }

    /// # Errors
    ///
    /// Returns [`GitHubError::Api`] if the request fails.
    pub fn create_pull_request(
        &self,
        title: &str,
        head: &str,
        base: &str,
        body: &str,
    ) -> Result<PullRequest> {
        let pr = self
            .runtime
            .block_on(
                self.octocrab
                    .pulls(&self.owner, &self.repo)
                    .create(title, head, base)
                    .body(body)
                    .send(),
            )
            .map_err(|source| GitHubError::Api {
                operation: "create pull request",
                source,
            })?;

        info!(number = pr.number, "created pull request");
        Ok(pr.into())
    }

    /// # Errors
    ///
    /// Returns [`GitHubError::Api`] if the request fails.
    pub fn update_pull_request(&self, number: u64, title: &str, body: &str) -> Result<PullRequest> {
        let pr = self
            .runtime
            .block_on(
                self.octocrab
                    .pulls(&self.owner, &self.repo)
                    .update(number)
                    .title(title)
                    .body(body)
                    .send(),
            )
            .map_err(|source| GitHubError::Api {
                operation: "update pull request",
                source,
            })?;

        info!(number, "updated pull request");
        Ok(pr.into())
    }

    /// Every comment on issue or pull request `number`, across all pages.
    ///
    /// # Errors
    ///
    /// Returns [`GitHubError::Api`] if a request fails.
    pub fn list_issue_comments(&self, number: u64) -> Result<Vec<IssueComment>> {
        let comments = self
            .runtime
            .block_on(async {
                let page = self
                    .octocrab
                    .issues(&self.owner, &self.repo)
                    .list_comments(number)
                    .per_page(100)
                    .send()
                    .await?;
                self.octocrab.all_pages(page).await
            })
            .map_err(|source| GitHubError::Api {
                operation: "list comments",
                source,
            })?;

        Ok(comments.into_iter().map(IssueComment::from).collect())
    }

    /// # Errors
    ///
    /// Returns [`GitHubError::Api`] if the request fails.
    pub fn create_issue_comment(&self, number: u64, body: &str) -> Result<IssueComment> {
        let comment = self
            .runtime
            .block_on(
                self.octocrab
                    .issues(&self.owner, &self.repo)
                    .create_comment(number, body),
            )
            .map_err(|source| GitHubError::Api {
                operation: "create comment",
                source,
            })?;

        Ok(comment.into())
    }

    /// # Errors
    ///
    /// Returns [`GitHubError::Api`] if the request fails.
    pub fn update_issue_comment(&self, id: u64, body: &str) -> Result<IssueComment> {
        let comment = self
            .runtime
            .block_on(
                self.octocrab
                    .issues(&self.owner, &self.repo)
                    .update_comment(CommentId(id), body),
            )
            .map_err(|source| GitHubError::Api {
                operation: "update comment",
                source,
            })?;

        Ok(comment.into())
    }

    /// # Errors
    ///
    /// Returns [`GitHubError::Api`] if the request fails, including when a
    /// release for `tag` already exists.
    pub fn create_release(&self, tag: &str, name: &str, body: &str) -> Result<Release> {
        let release = self
            .runtime
            .block_on(
                self.octocrab
                    .repos(&self.owner, &self.repo)
                    .releases()
                    .create(tag)
                    .name(name)
                    .body(body)
                    .send(),
            )
            .map_err(|source| GitHubError::Api {
                operation: "create release",
                source,
            })?;

        info!(%tag, url = %release.html_url, "created release");
        Ok(release.into())
    }
}
