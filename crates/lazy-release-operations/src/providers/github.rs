use lazy_release_github::{GitHubClient, IssueComment};
use tracing::info;

use crate::Result;
use crate::traits::{HostingProvider, PullRequestDraft};

pub struct GitHubHostingProvider {
    client: GitHubClient,
}

impl GitHubHostingProvider {
    #[must_use]
    pub fn new(client: GitHubClient) -> Self {
        Self { client }
    }
}

impl HostingProvider for GitHubHostingProvider {
    fn create_or_update_pull_request(&self, draft: &PullRequestDraft) -> Result<u64> {
        if let Some(existing) = self
            .client
            .find_open_pull_request(&draft.head, &draft.base)?
        {
            info!(number = existing.number, "updating existing pull request");
            let pr = self
                .client
                .update_pull_request(existing.number, &draft.title, &draft.body)?;
            return Ok(pr.number);
        }

        let pr = self
            .client
            .create_pull_request(&draft.title, &draft.head, &draft.base, &draft.body)?;
        Ok(pr.number)
    }

    fn list_comments(&self, number: u64) -> Result<Vec<IssueComment>> {
        Ok(self.client.list_issue_comments(number)?)
    }

    fn create_comment(&self, number: u64, body: &str) -> Result<()> {
        self.client.create_issue_comment(number, body)?;
        Ok(())
    }

    fn update_comment(&self, comment_id: u64, body: &str) -> Result<()> {
        self.client.update_issue_comment(comment_id, body)?;
        Ok(())
    }

    fn create_release(&self, tag_name: &str, name: &str, body: &str) -> Result<()> {
        self.client.create_release(tag_name, name, body)?;
        Ok(())
    }
}
