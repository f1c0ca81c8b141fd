use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use lazy_release_git::{CommitInfo, TagInfo};
use lazy_release_github::IssueComment;
use lazy_release_manifest::{DependencyChange, ManifestUpdate};
use lazy_release_workspace::Workspace;

use crate::traits::{
    ChangelogStore, GitProvider, HostingProvider, ManifestStore, OutputSink, PackageManager,
    PackageManagerKind, PublishResult, PullRequestDraft,
};
use crate::{OperationError, Result};

pub struct MockGitProvider {
    commits_log: Vec<CommitInfo>,
    head_message: String,
    remote_url: Option<String>,
    has_changes: bool,
    remote_tags: Mutex<Vec<String>>,
    tags_created: Mutex<Vec<(String, String)>>,
    tags_pushed: Mutex<usize>,
    commits: Mutex<Vec<String>>,
    branches: Mutex<Vec<(String, String)>>,
    checkouts: Mutex<Vec<String>>,
    identity_configured: Mutex<bool>,
}

impl MockGitProvider {
    #[must_use]
    pub fn new() -> Self {
        Self {
            commits_log: Vec::new(),
            head_message: String::new(),
            remote_url: None,
            has_changes: true,
            remote_tags: Mutex::new(Vec::new()),
            tags_created: Mutex::new(Vec::new()),
            tags_pushed: Mutex::new(0),
            commits: Mutex::new(Vec::new()),
            branches: Mutex::new(Vec::new()),
            checkouts: Mutex::new(Vec::new()),
            identity_configured: Mutex::new(false),
        }
    }

    /// Commits returned by `list_commits`, newest first.
    #[must_use]
    pub fn with_commits(mut self, commits: Vec<CommitInfo>) -> Self {
        self.commits_log = commits;
        self
    }

    #[must_use]
    pub fn with_head_message(mut self, message: &str) -> Self {
        self.head_message = message.to_string();
        self
    }

    #[must_use]
    pub fn with_remote_url(mut self, url: &str) -> Self {
        self.remote_url = Some(url.to_string());
        self
    }

    #[must_use]
    pub fn with_changes(mut self, has_changes: bool) -> Self {
        self.has_changes = has_changes;
        self
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn with_remote_tags(self, tags: &[&str]) -> Self {
        self.remote_tags
            .lock()
            .expect("lock poisoned")
            .extend(tags.iter().map(ToString::to_string));
        self
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn tags_created(&self) -> Vec<(String, String)> {
        self.tags_created.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn tags_pushed(&self) -> usize {
        *self.tags_pushed.lock().expect("lock poisoned")
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn commits(&self) -> Vec<String> {
        self.commits.lock().expect("lock poisoned").clone()
    }

    /// Branches prepared with `create_or_checkout_branch`, with their base.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn branches(&self) -> Vec<(String, String)> {
        self.branches.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn checkouts(&self) -> Vec<String> {
        self.checkouts.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn identity_configured(&self) -> bool {
        *self.identity_configured.lock().expect("lock poisoned")
    }
}

impl Default for MockGitProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl GitProvider for MockGitProvider {
    fn list_commits(&self, _project_root: &Path) -> Result<Vec<CommitInfo>> {
        Ok(self.commits_log.clone())
    }

    fn head_message(&self, _project_root: &Path) -> Result<String> {
        Ok(self.head_message.clone())
    }

    fn remote_url(&self, _project_root: &Path) -> Result<Option<String>> {
        Ok(self.remote_url.clone())
    }

    fn remote_tag_exists(&self, _project_root: &Path, tag_name: &str) -> Result<bool> {
        Ok(self
            .remote_tags
            .lock()
            .expect("lock poisoned")
            .iter()
            .any(|tag| tag == tag_name))
    }

    fn create_tag(&self, _project_root: &Path, tag_name: &str, message: &str) -> Result<TagInfo> {
        self.tags_created
            .lock()
            .expect("lock poisoned")
            .push((tag_name.to_string(), message.to_string()));
        Ok(TagInfo {
            name: tag_name.to_string(),
            target_sha: "abc123def456".to_string(),
        })
    }

    fn push_tags(&self, _project_root: &Path) -> Result<()> {
        let created = self.tags_created();
        self.remote_tags
            .lock()
            .expect("lock poisoned")
            .extend(created.into_iter().map(|(name, _)| name));
        *self.tags_pushed.lock().expect("lock poisoned") += 1;
        Ok(())
    }

    fn checkout_branch(&self, _project_root: &Path, branch: &str) -> Result<()> {
        self.checkouts
            .lock()
            .expect("lock poisoned")
            .push(branch.to_string());
        Ok(())
    }

    fn create_or_checkout_branch(
        &self,
        _project_root: &Path,
        branch: &str,
        default_branch: &str,
    ) -> Result<()> {
        self.branches
            .lock()
            .expect("lock poisoned")
            .push((branch.to_string(), default_branch.to_string()));
        Ok(())
    }

    fn has_changes(&self, _project_root: &Path) -> Result<bool> {
        Ok(self.has_changes)
    }

    fn commit_all_and_push(&self, _project_root: &Path, message: &str) -> Result<CommitInfo> {
        self.commits
            .lock()
            .expect("lock poisoned")
            .push(message.to_string());
        Ok(CommitInfo {
            sha: "abc123def456".to_string(),
            message: message.to_string(),
        })
    }

    fn configure_identity(&self, _project_root: &Path) -> Result<()> {
        *self.identity_configured.lock().expect("lock poisoned") = true;
        Ok(())
    }
}

impl GitProvider for Arc<MockGitProvider> {
    fn list_commits(&self, project_root: &Path) -> Result<Vec<CommitInfo>> {
        (**self).list_commits(project_root)
    }

    fn head_message(&self, project_root: &Path) -> Result<String> {
        (**self).head_message(project_root)
    }

    fn remote_url(&self, project_root: &Path) -> Result<Option<String>> {
        (**self).remote_url(project_root)
    }

    fn remote_tag_exists(&self, project_root: &Path, tag_name: &str) -> Result<bool> {
        (**self).remote_tag_exists(project_root, tag_name)
    }

    fn create_tag(&self, project_root: &Path, tag_name: &str, message: &str) -> Result<TagInfo> {
        (**self).create_tag(project_root, tag_name, message)
    }

    fn push_tags(&self, project_root: &Path) -> Result<()> {
        (**self).push_tags(project_root)
    }

    fn checkout_branch(&self, project_root: &Path, branch: &str) -> Result<()> {
        (**self).checkout_branch(project_root, branch)
    }

    fn create_or_checkout_branch(
        &self,
        project_root: &Path,
        branch: &str,
        default_branch: &str,
    ) -> Result<()> {
        (**self).create_or_checkout_branch(project_root, branch, default_branch)
    }

    fn has_changes(&self, project_root: &Path) -> Result<bool> {
        (**self).has_changes(project_root)
    }

    fn commit_all_and_push(&self, project_root: &Path, message: &str) -> Result<CommitInfo> {
        (**self).commit_all_and_push(project_root, message)
    }

    fn configure_identity(&self, project_root: &Path) -> Result<()> {
        (**self).configure_identity(project_root)
    }
}

pub struct MockHostingProvider {
    pull_request_number: u64,
    comments: Vec<IssueComment>,
    pull_requests: Mutex<Vec<PullRequestDraft>>,
    created_comments: Mutex<Vec<(u64, String)>>,
    updated_comments: Mutex<Vec<(u64, String)>>,
    releases: Mutex<Vec<(String, String, String)>>,
}

impl MockHostingProvider {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pull_request_number: 1,
            comments: Vec::new(),
            pull_requests: Mutex::new(Vec::new()),
            created_comments: Mutex::new(Vec::new()),
            updated_comments: Mutex::new(Vec::new()),
            releases: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_pull_request_number(mut self, number: u64) -> Self {
        self.pull_request_number = number;
        self
    }

    #[must_use]
    pub fn with_comments(mut self, comments: Vec<IssueComment>) -> Self {
        self.comments = comments;
        self
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn pull_requests(&self) -> Vec<PullRequestDraft> {
        self.pull_requests.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn created_comments(&self) -> Vec<(u64, String)> {
        self.created_comments.lock().expect("lock poisoned").clone()
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn updated_comments(&self) -> Vec<(u64, String)> {
        self.updated_comments.lock().expect("lock poisoned").clone()
    }

    /// Releases as `(tag, name, body)`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn releases(&self) -> Vec<(String, String, String)> {
        self.releases.lock().expect("lock poisoned").clone()
    }
}

impl Default for MockHostingProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl HostingProvider for MockHostingProvider {
    fn create_or_update_pull_request(&self, draft: &PullRequestDraft) -> Result<u64> {
        self.pull_requests
            .lock()
            .expect("lock poisoned")
            .push(draft.clone());
        Ok(self.pull_request_number)
    }

    fn list_comments(&self, _number: u64) -> Result<Vec<IssueComment>> {
        Ok(self.comments.clone())
    }

    fn create_comment(&self, number: u64, body: &str) -> Result<()> {
        self.created_comments
            .lock()
            .expect("lock poisoned")
            .push((number, body.to_string()));
        Ok(())
    }

    fn update_comment(&self, comment_id: u64, body: &str) -> Result<()> {
        self.updated_comments
            .lock()
            .expect("lock poisoned")
            .push((comment_id, body.to_string()));
        Ok(())
    }

    fn create_release(&self, tag_name: &str, name: &str, body: &str) -> Result<()> {
        self.releases.lock().expect("lock poisoned").push((
            tag_name.to_string(),
            name.to_string(),
            body.to_string(),
        ));
        Ok(())
    }
}

impl HostingProvider for Arc<MockHostingProvider> {
    fn create_or_update_pull_request(&self, draft: &PullRequestDraft) -> Result<u64> {
        (**self).create_or_update_pull_request(draft)
    }

    fn list_comments(&self, number: u64) -> Result<Vec<IssueComment>> {
        (**self).list_comments(number)
    }

    fn create_comment(&self, number: u64, body: &str) -> Result<()> {
        (**self).create_comment(number, body)
    }

    fn update_comment(&self, comment_id: u64, body: &str) -> Result<()> {
        (**self).update_comment(comment_id, body)
    }

    fn create_release(&self, tag_name: &str, name: &str, body: &str) -> Result<()> {
        (**self).create_release(tag_name, name, body)
    }
}

/// Serves a fixed workspace and records manifest edits instead of writing
/// them.
pub struct MockManifestStore {
    workspace: Workspace,
    updates: Mutex<Vec<(PathBuf, ManifestUpdate)>>,
}

impl MockManifestStore {
    #[must_use]
    pub fn new(workspace: Workspace) -> Self {
        Self {
            workspace,
            updates: Mutex::new(Vec::new()),
        }
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn updates(&self) -> Vec<(PathBuf, ManifestUpdate)> {
        self.updates.lock().expect("lock poisoned").clone()
    }
}

impl ManifestStore for MockManifestStore {
    fn discover_workspace(&self, _project_root: &Path) -> Result<Workspace> {
        Ok(self.workspace.clone())
    }

    fn write_update(
        &self,
        manifest_path: &Path,
        update: &ManifestUpdate,
    ) -> Result<Vec<DependencyChange>> {
        self.updates
            .lock()
            .expect("lock poisoned")
            .push((manifest_path.to_path_buf(), update.clone()));
        Ok(Vec::new())
    }
}

impl ManifestStore for Arc<MockManifestStore> {
    fn discover_workspace(&self, project_root: &Path) -> Result<Workspace> {
        (**self).discover_workspace(project_root)
    }

    fn write_update(
        &self,
        manifest_path: &Path,
        update: &ManifestUpdate,
    ) -> Result<Vec<DependencyChange>> {
        (**self).write_update(manifest_path, update)
    }
}

pub struct MockChangelogStore {
    files: Mutex<HashMap<PathBuf, String>>,
}

impl MockChangelogStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            files: Mutex::new(HashMap::new()),
        }
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files
            .lock()
            .expect("lock poisoned")
            .insert(path.into(), content.to_string());
        self
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn content(&self, path: &Path) -> Option<String> {
        self.files.lock().expect("lock poisoned").get(path).cloned()
    }
}

impl Default for MockChangelogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangelogStore for MockChangelogStore {
    fn read(&self, path: &Path) -> Result<Option<String>> {
        Ok(self.content(path))
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        self.files
            .lock()
            .expect("lock poisoned")
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}

impl ChangelogStore for Arc<MockChangelogStore> {
    fn read(&self, path: &Path) -> Result<Option<String>> {
        (**self).read(path)
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        (**self).write(path, content)
    }
}

pub struct MockPackageManager {
    kind: PackageManagerKind,
    failing: Vec<String>,
    already_published: Vec<String>,
    installs: Mutex<Vec<PathBuf>>,
    published: Mutex<Vec<(PathBuf, Option<String>)>>,
    auth: Mutex<Vec<String>>,
}

impl MockPackageManager {
    #[must_use]
    pub fn new(kind: PackageManagerKind) -> Self {
        Self {
            kind,
            failing: Vec::new(),
            already_published: Vec::new(),
            installs: Mutex::new(Vec::new()),
            published: Mutex::new(Vec::new()),
            auth: Mutex::new(Vec::new()),
        }
    }

    /// Publishing from a directory ending in `dir` fails.
    #[must_use]
    pub fn failing_publish(mut self, dir: &str) -> Self {
        self.failing.push(dir.to_string());
        self
    }

    /// Publishing from a directory ending in `dir` reports the version as
    /// already on the registry.
    #[must_use]
    pub fn already_published(mut self, dir: &str) -> Self {
        self.already_published.push(dir.to_string());
        self
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn installs(&self) -> Vec<PathBuf> {
        self.installs.lock().expect("lock poisoned").clone()
    }

    /// Successful publishes as `(dir, dist_tag)`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn published(&self) -> Vec<(PathBuf, Option<String>)> {
        self.published.lock().expect("lock poisoned").clone()
    }

    /// Registries authentication was configured for.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn auth(&self) -> Vec<String> {
        self.auth.lock().expect("lock poisoned").clone()
    }
}

impl PackageManager for MockPackageManager {
    fn detect(&self, _project_root: &Path) -> Result<PackageManagerKind> {
        Ok(self.kind)
    }

    fn install(&self, _kind: PackageManagerKind, dir: &Path) -> Result<()> {
        self.installs
            .lock()
            .expect("lock poisoned")
            .push(dir.to_path_buf());
        Ok(())
    }

    fn publish(
        &self,
        kind: PackageManagerKind,
        dir: &Path,
        dist_tag: Option<&str>,
    ) -> Result<PublishResult> {
        if self.failing.iter().any(|suffix| dir.ends_with(suffix)) {
            return Err(OperationError::CommandFailed {
                command: kind.publish_args(dist_tag).join(" "),
                status: "exit status: 1".to_string(),
                stderr: "npm ERR! 403 Forbidden".to_string(),
            });
        }
        if self.already_published.iter().any(|suffix| dir.ends_with(suffix)) {
            return Ok(PublishResult::AlreadyExists);
        }
        self.published
            .lock()
            .expect("lock poisoned")
            .push((dir.to_path_buf(), dist_tag.map(ToString::to_string)));
        Ok(PublishResult::Published)
    }

    fn configure_auth(&self, _project_root: &Path, registry: &str, _token: &str) -> Result<()> {
        self.auth
            .lock()
            .expect("lock poisoned")
            .push(registry.to_string());
        Ok(())
    }
}

impl PackageManager for Arc<MockPackageManager> {
    fn detect(&self, project_root: &Path) -> Result<PackageManagerKind> {
        (**self).detect(project_root)
    }

    fn install(&self, kind: PackageManagerKind, dir: &Path) -> Result<()> {
        (**self).install(kind, dir)
    }

    fn publish(
        &self,
        kind: PackageManagerKind,
        dir: &Path,
        dist_tag: Option<&str>,
    ) -> Result<PublishResult> {
        (**self).publish(kind, dir, dist_tag)
    }

    fn configure_auth(&self, project_root: &Path, registry: &str, token: &str) -> Result<()> {
        (**self).configure_auth(project_root, registry, token)
    }
}

pub struct MockOutputSink {
    outputs: Mutex<Vec<(String, String)>>,
}

impl MockOutputSink {
    #[must_use]
    pub fn new() -> Self {
        Self {
            outputs: Mutex::new(Vec::new()),
        }
    }

    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn outputs(&self) -> Vec<(String, String)> {
        self.outputs.lock().expect("lock poisoned").clone()
    }
}

impl Default for MockOutputSink {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputSink for MockOutputSink {
    fn set_output(&self, name: &str, value: &str) -> Result<()> {
        self.outputs
            .lock()
            .expect("lock poisoned")
            .push((name.to_string(), value.to_string()));
        Ok(())
    }
}

impl OutputSink for Arc<MockOutputSink> {
    fn set_output(&self, name: &str, value: &str) -> Result<()> {
        (**self).set_output(name, value)
    }
}
