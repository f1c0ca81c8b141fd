mod changelog_store;
mod git_provider;
mod hosting_provider;
mod manifest_store;
mod output_sink;
mod package_manager;

pub use changelog_store::ChangelogStore;
pub use git_provider::GitProvider;
pub use hosting_provider::{HostingProvider, PullRequestDraft};
pub use manifest_store::ManifestStore;
pub use output_sink::OutputSink;
pub use package_manager::{PackageManager, PackageManagerKind, PublishResult};
