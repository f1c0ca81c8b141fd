mod changelog;
mod git;
mod github;
mod manifest;
mod output;
mod package_manager;

pub use changelog::FileSystemChangelogStore;
pub use git::Git2Provider;
pub use github::GitHubHostingProvider;
pub use manifest::FileSystemManifestStore;
pub use output::GitHubOutputFile;
pub use package_manager::NodePackageManager;
