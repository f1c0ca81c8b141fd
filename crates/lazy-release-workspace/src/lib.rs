mod discovery;
mod error;
mod graph;

pub use discovery::{DEFAULT_IGNORE_PATTERNS, DiscoveryOptions, Workspace, discover_workspace};
pub use error::WorkspaceError;
pub use graph::{ChangedPackages, resolve_changed_packages};

pub type Result<T> = std::result::Result<T, WorkspaceError>;
