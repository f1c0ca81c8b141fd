mod changelog;
mod error;
mod release_body;
mod render;

pub use changelog::{Changelog, replace_changelog_section, update_changelog};
pub use error::ChangelogError;
pub use release_body::{
    ReleaseEntry, ReleaseHeading, append_release_id, has_release_id, increase_heading_level,
    parse_release_pr_body, release_id_marker, remove_release_id,
};
pub use render::{
    BREAKING_CHANGES_HEADING, DEPENDENCY_NOTICE, MARKDOWN_TITLE, generate_changelog_content,
    generate_markdown, package_heading,
};

pub type Result<T> = std::result::Result<T, ChangelogError>;
