//! Turns commit messages and pull request bodies into [`ChangeRecord`]s.
//!
//! A change is described either by a conventional commit subject such as
//! `feat(ui): add table` or by the items of a `## Changelog` section:
//!
//! ```markdown
//! ## Changelog
//! - feat(ui, api): add table
//! - fix!: drop legacy flag #major
//! ```
//!
//! [`ChangeRecord`]: lazy_release_core::ChangeRecord

mod description;
mod header;
mod record;
mod section;

pub use description::transform_description;
pub use header::{
    extract_commit_type, extract_commit_type_parts, extract_description, is_pr_title_valid,
    strip_header_marker,
};
pub use record::{
    create_change_record, explicit_bump, records_from_commits, records_from_markdown,
    records_from_pull_request,
};
pub use section::{changelog_items, changelog_section, has_changelog_section, normalize_newlines};
