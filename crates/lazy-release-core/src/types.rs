use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BumpType {
    Patch,
    Minor,
    Major,
}

impl BumpType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
        }
    }
}

impl fmt::Display for BumpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BumpType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "patch" => Ok(Self::Patch),
            "minor" => Ok(Self::Minor),
            "major" => Ok(Self::Major),
            other => Err(CoreError::UnknownBumpType {
                value: other.to_string(),
            }),
        }
    }
}

/// Conventional-commit change types, declared in changelog display order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Feat,
    Fix,
    Perf,
    Chore,
    Docs,
    Style,
    Refactor,
    Test,
    Build,
    Ci,
    Revert,
}

impl ChangeType {
    pub const ALL: [Self; 11] = [
        Self::Feat,
        Self::Fix,
        Self::Perf,
        Self::Chore,
        Self::Docs,
        Self::Style,
        Self::Refactor,
        Self::Test,
        Self::Build,
        Self::Ci,
        Self::Revert,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Feat => "feat",
            Self::Fix => "fix",
            Self::Perf => "perf",
            Self::Chore => "chore",
            Self::Docs => "docs",
            Self::Style => "style",
            Self::Refactor => "refactor",
            Self::Test => "test",
            Self::Build => "build",
            Self::Ci => "ci",
            Self::Revert => "revert",
        }
    }

    #[must_use]
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Feat => "🚀",
            Self::Fix => "🐛",
            Self::Perf => "⚡️",
            Self::Chore => "🏠",
            Self::Docs => "📚",
            Self::Style => "🎨",
            Self::Refactor => "♻️",
            Self::Test => "✅",
            Self::Build => "📦",
            Self::Ci => "🤖",
            Self::Revert => "⏪",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Feat => "New Features",
            Self::Fix => "Bug Fixes",
            Self::Perf => "Performance Improvements",
            Self::Chore => "Chores",
            Self::Docs => "Documentation",
            Self::Style => "Styles",
            Self::Refactor => "Refactors",
            Self::Test => "Tests",
            Self::Build => "Build System",
            Self::Ci => "Continuous Integration",
            Self::Revert => "Reverts",
        }
    }

    /// Section heading used in changelogs, e.g. `🚀 New Features`.
    #[must_use]
    pub fn heading(self) -> String {
        format!("{} {}", self.emoji(), self.display_name())
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|change_type| change_type.as_str() == s)
            .ok_or_else(|| CoreError::UnknownChangeType {
                value: s.to_string(),
            })
    }
}

/// Type, scopes and breaking flag of a conventional header such as
/// `feat(ui, api)!`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitTypeParts {
    pub change_type: Option<ChangeType>,
    pub package_names: Vec<String>,
    pub is_breaking_change: bool,
}

/// One changelog line attributed to zero or more packages.
///
/// An empty `packages` list attributes the change to the root package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub change_type: ChangeType,
    pub description: String,
    pub packages: Vec<String>,
    pub is_breaking_change: bool,
    pub semver_bump: BumpType,
    pub has_explicit_version_bump: bool,
}

impl ChangeRecord {
    #[must_use]
    pub fn targets_root(&self) -> bool {
        self.packages.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub hash: String,
    pub subject: String,
    pub body: String,
}

impl Commit {
    #[must_use]
    pub fn new(hash: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Subject and body joined the way `git log --format=%B` prints them.
    #[must_use]
    pub fn message(&self) -> String {
        if self.body.is_empty() {
            self.subject.clone()
        } else {
            format!("{}\n\n{}", self.subject, self.body)
        }
    }
}
