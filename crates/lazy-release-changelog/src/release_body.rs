use lazy_release_core::constants::RELEASE_ID;
use semver::Version;
use tracing::warn;

const VERSION_ARROW: &str = "➡️";

/// HTML comment that marks a release pull request body.
#[must_use]
pub fn release_id_marker() -> String {
    format!("<!-- Release PR: {RELEASE_ID} -->")
}

#[must_use]
pub fn append_release_id(markdown: &str) -> String {
    format!("{markdown}{}", release_id_marker())
}

/// Whether `text`, a pull request body or a commit message, belongs to a
/// release pull request.
#[must_use]
pub fn has_release_id(text: &str) -> bool {
    text.contains(RELEASE_ID)
}

#[must_use]
pub fn remove_release_id(markdown: &str) -> String {
    markdown.replace(&release_id_marker(), "")
}

/// Adds one `#` to every ATX heading so the document nests under another
/// heading. `#major` and other markers without a following space are left
/// alone.
#[must_use]
pub fn increase_heading_level(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len() + 16);
    for line in markdown.split_inclusive('\n') {
        let content = line.trim_start();
        let indent = line.len() - content.len();
        let hashes = content.bytes().take_while(|b| *b == b'#').count();
        if hashes > 0 && content[hashes..].starts_with(' ') {
            out.push_str(&line[..indent]);
            out.push('#');
            out.push_str(content);
        } else {
            out.push_str(line);
        }
    }
    out
}

/// Parsed `## name@1.0.0➡️1.1.0` heading of a release pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseHeading {
    /// Unscoped package name. `None` for the root package.
    pub package_name: Option<String>,
    pub old_version: Version,
    pub new_version: Version,
}

impl ReleaseHeading {
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.package_name.is_none()
    }

    fn parse(text: &str) -> Option<Self> {
        let (left, new_version) = text.trim().split_once(VERSION_ARROW)?;
        let new_version = Version::parse(new_version.trim()).ok()?;

        let (package_name, old_version) = match left.rsplit_once('@') {
            Some((name, version)) if !name.is_empty() => (Some(name.to_string()), version),
            _ => (None, left),
        };
        let old_version = Version::parse(old_version.trim()).ok()?;

        Some(Self {
            package_name,
            old_version,
            new_version,
        })
    }
}

/// One package section of a release pull request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseEntry {
    pub heading: ReleaseHeading,
    /// Section text below the heading, trimmed.
    pub content: String,
}

/// Reads the package sections back out of a release pull request body.
#[must_use]
pub fn parse_release_pr_body(body: &str) -> Vec<ReleaseEntry> {
    let body = remove_release_id(&body.replace("\r\n", "\n"));
    let mut entries = Vec::new();
    let mut current: Option<(ReleaseHeading, String)> = None;

    for line in body.split_inclusive('\n') {
        if let Some(heading) = line.strip_prefix("## ") {
            if let Some((heading, content)) = current.take() {
                entries.push(finish(heading, &content));
            }
            match ReleaseHeading::parse(heading) {
                Some(parsed) => current = Some((parsed, String::new())),
                None => warn!(heading = heading.trim(), "ignoring unrecognized release heading"),
            }
            continue;
        }
        if let Some((_, content)) = current.as_mut() {
            content.push_str(line);
        }
    }

    if let Some((heading, content)) = current {
        entries.push(finish(heading, &content));
    }
    entries
}

fn finish(heading: ReleaseHeading, content: &str) -> ReleaseEntry {
    ReleaseEntry {
        heading,
        content: content.trim().to_string(),
    }
}
