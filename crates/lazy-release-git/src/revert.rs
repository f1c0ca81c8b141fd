//! Recognizes the messages git and GitHub write for reverts.

/// SHA named by a `This reverts commit <sha>` line.
#[must_use]
pub fn reverted_commit(message: &str) -> Option<&str> {
    let (_, rest) = message.split_once("This reverts commit ")?;
    let sha: &str = rest
        .split(|c: char| !c.is_ascii_hexdigit())
        .next()
        .unwrap_or_default();
    (sha.len() >= 7).then_some(sha)
}

/// Pull request number named by a `Reverts owner/repo#N` line for the given
/// `owner/repo` slug.
#[must_use]
pub fn reverted_pull_request(message: &str, slug: &str) -> Option<u64> {
    let marker = format!("Reverts {slug}#");
    let (_, rest) = message.split_once(&marker)?;
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().ok()
}
