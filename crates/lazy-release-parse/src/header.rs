use lazy_release_core::{ChangeType, CommitTypeParts};

/// Text before the first `:` of a changelog item, trimmed. Empty when the
/// item has no `:`.
#[must_use]
pub fn extract_commit_type(item: &str) -> &str {
    item.split_once(':').map_or("", |(header, _)| header.trim())
}

/// Text after the first `:` of a changelog item, trimmed. Empty when the
/// item has no `:`.
#[must_use]
pub fn extract_description(item: &str) -> &str {
    item.split_once(':')
        .map_or("", |(_, description)| description.trim())
}

/// Parses `type`, `type!`, `type(a, b)`, `type(a)!` and `type!(a)`.
///
/// Anything that does not start with a known type word, carries trailing
/// text, or has a malformed scope list yields parts without a change type.
#[must_use]
pub fn extract_commit_type_parts(header: &str) -> CommitTypeParts {
    parse_header(header.trim()).unwrap_or_default()
}

const HEADER_MARKERS: [&str; 3] = ["#major", "#minor", "#patch"];

/// `header` without a trailing `#major`, `#minor` or `#patch` marker, as in
/// `feat(ui)!#major`.
#[must_use]
pub fn strip_header_marker(header: &str) -> &str {
    HEADER_MARKERS
        .iter()
        .find_map(|marker| header.strip_suffix(marker))
        .unwrap_or(header)
}

/// Whether `title` is a conventional title such as `feat(ui)!: add table`
/// or `fix#patch: keep api`.
#[must_use]
pub fn is_pr_title_valid(title: &str) -> bool {
    let Some((header, description)) = title.split_once(':') else {
        return false;
    };
    description.starts_with(' ')
        && !description.trim().is_empty()
        && extract_commit_type_parts(strip_header_marker(header))
            .change_type
            .is_some()
        && header == header.trim_start()
}

fn parse_header(header: &str) -> Option<CommitTypeParts> {
    let word_end = header
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(header.len());
    let change_type: ChangeType = header[..word_end].parse().ok()?;

    let mut rest = &header[word_end..];
    let mut is_breaking_change = false;

    if let Some(stripped) = rest.strip_prefix('!') {
        is_breaking_change = true;
        rest = stripped;
    }

    let mut package_names = Vec::new();
    if let Some(stripped) = rest.strip_prefix('(') {
        let (scopes, after) = stripped.split_once(')')?;
        package_names = parse_scopes(scopes)?;
        rest = after;
    }

    if let Some(stripped) = rest.strip_prefix('!') {
        is_breaking_change = true;
        rest = stripped;
    }

    if !rest.trim().is_empty() {
        return None;
    }

    Some(CommitTypeParts {
        change_type: Some(change_type),
        package_names,
        is_breaking_change,
    })
}

fn parse_scopes(scopes: &str) -> Option<Vec<String>> {
    scopes
        .split(',')
        .map(str::trim)
        .map(|scope| is_valid_scope(scope).then(|| scope.to_string()))
        .collect()
}

fn is_valid_scope(scope: &str) -> bool {
    !scope.is_empty()
        && scope
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(header: &str) -> CommitTypeParts {
        extract_commit_type_parts(header)
    }

    #[test]
    fn plain_type() {
        let result = parts("feat");
        assert_eq!(result.change_type, Some(ChangeType::Feat));
        assert!(result.package_names.is_empty());
        assert!(!result.is_breaking_change);
    }

    #[test]
    fn single_scope() {
        let result = parts("fix(ui-components)");
        assert_eq!(result.change_type, Some(ChangeType::Fix));
        assert_eq!(result.package_names, vec!["ui-components"]);
    }

    #[test]
    fn multiple_scopes_with_breaking_marker() {
        let result = parts("feat(ui, api)!");
        assert_eq!(result.change_type, Some(ChangeType::Feat));
        assert_eq!(result.package_names, vec!["ui", "api"]);
        assert!(result.is_breaking_change);
    }

    #[test]
    fn breaking_marker_before_scopes() {
        let result = parts("refactor!(core)");
        assert_eq!(result.change_type, Some(ChangeType::Refactor));
        assert_eq!(result.package_names, vec!["core"]);
        assert!(result.is_breaking_change);
    }

    #[test]
    fn breaking_marker_without_scopes() {
        let result = parts("chore!");
        assert_eq!(result.change_type, Some(ChangeType::Chore));
        assert!(result.is_breaking_change);
    }

    #[test]
    fn unknown_type_yields_empty_parts() {
        assert_eq!(parts("feature(ui)"), CommitTypeParts::default());
        assert_eq!(parts("Update readme"), CommitTypeParts::default());
        assert_eq!(parts(""), CommitTypeParts::default());
    }

    #[test]
    fn malformed_scopes_yield_empty_parts() {
        assert_eq!(parts("feat(UI)"), CommitTypeParts::default());
        assert_eq!(parts("feat()"), CommitTypeParts::default());
        assert_eq!(parts("feat(ui"), CommitTypeParts::default());
        assert_eq!(parts("feat(ui) extra"), CommitTypeParts::default());
    }

    #[test]
    fn extract_type_and_description() {
        let item = "feat(ui): Added new table: with colons";
        assert_eq!(extract_commit_type(item), "feat(ui)");
        assert_eq!(extract_description(item), "Added new table: with colons");
    }

    #[test]
    fn item_without_colon_has_empty_type_and_description() {
        assert_eq!(extract_commit_type("just some text"), "");
        assert_eq!(extract_description("just some text"), "");
    }

    #[test]
    fn valid_pr_titles() {
        assert!(is_pr_title_valid("feat: add table"));
        assert!(is_pr_title_valid("fix(ui, api)!: drop flag"));
        assert!(is_pr_title_valid("refactor(core): simplify #major"));
    }

    #[test]
    fn explicit_marker_before_colon() {
        assert!(is_pr_title_valid("feat#major: drop api"));
        assert!(is_pr_title_valid("fix(ui)!#patch: x"));
        assert!(!is_pr_title_valid("feat#huge: drop api"));
        assert!(!is_pr_title_valid("feat#major#minor: drop api"));
    }

    #[test]
    fn strips_only_trailing_marker() {
        assert_eq!(strip_header_marker("fix(ui)!#patch"), "fix(ui)!");
        assert_eq!(strip_header_marker("feat#minor"), "feat");
        assert_eq!(strip_header_marker("feat(ui)"), "feat(ui)");
    }

    #[test]
    fn invalid_pr_titles() {
        assert!(!is_pr_title_valid("Version Packages"));
        assert!(!is_pr_title_valid("feat:missing space"));
        assert!(!is_pr_title_valid("feat: "));
        assert!(!is_pr_title_valid("feature: add table"));
        assert!(!is_pr_title_valid(" feat: leading space"));
    }
}
