use semver::Version;

/// Leading range operator of a specifier: `^`, `~`, `>=`, `~>`, ... Empty
/// for exact versions.
#[must_use]
pub fn version_prefix(specifier: &str) -> &str {
    let end = specifier
        .find(|c: char| !matches!(c, '^' | '~' | '>' | '<' | '='))
        .unwrap_or(specifier.len());
    &specifier[..end]
}

/// New specifier pointing at `new_version`, keeping the range operator of
/// `current`.
///
/// Protocol specifiers (`workspace:`, `file:`, `npm:`, ...), tags such as
/// `latest`, wildcards and compound ranges are left as they are and yield
/// `None`, as does a rewrite that would not change anything. Snapshot
/// versions are pinned exactly.
#[must_use]
pub fn rewrite_specifier(current: &str, new_version: &Version) -> Option<String> {
    let prefix = version_prefix(current);
    let rest = current[prefix.len()..].trim_start();

    let is_plain_version = rest.starts_with(|c: char| c.is_ascii_digit())
        && !rest.contains(char::is_whitespace)
        && !rest.contains("||")
        && !rest.contains(':');
    if !is_plain_version {
        return None;
    }

    let rewritten = if new_version.pre.as_str().starts_with("snapshot-") {
        new_version.to_string()
    } else {
        format!("{prefix}{new_version}")
    };

    (rewritten != current).then_some(rewritten)
}
