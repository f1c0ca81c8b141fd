use std::borrow::Cow;

const CHANGELOG_HEADING: &str = "## Changelog\n";

/// Converts CRLF line endings, as sent by browsers in pull request bodies,
/// to LF.
#[must_use]
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

#[must_use]
pub fn has_changelog_section(text: &str) -> bool {
    section_start(&normalize_newlines(text)).is_some()
}

/// Returns the trimmed text between the `## Changelog` heading and the next
/// `##` run, or the end of the text.
///
/// A single `#` does not end the section, so `#major` markers and issue
/// references survive. Any `##`, including one inside a code fence, does.
#[must_use]
pub fn changelog_section(text: &str) -> Option<&str> {
    let start = section_start(text)?;
    let body = &text[start..];

    let mut run = 0;
    let mut end = body.len();
    for (index, c) in body.char_indices() {
        if c == '#' {
            run += 1;
            if run == 2 {
                end = index - 1;
                break;
            }
        } else {
            run = 0;
        }
    }

    Some(body[..end].trim())
}

/// Splits a changelog section into items on every `"- "`.
///
/// The split is deliberately naive: a `"- "` inside an item's description
/// starts a new item.
#[must_use]
pub fn changelog_items(section: &str) -> Vec<&str> {
    section
        .split("- ")
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .collect()
}

/// Offset just past the first `## Changelog\n`, wherever it occurs. Expects
/// LF line endings.
fn section_start(text: &str) -> Option<usize> {
    text.find(CHANGELOG_HEADING)
        .map(|index| index + CHANGELOG_HEADING.len())
}
