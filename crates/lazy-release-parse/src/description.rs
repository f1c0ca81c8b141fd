use lazy_release_core::RepositoryInfo;

/// Normalizes a changelog description.
///
/// The text is trimmed and its first character uppercased. With a known
/// repository, `(#N)` references become pull request links, and `pr_number`
/// is appended as a link unless the text already references a pull request.
#[must_use]
pub fn transform_description(
    description: &str,
    pr_number: Option<u64>,
    repo: Option<&RepositoryInfo>,
) -> String {
    let capitalized = capitalize_first(description.trim());
    let Some(repo) = repo else {
        return capitalized;
    };

    let (mut linked, has_reference) = link_pull_request_references(&capitalized, repo);
    if let Some(number) = pr_number {
        if !has_reference {
            linked.push_str(&format!(
                " ([#{number}]({}))",
                repo.pull_request_url(number)
            ));
        }
    }
    linked
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn link_pull_request_references(text: &str, repo: &RepositoryInfo) -> (String, bool) {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    let mut found = false;

    while let Some(start) = rest.find("(#") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let digits = after.bytes().take_while(u8::is_ascii_digit).count();
        let number = after[..digits]
            .parse::<u64>()
            .ok()
            .filter(|_| after[digits..].starts_with(')'));

        match number {
            Some(number) => {
                out.push_str(&format!(
                    "([#{number}]({}))",
                    repo.pull_request_url(number)
                ));
                rest = &after[digits + 1..];
                found = true;
            }
            None => {
                out.push_str("(#");
                rest = after;
            }
        }
    }

    out.push_str(rest);
    (out, found)
}
