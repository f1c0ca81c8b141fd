#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagInfo {
    pub name: String,
    pub target_sha: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub sha: String,
    pub message: String,
}

impl CommitInfo {
    /// First line of the message.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.message.lines().next().unwrap_or("").trim_end()
    }

    /// Everything after the subject and the blank line that follows it.
    #[must_use]
    pub fn body(&self) -> &str {
        self.message
            .split_once('\n')
            .map_or("", |(_, rest)| rest.trim_start_matches(['\r', '\n']).trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(message: &str) -> CommitInfo {
        CommitInfo {
            sha: "abc".to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn splits_subject_and_body() {
        let info = commit("feat: add\n\n## Changelog\n- feat(a): x\n");
        assert_eq!(info.subject(), "feat: add");
        assert_eq!(info.body(), "## Changelog\n- feat(a): x");
    }

    #[test]
    fn subject_only_message_has_empty_body() {
        let info = commit("fix: y\n");
        assert_eq!(info.subject(), "fix: y");
        assert_eq!(info.body(), "");
    }
}
