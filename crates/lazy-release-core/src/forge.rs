use url::Url;

use crate::error::{CoreError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Forge {
    GitHub,
    GitLab,
    Bitbucket,
    Gitea,
}

/// Owner and name of the hosting repository, used to build pull request
/// and comparison links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryInfo {
    pub forge: Forge,
    pub owner: String,
    pub repo: String,
    pub base_url: Url,
}

impl RepositoryInfo {
    /// Parses a remote URL. Both `https://host/owner/repo(.git)` and the scp
    /// form `git@host:owner/repo.git` are accepted.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UrlParse` if the URL is invalid, or
    /// `CoreError::InvalidRepositoryPath` if it lacks an owner/repo path.
    pub fn from_url(url_str: &str) -> Result<Self> {
        let normalized = normalize_scp_url(url_str);
        let url = Url::parse(&normalized).map_err(|source| CoreError::UrlParse {
            url: url_str.to_string(),
            source,
        })?;

        let host = url.host_str().ok_or_else(|| CoreError::UrlParse {
            url: url_str.to_string(),
            source: url::ParseError::EmptyHost,
        })?;

        let forge = detect_forge(host);
        let (owner, repo) = extract_owner_repo(&url)?;

        let base_url =
            Url::parse(&format!("https://{host}")).map_err(|source| CoreError::UrlParse {
                url: url_str.to_string(),
                source,
            })?;

        Ok(Self {
            forge,
            owner,
            repo,
            base_url,
        })
    }

    /// Parses an `owner/repo` slug as found in `GITHUB_REPOSITORY`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidRepositoryPath` if the slug is not exactly
    /// two non-empty segments.
    pub fn from_slug(slug: &str) -> Result<Self> {
        let invalid = || CoreError::InvalidRepositoryPath {
            url: slug.to_string(),
        };
        let (owner, repo) = slug.trim().split_once('/').ok_or_else(invalid)?;
        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return Err(invalid());
        }

        let base_url = Url::parse("https://github.com").map_err(|source| CoreError::UrlParse {
            url: slug.to_string(),
            source,
        })?;

        Ok(Self {
            forge: Forge::GitHub,
            owner: owner.to_string(),
            repo: repo.to_string(),
            base_url,
        })
    }

    /// `owner/repo`
    #[must_use]
    pub fn slug(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    #[must_use]
    pub fn pull_request_url(&self, number: u64) -> String {
        match self.forge {
            Forge::GitHub => format!(
                "{}{}/{}/pull/{number}",
                self.base_url, self.owner, self.repo
            ),
            Forge::GitLab => format!(
                "{}{}/{}/-/merge_requests/{number}",
                self.base_url, self.owner, self.repo
            ),
            Forge::Bitbucket => format!(
                "{}{}/{}/pull-requests/{number}",
                self.base_url, self.owner, self.repo
            ),
            Forge::Gitea => format!(
                "{}{}/{}/pulls/{number}",
                self.base_url, self.owner, self.repo
            ),
        }
    }

    #[must_use]
    pub fn comparison_url(&self, base_tag: &str, target_tag: &str) -> String {
        match self.forge {
            Forge::GitHub | Forge::Gitea => format!(
                "{}{}/{}/compare/{}...{}",
                self.base_url, self.owner, self.repo, base_tag, target_tag
            ),
            Forge::GitLab => format!(
                "{}{}/{}/-/compare/{}...{}",
                self.base_url, self.owner, self.repo, base_tag, target_tag
            ),
            Forge::Bitbucket => format!(
                "{}{}/{}/branches/compare/{}..{}",
                self.base_url, self.owner, self.repo, target_tag, base_tag
            ),
        }
    }
}

fn normalize_scp_url(url: &str) -> String {
    if url.contains("://") {
        return url.to_string();
    }
    match url.split_once('@').and_then(|(_, rest)| rest.split_once(':')) {
        Some((host, path)) => format!("ssh://{host}/{path}"),
        None => url.to_string(),
    }
}

fn detect_forge(host: &str) -> Forge {
    let host_lower = host.to_lowercase();

    if host_lower == "gitlab.com"
        || host_lower.starts_with("gitlab.")
        || host_lower.contains(".gitlab.")
    {
        Forge::GitLab
    } else if host_lower == "bitbucket.org" || host_lower.ends_with(".bitbucket.org") {
        Forge::Bitbucket
    } else if host_lower == "codeberg.org" || host_lower.starts_with("gitea.") {
        Forge::Gitea
    } else {
        Forge::GitHub
    }
}

fn extract_owner_repo(url: &Url) -> Result<(String, String)> {
    let path = url.path().trim_start_matches('/').trim_end_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    if segments.len() < 2 {
        return Err(CoreError::InvalidRepositoryPath {
            url: url.to_string(),
        });
    }

    Ok((segments[0].to_string(), segments[1].to_string()))
}
