//! Provider behavior: owner/repo extraction and canonical URL construction.

use thiserror::Error;

/// A module or redirect-target path under a known provider did not contain
/// enough segments to extract an owner/repo pair.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("couldn't determine owner and repo name in path '{path}'")]
pub struct MalformedPathError {
    pub path: String,
}

/// Owner/repository pair extracted from a module path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerRepo {
    pub owner: String,
    pub repo: String,
}

/// Behavior of one code-hosting provider.
///
/// Most providers put the owner and repository directly in the path
/// (`{domain}/{owner}/{repo}/...`) and share the default implementations;
/// a provider with an unusual path convention overrides `owner_repo`.
pub trait Provider: Send + Sync {
    /// Hosting domain this provider serves, e.g. `github.com`. This is the
    /// first segment of a module or package path hosted there.
    fn domain(&self) -> &str;

    /// Splits a slash-separated module path into its owner/repo pair.
    fn owner_repo(&self, path: &str) -> Result<OwnerRepo, MalformedPathError> {
        default_owner_repo(path)
    }

    /// Canonical browsable URL for an owner/repo pair.
    fn repo_url(&self, pair: &OwnerRepo) -> String {
        format!("https://{}/{}/{}", self.domain(), pair.owner, pair.repo)
    }
}

/// Default extraction: segment 0 is the domain, segments 1 and 2 are owner
/// and repo. Anything after (version suffixes, package subdirectories) is
/// ignored.
pub fn default_owner_repo(path: &str) -> Result<OwnerRepo, MalformedPathError> {
    let subs: Vec<&str> = path.split('/').collect();
    if subs.len() < 3 {
        return Err(MalformedPathError {
            path: path.to_string(),
        });
    }
    Ok(OwnerRepo {
        owner: subs[1].to_string(),
        repo: subs[2].to_string(),
    })
}

/// A provider following the `https://{domain}/{owner}/{repo}` convention.
#[derive(Debug, Clone)]
pub struct Hosted {
    domain: String,
}

impl Hosted {
    pub fn new(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
        }
    }
}

impl Provider for Hosted {
    fn domain(&self) -> &str {
        &self.domain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_extraction_takes_segments_one_and_two() {
        let pair = default_owner_repo("github.com/mholt/archiver/v3").unwrap();
        assert_eq!(pair.owner, "mholt");
        assert_eq!(pair.repo, "archiver");
    }

    #[test]
    fn default_extraction_accepts_exactly_three_segments() {
        let pair = default_owner_repo("codeberg.org/someone/tool").unwrap();
        assert_eq!(pair.owner, "someone");
        assert_eq!(pair.repo, "tool");
    }

    #[test]
    fn default_extraction_rejects_short_paths() {
        let err = default_owner_repo("github.com/mholt").unwrap_err();
        assert!(err.to_string().contains("github.com/mholt"));
        assert!(default_owner_repo("github.com").is_err());
    }

    #[test]
    fn hosted_builds_canonical_url() {
        let provider = Hosted::new("gitlab.com");
        let pair = provider.owner_repo("gitlab.com/group/project/sub").unwrap();
        assert_eq!(provider.repo_url(&pair), "https://gitlab.com/group/project");
    }
}
