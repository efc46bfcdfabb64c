//! Repository URL resolution.
//!
//! Decides, per binary, between a direct provider lookup, a vanity-import
//! lookup, and a marked best-guess fallback.

use crate::providers::{MalformedPathError, ProviderRegistry};
use crate::vanity::VanityLookup;
use std::fmt;

/// Wrapped around guessed URLs so a reader cannot mistake them for
/// confirmed resolutions.
const GUESS_MARKER: &str = "\u{2753}";

/// The two build-info fields resolution consumes.
///
/// `module_path` is always a prefix of (or equal to) `package_path`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildMetadata {
    /// Package that was built, e.g. `github.com/mholt/archiver/v3/cmd/arc`.
    pub package_path: String,
    /// Module root, e.g. `github.com/mholt/archiver/v3`.
    pub module_path: String,
}

/// A browsable repository URL, either confirmed or guessed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoUrl {
    /// Canonical URL built by a known provider.
    Resolved(String),
    /// Heuristic URL for an unknown host; displays inside the guess marker.
    Guess(String),
}

impl RepoUrl {
    pub fn is_guess(&self) -> bool {
        matches!(self, RepoUrl::Guess(_))
    }
}

impl fmt::Display for RepoUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepoUrl::Resolved(url) => write!(f, "{url}"),
            RepoUrl::Guess(url) => write!(f, "{GUESS_MARKER}{url}{GUESS_MARKER}"),
        }
    }
}

/// Resolves the repository URL for one binary's build metadata.
///
/// A module under a known provider resolves directly from its path; a
/// malformed path there is an error, not a guess. Everything else goes
/// through the vanity lookup and degrades to a marked guess when that
/// finds nothing.
pub fn resolve_repo_url(
    meta: &BuildMetadata,
    registry: &ProviderRegistry,
    vanity: &dyn VanityLookup,
) -> Result<RepoUrl, MalformedPathError> {
    let domain = first_segment(&meta.module_path);
    if let Some(provider) = registry.lookup(domain) {
        let pair = provider.owner_repo(&meta.module_path)?;
        return Ok(RepoUrl::Resolved(provider.repo_url(&pair)));
    }

    match vanity.lookup(&meta.package_path) {
        // Not a vanity host after all; probably an unknown provider.
        None => Ok(RepoUrl::Guess(guess_url(&meta.module_path))),
        // The redirect target may itself be under a known or unknown
        // provider; either way it replaces the module path from here on.
        Some(target) => {
            let domain = first_segment(&target);
            match registry.lookup(domain) {
                Some(provider) => {
                    let pair = provider.owner_repo(&target)?;
                    Ok(RepoUrl::Resolved(provider.repo_url(&pair)))
                }
                None => Ok(RepoUrl::Guess(guess_url(&target))),
            }
        }
    }
}

fn first_segment(path: &str) -> &str {
    match path.split_once('/') {
        Some((first, _)) => first,
        None => path,
    }
}

/// Best-guess URL from the first three path segments (host, owner, repo),
/// or the whole path when shorter. Hosts that follow some other convention
/// will produce a wrong guess; the marker makes that visible.
fn guess_url(path: &str) -> String {
    let subs: Vec<&str> = path.split('/').collect();
    if subs.len() < 3 {
        return format!("https://{path}");
    }
    format!("https://{}/{}/{}", subs[0], subs[1], subs[2])
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Canned vanity lookup: records nothing, answers with a fixed target.
    struct StubVanity(Option<&'static str>);

    impl VanityLookup for StubVanity {
        fn lookup(&self, _package_path: &str) -> Option<String> {
            self.0.map(str::to_string)
        }
    }

    fn meta(module_path: &str, package_path: &str) -> BuildMetadata {
        BuildMetadata {
            package_path: package_path.to_string(),
            module_path: module_path.to_string(),
        }
    }

    #[test]
    fn known_provider_resolves_directly() {
        let registry = ProviderRegistry::builtin();
        let meta = meta(
            "github.com/mholt/archiver/v3",
            "github.com/mholt/archiver/v3/cmd/arc",
        );
        let url = resolve_repo_url(&meta, &registry, &StubVanity(None)).unwrap();
        assert_eq!(url, RepoUrl::Resolved("https://github.com/mholt/archiver".to_string()));
    }

    #[test]
    fn known_provider_with_short_path_is_an_error() {
        let registry = ProviderRegistry::builtin();
        let meta = meta("github.com/mholt", "github.com/mholt");
        let err = resolve_repo_url(&meta, &registry, &StubVanity(None)).unwrap_err();
        assert!(err.to_string().contains("github.com/mholt"));
    }

    #[test]
    fn vanity_redirect_to_known_provider_resolves() {
        let registry = ProviderRegistry::builtin();
        let meta = meta("fyne.io/fyne/v2", "fyne.io/fyne/v2");
        let url = resolve_repo_url(
            &meta,
            &registry,
            &StubVanity(Some("github.com/fyne-io/fyne")),
        )
        .unwrap();
        assert_eq!(url, RepoUrl::Resolved("https://github.com/fyne-io/fyne".to_string()));
    }

    #[test]
    fn vanity_redirect_to_unknown_provider_guesses_from_target() {
        let registry = ProviderRegistry::builtin();
        let meta = meta("tool.example/x", "tool.example/x");
        let url = resolve_repo_url(
            &meta,
            &registry,
            &StubVanity(Some("forge.example/owner/repo/extra")),
        )
        .unwrap();
        assert_eq!(url, RepoUrl::Guess("https://forge.example/owner/repo".to_string()));
    }

    #[test]
    fn vanity_redirect_with_malformed_target_is_an_error() {
        let registry = ProviderRegistry::builtin();
        let meta = meta("tool.example/x", "tool.example/x");
        let err = resolve_repo_url(&meta, &registry, &StubVanity(Some("github.com/only")))
            .unwrap_err();
        assert!(err.to_string().contains("github.com/only"));
    }

    #[test]
    fn vanity_miss_guesses_from_module_path() {
        let registry = ProviderRegistry::builtin();
        let meta = meta(
            "example.org/group/tool/v2",
            "example.org/group/tool/v2/cmd/tool",
        );
        let url = resolve_repo_url(&meta, &registry, &StubVanity(None)).unwrap();
        assert_eq!(url, RepoUrl::Guess("https://example.org/group/tool".to_string()));
    }

    #[test]
    fn short_unknown_path_guesses_whole_path() {
        let registry = ProviderRegistry::builtin();
        let meta = meta("example.org/tool", "example.org/tool");
        let url = resolve_repo_url(&meta, &registry, &StubVanity(None)).unwrap();
        assert_eq!(url, RepoUrl::Guess("https://example.org/tool".to_string()));
    }

    #[test]
    fn guesses_display_marked_and_never_look_resolved() {
        let guess = RepoUrl::Guess("https://example.org/a/b".to_string());
        let resolved = RepoUrl::Resolved("https://example.org/a/b".to_string());
        assert!(guess.is_guess());
        assert_ne!(guess, resolved);
        assert_ne!(guess.to_string(), resolved.to_string());
        assert_eq!(guess.to_string(), "\u{2753}https://example.org/a/b\u{2753}");
        assert_eq!(resolved.to_string(), "https://example.org/a/b");
    }
}
