//! Read-only registry of known code-hosting providers.

use super::entry::{Hosted, Provider};
use std::collections::HashMap;

/// Domains of the major providers that follow the default owner/repo path
/// convention. Modules hosted here never need a vanity-import lookup.
const BUILTIN_DOMAINS: &[&str] = &[
    "github.com",
    "gitlab.com",
    "bitbucket.org",
    "sr.ht",
    "cs.opensource.google",
    "gitee.com",
    "codeberg.org",
];

/// Maps hosting domains to provider behavior. Populated once and never
/// mutated afterwards, so shared references are safe across threads.
pub struct ProviderRegistry {
    providers: HashMap<String, Box<dyn Provider>>,
}

impl ProviderRegistry {
    /// Registry preloaded with the builtin provider set.
    pub fn builtin() -> Self {
        let mut registry = Self {
            providers: HashMap::new(),
        };
        for domain in BUILTIN_DOMAINS {
            registry.register(Box::new(Hosted::new(*domain)));
        }
        registry
    }

    /// Registers a provider under its domain, replacing any existing entry.
    /// A provider with a non-default path convention plugs in here.
    pub fn register(&mut self, provider: Box<dyn Provider>) {
        self.providers
            .insert(provider.domain().to_string(), provider);
    }

    /// Registers additional domains that follow the default owner/repo
    /// convention (e.g. from the `extra_providers` config list).
    pub fn extend_default_convention<I>(&mut self, domains: I)
    where
        I: IntoIterator<Item = String>,
    {
        for domain in domains {
            self.register(Box::new(Hosted::new(domain)));
        }
    }

    pub fn lookup(&self, domain: &str) -> Option<&dyn Provider> {
        self.providers.get(domain).map(|p| p.as_ref())
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
