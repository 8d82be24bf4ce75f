use crate::classify::PageClassifier;
use crate::conf::types::RuntimeConfig;
use crate::enrichment::{ResolveOptions, TrustedHosts};
use crate::extract::LineGrammar;

/// Configuration that passed validation, with every pattern already compiled.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub config: RuntimeConfig,
    pub grammar: LineGrammar,
    /// `None` when bot validation is disabled.
    pub trusted_hosts: Option<TrustedHosts>,
    /// `None` when no classification rules are configured.
    pub classifier: Option<PageClassifier>,
}

impl ValidatedConfig {
    /// Lookup options, or `None` when both identity kinds are off.
    pub fn resolve_options(&self) -> Option<ResolveOptions> {
        let identity = &self.config.identity;
        identity.is_enabled().then(|| identity.resolve_options())
    }
}
