use crate::enrichment::ResolveOptions;
use crate::enrichment::identity::{DEFAULT_CONCURRENCY, DEFAULT_LOOKUP_TIMEOUT};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IdentityConfig {
    /// Reverse-resolve client addresses into `ip_host`.
    #[serde(default = "default_true")]
    pub enable_host: bool,

    /// Compute the enclosing network into `ip_supernet`.
    #[serde(default = "default_true")]
    pub enable_net: bool,

    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    #[serde(default = "default_lookup_timeout_ms")]
    pub lookup_timeout_ms: u64,
}

impl IdentityConfig {
    pub fn is_enabled(&self) -> bool {
        self.enable_host || self.enable_net
    }

    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            do_host: self.enable_host,
            do_net: self.enable_net,
            concurrency: self.concurrency,
            lookup_timeout: Duration::from_millis(self.lookup_timeout_ms),
        }
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            enable_host: true,
            enable_net: true,
            concurrency: default_concurrency(),
            lookup_timeout_ms: default_lookup_timeout_ms(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

fn default_lookup_timeout_ms() -> u64 {
    DEFAULT_LOOKUP_TIMEOUT.as_millis() as u64
}
