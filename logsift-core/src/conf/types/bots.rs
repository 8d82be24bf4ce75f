use crate::enrichment::bot::DEFAULT_TRUSTED_HOSTS;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BotConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Case-insensitive regex over resolved hostnames.
    #[serde(default = "default_trusted_hosts")]
    pub trusted_hosts: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            trusted_hosts: default_trusted_hosts(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_trusted_hosts() -> String {
    DEFAULT_TRUSTED_HOSTS.to_string()
}
