use crate::classify::ClassificationRuleSet;
use crate::conf::types::{BotConfig, ExtractConfig, IdentityConfig, PipelineConfig};
use serde::{Deserialize, Serialize};

/// Represents the top-level `logsift.hcl` file. Every block is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EntrypointConfig {
    #[serde(default)]
    pub include: IncludeConfig,

    #[serde(default)]
    pub extract: ExtractConfig,

    #[serde(default)]
    pub pipeline: PipelineConfig,

    #[serde(default)]
    pub identity: IdentityConfig,

    #[serde(default)]
    pub bots: BotConfig,

    /// Rules declared inline; included rule files are appended after these.
    #[serde(default)]
    pub classify: ClassificationRuleSet,
}

/// Glob patterns, relative to the config directory, of files to pull in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IncludeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<String>,
}
