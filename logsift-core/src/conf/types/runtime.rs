use crate::classify::ClassificationRuleSet;
use crate::conf::types::{BotConfig, ExtractConfig, IdentityConfig, PipelineConfig};
use serde::Serialize;
use std::path::PathBuf;

/// The effective configuration after includes are merged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuntimeConfig {
    pub extract: ExtractConfig,
    pub pipeline: PipelineConfig,
    pub identity: IdentityConfig,
    pub bots: BotConfig,
    pub classify: ClassificationRuleSet,
    /// Included rule files, in the order their rules were appended.
    pub rule_files: Vec<PathBuf>,
}
