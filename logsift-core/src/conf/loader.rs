use crate::classify::ClassificationRuleSet;
use crate::conf::discover::discover;
use crate::conf::error::ConfigError;
use crate::conf::parse::{parse_entrypoint, parse_rules};
use crate::conf::types::EntrypointConfig;
use crate::conf::validation::{ValidatedConfig, validate_config};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const ENTRYPOINT_FILE: &str = "logsift.hcl";

/// Parsed but not yet validated configuration, as written on disk.
#[derive(Debug, Clone, Serialize)]
pub struct LoadedConfig {
    pub entry_file: PathBuf,
    pub entry: EntrypointConfig,
    pub rule_files: Vec<RuleFile>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RuleFile {
    pub path: PathBuf,
    pub rules: ClassificationRuleSet,
}

pub fn load_config(root: &Path) -> Result<ValidatedConfig, ConfigError> {
    let loaded = load_dsl_config(root)?;

    //--------------------------------------------------------------------------
    // Semantic validation (aggregate all semantic errors)
    //--------------------------------------------------------------------------
    Ok(validate_config(loaded)?)
}

pub fn load_dsl_config(root: &Path) -> Result<LoadedConfig, ConfigError> {
    //--------------------------------------------------------------------------
    // Hard fail: IO and parsing
    //--------------------------------------------------------------------------
    let entry_file = root.join(ENTRYPOINT_FILE);
    let entry = parse_entrypoint(&entry_file)?;

    //--------------------------------------------------------------------------
    // Discover and parse included rule files (hard fail)
    //--------------------------------------------------------------------------
    let rule_paths = match &entry.include.rules {
        Some(pattern) => discover(root, pattern)?,
        None => Vec::new(),
    };

    let rule_files = rule_paths
        .into_iter()
        .map(|path| {
            let rules = parse_rules(&path)?;
            Ok(RuleFile { path, rules })
        })
        .collect::<Result<Vec<_>, ConfigError>>()?;

    Ok(LoadedConfig {
        entry_file,
        entry,
        rule_files,
    })
}
