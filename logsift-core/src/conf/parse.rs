use crate::classify::ClassificationRuleSet;
use crate::conf::error::ConfigError;
use crate::conf::types::EntrypointConfig;
use std::fs;
use std::path::Path;

pub fn parse_entrypoint(path: &Path) -> Result<EntrypointConfig, ConfigError> {
    let s = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    hcl::from_str(&s).map_err(|e| ConfigError::parse(path, e))
}

/// A rule file holds top-level `contains_rules` and/or `exact_rules` lists.
pub fn parse_rules(path: &Path) -> Result<ClassificationRuleSet, ConfigError> {
    let s = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    hcl::from_str(&s).map_err(|e| ConfigError::parse(path, e))
}
