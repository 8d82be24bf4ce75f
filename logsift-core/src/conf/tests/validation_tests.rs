use crate::classify::{ClassificationConfigError, ClassificationRuleSet, Rule};
use crate::conf::types::EntrypointConfig;
use crate::conf::validation::validate_config;
use crate::conf::{ConfigError, LoadedConfig, RuleFile};
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};

fn loaded(entry: EntrypointConfig) -> LoadedConfig {
    LoadedConfig {
        entry_file: PathBuf::from("/test/logsift.hcl"),
        entry,
        rule_files: Vec::new(),
    }
}

#[test]
fn default_config_is_valid() {
    assert!(validate_config(loaded(EntrypointConfig::default())).is_ok());
}

#[test]
fn all_errors_are_reported_together() {
    // Arrange
    let mut entry = EntrypointConfig::default();
    entry.extract.line_grammar = r"(\S+) (\S+)".to_string();
    entry.pipeline.chunk_size = 0;
    entry.identity.concurrency = 0;
    entry.identity.lookup_timeout_ms = 0;
    entry.bots.trusted_hosts = "google|(".to_string();

    // Act
    let errors = validate_config(loaded(entry)).unwrap_err();

    // Assert
    let errors = errors.errors();
    assert_eq!(errors.len(), 5);
    assert!(matches!(errors[0], ConfigError::InvalidGrammar { .. }));
    assert!(matches!(errors[1], ConfigError::InvalidChunkSize { .. }));
    assert!(matches!(errors[2], ConfigError::InvalidConcurrency { .. }));
    assert!(matches!(errors[3], ConfigError::InvalidLookupTimeout { .. }));
    assert!(matches!(errors[4], ConfigError::InvalidTrustedHosts { .. }));
}

#[test]
fn disabled_identity_skips_pool_checks() {
    // Arrange
    let mut entry = EntrypointConfig::default();
    entry.identity.enable_host = false;
    entry.identity.enable_net = false;
    entry.identity.concurrency = 0;
    entry.bots.enabled = false;

    // Act
    let validated = validate_config(loaded(entry)).unwrap();

    // Assert
    assert!(validated.resolve_options().is_none());
    assert!(validated.trusted_hosts.is_none());
}

#[test]
fn bots_need_host_lookups() {
    // Arrange
    let mut entry = EntrypointConfig::default();
    entry.identity.enable_host = false;

    // Act
    let errors = validate_config(loaded(entry)).unwrap_err();

    // Assert
    assert_eq!(errors.errors().len(), 1);
    assert!(matches!(
        errors.errors()[0],
        ConfigError::BotsRequireHostLookup { .. }
    ));
}

#[test]
fn bad_rule_is_reported_once_against_its_file() {
    // Arrange
    let mut config = loaded(EntrypointConfig::default());
    config.rule_files.push(RuleFile {
        path: PathBuf::from("/test/rules/shop.hcl"),
        rules: ClassificationRuleSet::new(vec![Rule::new("shop", ["(/shop"])], vec![]),
    });

    // Act
    let errors = validate_config(config).unwrap_err();

    // Assert
    assert_eq!(errors.errors().len(), 1);
    match &errors.errors()[0] {
        ConfigError::InvalidRule { origin, source } => {
            assert_eq!(origin.file(), Path::new("/test/rules/shop.hcl"));
            assert!(matches!(
                source,
                ClassificationConfigError::InvalidPattern { .. }
            ));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn error_message_points_at_the_block() {
    // Arrange
    let mut entry = EntrypointConfig::default();
    entry.pipeline.chunk_size = 0;

    // Act
    let errors = validate_config(loaded(entry)).unwrap_err();

    // Assert
    assert_eq!(
        errors.errors()[0].to_string(),
        "/test/logsift.hcl: pipeline block: chunk_size must be at least 1"
    );
}
