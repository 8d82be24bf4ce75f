use crate::classify::Rule;
use crate::conf::types::{BotConfig, EntrypointConfig, IdentityConfig};
use crate::conf::{ConfigError, ENTRYPOINT_FILE, load_config, load_dsl_config};
use crate::extract::DEFAULT_LINE_GRAMMAR;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write(root: &Path, name: &str, contents: &str) {
    let path = root.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

#[test]
fn empty_entrypoint_uses_defaults() {
    // Arrange
    let dir = tempdir().unwrap();
    write(dir.path(), ENTRYPOINT_FILE, "");

    // Act
    let loaded = load_dsl_config(dir.path()).unwrap();

    // Assert
    assert_eq!(loaded.entry, EntrypointConfig::default());
    assert_eq!(loaded.entry.extract.line_grammar, DEFAULT_LINE_GRAMMAR);
    assert_eq!(loaded.entry.pipeline.chunk_size, 10_000);
    assert_eq!(loaded.entry.identity, IdentityConfig::default());
    assert_eq!(loaded.entry.bots, BotConfig::default());
    assert!(loaded.rule_files.is_empty());
}

#[test]
fn entrypoint_blocks_are_parsed() {
    // Arrange
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        ENTRYPOINT_FILE,
        r#"
pipeline = { chunk_size = 500 }

identity = {
  enable_net = false
  concurrency = 8
  lookup_timeout_ms = 750
}

bots = { trusted_hosts = "googlebot\\.com$" }

classify = {
  contains_rules = [
    { category = "blog", patterns = ["/blog"] },
  ]
  exact_rules = [
    { category = "home", patterns = ["/"] },
  ]
}
"#,
    );

    // Act
    let loaded = load_dsl_config(dir.path()).unwrap();

    // Assert
    let entry = loaded.entry;
    assert_eq!(entry.pipeline.chunk_size, 500);
    assert!(entry.identity.enable_host);
    assert!(!entry.identity.enable_net);
    assert_eq!(entry.identity.concurrency, 8);
    assert_eq!(entry.identity.lookup_timeout_ms, 750);
    assert_eq!(entry.bots.trusted_hosts, r"googlebot\.com$");
    assert_eq!(entry.classify.contains_rules, vec![Rule::new("blog", ["/blog"])]);
    assert_eq!(entry.classify.exact_rules, vec![Rule::new("home", ["/"])]);
}

#[test]
fn included_rule_files_are_appended_in_path_order() {
    // Arrange
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        ENTRYPOINT_FILE,
        r#"
include = { rules = "rules/*.hcl" }

classify = {
  contains_rules = [ { category = "inline", patterns = ["/x"] } ]
}
"#,
    );
    write(
        dir.path(),
        "rules/20-shop.hcl",
        r#"contains_rules = [ { category = "shop", patterns = ["/shop"] } ]"#,
    );
    write(
        dir.path(),
        "rules/10-blog.hcl",
        r#"
contains_rules = [ { category = "blog", patterns = ["/blog"] } ]
exact_rules = [ { category = "home", patterns = ["/"] } ]
"#,
    );

    // Act
    let validated = load_config(dir.path()).unwrap();

    // Assert
    let categories: Vec<&str> = validated
        .config
        .classify
        .contains_rules
        .iter()
        .map(|r| r.category.as_str())
        .collect();
    assert_eq!(categories, vec!["inline", "blog", "shop"]);
    assert_eq!(
        validated.config.rule_files,
        vec![
            dir.path().join("rules/10-blog.hcl"),
            dir.path().join("rules/20-shop.hcl"),
        ]
    );

    let classifier = validated.classifier.unwrap();
    assert_eq!(classifier.class_for("/shop/blog"), Some("shop"));
    assert_eq!(classifier.class_for("/"), Some("home"));
}

#[test]
fn missing_entrypoint_is_a_read_error() {
    // Arrange
    let dir = tempdir().unwrap();

    // Act
    let err = load_dsl_config(dir.path()).unwrap_err();

    // Assert
    match err {
        ConfigError::ReadFile { path, .. } => assert_eq!(path, dir.path().join(ENTRYPOINT_FILE)),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn unknown_field_is_a_parse_error() {
    // Arrange
    let dir = tempdir().unwrap();
    write(dir.path(), ENTRYPOINT_FILE, "pipeline = { chunk = 5 }\n");

    // Act
    let err = load_dsl_config(dir.path()).unwrap_err();

    // Assert
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn malformed_rule_file_names_the_file() {
    // Arrange
    let dir = tempdir().unwrap();
    write(dir.path(), ENTRYPOINT_FILE, r#"include = { rules = "rules/*.hcl" }"#);
    write(dir.path(), "rules/bad.hcl", "contains_rules = [ { category = \"x\" ");

    // Act
    let err = load_dsl_config(dir.path()).unwrap_err();

    // Assert
    match err {
        ConfigError::Parse { path, .. } => assert_eq!(path, dir.path().join("rules/bad.hcl")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn defaults_enable_every_stage_but_classification() {
    // Arrange
    let dir = tempdir().unwrap();
    write(dir.path(), ENTRYPOINT_FILE, "");

    // Act
    let validated = load_config(dir.path()).unwrap();

    // Assert
    let options = validated.resolve_options().unwrap();
    assert!(options.do_host && options.do_net);
    assert_eq!(options.concurrency, 50);
    assert_eq!(options.lookup_timeout.as_millis(), 3000);
    assert!(validated.trusted_hosts.is_some());
    assert!(validated.classifier.is_none());
}
