use crate::classify::{ClassificationRuleSet, PageClassifier};
use crate::conf::error::ConfigError;
use crate::conf::loader::LoadedConfig;
use crate::conf::types::{
    BotConfig, ExtractConfig, IdentityConfig, Origin, PipelineConfig, RuntimeConfig,
};
use crate::conf::validation::validated_config::ValidatedConfig;
use crate::conf::validation::validation_ctx::{ValidationCtx, ValidationErrors};
use crate::enrichment::TrustedHosts;
use crate::extract::LineGrammar;
use std::path::Path;

/// Validate everything in a loaded config and compile its patterns.
///
/// Every check runs; all failures come back together.
pub fn validate_config(loaded: LoadedConfig) -> Result<ValidatedConfig, ValidationErrors> {
    let mut ctx = ValidationCtx::default();
    let file = loaded.entry_file.as_path();
    let entry = &loaded.entry;

    let grammar = ctx.check(validate_extract(&entry.extract, file));
    validate_pipeline(&entry.pipeline, file, &mut ctx);
    validate_identity(&entry.identity, file, &mut ctx);
    let trusted_hosts = ctx.check(validate_bots(&entry.bots, &entry.identity, file));

    let mut rules = entry.classify.clone();
    let mut rules_valid =
        validate_rules(&entry.classify, Origin::new(file, "classify", None), &mut ctx);
    for rule_file in &loaded.rule_files {
        rules_valid &= validate_rules(
            &rule_file.rules,
            Origin::new(&rule_file.path, "rules", None),
            &mut ctx,
        );
        rules.extend(rule_file.rules.clone());
    }
    let classifier = if rules_valid {
        ctx.check(compile_merged(&rules, file))
    } else {
        None
    };

    let compiled = grammar.zip(trusted_hosts).zip(classifier);
    let ((grammar, trusted_hosts), classifier) = ctx.finish(compiled)?;

    Ok(ValidatedConfig {
        config: RuntimeConfig {
            extract: entry.extract.clone(),
            pipeline: entry.pipeline,
            identity: entry.identity,
            bots: entry.bots.clone(),
            classify: rules,
            rule_files: loaded.rule_files.iter().map(|f| f.path.clone()).collect(),
        },
        grammar,
        trusted_hosts,
        classifier,
    })
}

pub fn validate_extract(extract: &ExtractConfig, file: &Path) -> Result<LineGrammar, ConfigError> {
    LineGrammar::new(&extract.line_grammar, &extract.date_pattern).map_err(|source| {
        ConfigError::InvalidGrammar {
            origin: Origin::new(file, "extract", None),
            source,
        }
    })
}

pub fn validate_pipeline(pipeline: &PipelineConfig, file: &Path, ctx: &mut ValidationCtx) {
    if pipeline.chunk_size == 0 {
        ctx.push(ConfigError::InvalidChunkSize {
            origin: Origin::new(file, "pipeline", None),
        });
    }
}

pub fn validate_identity(identity: &IdentityConfig, file: &Path, ctx: &mut ValidationCtx) {
    if !identity.is_enabled() {
        return;
    }

    let origin = Origin::new(file, "identity", None);
    if identity.concurrency == 0 {
        ctx.push(ConfigError::InvalidConcurrency {
            origin: origin.clone(),
        });
    }
    if identity.lookup_timeout_ms == 0 {
        ctx.push(ConfigError::InvalidLookupTimeout { origin });
    }
}

/// `Ok(None)` when bot validation is switched off.
pub fn validate_bots(
    bots: &BotConfig,
    identity: &IdentityConfig,
    file: &Path,
) -> Result<Option<TrustedHosts>, ConfigError> {
    if !bots.enabled {
        return Ok(None);
    }

    let origin = Origin::new(file, "bots", None);
    if !identity.enable_host {
        return Err(ConfigError::BotsRequireHostLookup { origin });
    }

    TrustedHosts::new(&bots.trusted_hosts)
        .map(Some)
        .map_err(|source| ConfigError::InvalidTrustedHosts {
            origin,
            pattern: bots.trusted_hosts.clone(),
            source,
        })
}

/// Compile one file's rules alone so errors point at the file that has them.
pub fn validate_rules(
    rules: &ClassificationRuleSet,
    origin: Origin,
    ctx: &mut ValidationCtx,
) -> bool {
    match rules.compile() {
        Ok(_) => true,
        Err(source) => {
            ctx.push(ConfigError::InvalidRule { origin, source });
            false
        }
    }
}

fn compile_merged(
    rules: &ClassificationRuleSet,
    file: &Path,
) -> Result<Option<PageClassifier>, ConfigError> {
    if rules.is_empty() {
        return Ok(None);
    }

    rules
        .compile()
        .map(Some)
        .map_err(|source| ConfigError::InvalidRule {
            origin: Origin::new(file, "classify", None),
            source,
        })
}
