use crate::conf::{ConfigError, load_config};
use miette::Report;
use std::path::PathBuf;

pub fn check(path: PathBuf, plain: bool) -> anyhow::Result<()> {
    match load_config(&path) {
        Ok(validated) => {
            let cfg = &validated.config;
            println!("✔ Config loaded successfully");
            println!("✔ chunk size {}", cfg.pipeline.chunk_size);
            match validated.resolve_options() {
                Some(options) => println!(
                    "✔ identity lookups enabled (host={}, net={}, concurrency={}, timeout={}ms)",
                    options.do_host,
                    options.do_net,
                    options.concurrency,
                    options.lookup_timeout.as_millis()
                ),
                None => println!("✔ identity lookups disabled"),
            }
            match &validated.trusted_hosts {
                Some(trusted) => println!("✔ bot validation against '{}'", trusted.as_str()),
                None => println!("✔ bot validation disabled"),
            }
            println!(
                "✔ {} contains rules, {} exact rules from {} rule files",
                cfg.classify.contains_rules.len(),
                cfg.classify.exact_rules.len(),
                cfg.rule_files.len()
            );
            Ok(())
        }
        Err(err) => {
            print_config_error(err, plain);
            std::process::exit(1);
        }
    }
}

pub fn print_config_error(err: ConfigError, plain: bool) {
    let hint = config_error_hint(&err);
    if plain {
        eprintln!("{}", err);
        if let ConfigError::Validation(errors) = &err {
            for related in errors.errors() {
                eprintln!("  - {}", related);
            }
        }
    } else {
        eprintln!();
        eprintln!("{:?}", Report::new(err));
    }
    if let Some(hint) = hint {
        eprintln!();
        eprintln!("{}", hint);
    }
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        //---------------------------------------------------------------------
        // Missing entrypoint
        //---------------------------------------------------------------------
        ConfigError::ReadFile { .. } => Some(
            "The config directory must contain a logsift.hcl file.\n\
             \n\
             Create one with:\n\
             \n\
             logsift config init <dir>",
        ),

        //---------------------------------------------------------------------
        // Validation errors
        //---------------------------------------------------------------------
        ConfigError::Validation(errors) => errors.errors().iter().find_map(config_error_hint),

        ConfigError::InvalidGrammar { .. } => Some(
            "The line grammar must capture, in order: client, timestamp, method,\n\
             path, status, size, referrer and user agent (8 groups).\n\
             The date pattern must capture the day/month/year part of the\n\
             timestamp (1 group), e.g. 10/Oct/2023.\n\
             \n\
             Remove the extract block to use the combined log format.",
        ),

        ConfigError::BotsRequireHostLookup { .. } => Some(
            "Bot validation matches the reverse hostname of each client.\n\
             \n\
             Either enable host lookups:\n\
             \n\
             identity = { enable_host = true }\n\
             \n\
             or turn bot validation off:\n\
             \n\
             bots = { enabled = false }",
        ),

        ConfigError::InvalidRule { .. } => Some(
            "Classification rules need a category and at least one pattern.\n\
             Substring patterns are regular expressions; escape '.', '?' and '('.\n\
             \n\
             Example:\n\
             \n\
             contains_rules = [\n\
             \x20 { category = \"blog\", patterns = [\"/blog\", \"/news\"] },\n\
             ]",
        ),

        //---------------------------------------------------------------------
        // Everything else: no hint
        //---------------------------------------------------------------------
        _ => None,
    }
}
