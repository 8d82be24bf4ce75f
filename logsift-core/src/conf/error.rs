use crate::classify::ClassificationConfigError;
use crate::conf::types::Origin;
use crate::conf::validation::ValidationErrors;
use crate::extract::GrammarError;
use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    //-------------------------------------------------------------------------
    // IO / Discovery
    //-------------------------------------------------------------------------
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("glob pattern error: {pattern}: {source}")]
    Glob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    //-------------------------------------------------------------------------
    // Parsing
    //-------------------------------------------------------------------------
    #[error("invalid configuration file: {path}\n\n{source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: hcl::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ValidationErrors),

    //-------------------------------------------------------------------------
    // Extraction
    //-------------------------------------------------------------------------
    #[error("{origin}: {source}")]
    #[diagnostic(
        code(logsift::extract::grammar),
        help("the line grammar needs exactly 8 capture groups and the date pattern exactly 1")
    )]
    InvalidGrammar {
        origin: Origin,
        #[source]
        source: GrammarError,
    },

    //-------------------------------------------------------------------------
    // Pipeline / Identity
    //-------------------------------------------------------------------------
    #[error("{origin}: chunk_size must be at least 1")]
    InvalidChunkSize { origin: Origin },

    #[error("{origin}: concurrency must be at least 1")]
    InvalidConcurrency { origin: Origin },

    #[error("{origin}: lookup_timeout_ms must be at least 1")]
    InvalidLookupTimeout { origin: Origin },

    //-------------------------------------------------------------------------
    // Bots
    //-------------------------------------------------------------------------
    #[error("{origin}: invalid trusted_hosts pattern '{pattern}': {source}")]
    InvalidTrustedHosts {
        origin: Origin,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("{origin}: bot validation needs host lookups")]
    #[diagnostic(
        code(logsift::bots::needs_host),
        help("set identity.enable_host = true or bots.enabled = false")
    )]
    BotsRequireHostLookup { origin: Origin },

    //-------------------------------------------------------------------------
    // Classification
    //-------------------------------------------------------------------------
    #[error("{origin}: {source}")]
    InvalidRule {
        origin: Origin,
        #[source]
        source: ClassificationConfigError,
    },
}

impl ConfigError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: hcl::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}
