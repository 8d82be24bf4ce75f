use thiserror::Error;

/// A rule set that cannot be used. Rules are configuration, so this fails the
/// whole classification call rather than individual records.
#[derive(Debug, Error)]
pub enum ClassificationConfigError {
    #[error("rule #{index} has an empty category name")]
    EmptyCategory { index: usize },

    #[error("contains rule '{category}' has no patterns")]
    NoPatterns { category: String },

    #[error("contains rule '{category}' has an invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        category: String,
        pattern: String,
        #[source]
        source: Box<regex::Error>,
    },
}
