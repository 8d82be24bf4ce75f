use crate::extract::{DEFAULT_DATE_PATTERN, DEFAULT_LINE_GRAMMAR};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractConfig {
    #[serde(default = "default_line_grammar")]
    pub line_grammar: String,

    #[serde(default = "default_date_pattern")]
    pub date_pattern: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            line_grammar: default_line_grammar(),
            date_pattern: default_date_pattern(),
        }
    }
}

fn default_line_grammar() -> String {
    DEFAULT_LINE_GRAMMAR.to_string()
}

fn default_date_pattern() -> String {
    DEFAULT_DATE_PATTERN.to_string()
}
