use std::fmt;
use thiserror::Error;

/// Why a line was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureReason {
    /// The line grammar did not match or a capture group was missing.
    GrammarMismatch,
    /// The date field did not yield a `dd/Mon/yyyy` date.
    DateParse,
}

impl FailureReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureReason::GrammarMismatch => "grammar_mismatch",
            FailureReason::DateParse => "date_parse",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{reason}: {raw_line}")]
pub struct ExtractionFailure {
    pub reason: FailureReason,
    pub raw_line: String,
}

impl ExtractionFailure {
    pub(crate) fn new(reason: FailureReason, raw_line: &str) -> Self {
        Self {
            reason,
            raw_line: raw_line.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    Line,
    Date,
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternKind::Line => f.write_str("line grammar"),
            PatternKind::Date => f.write_str("date pattern"),
        }
    }
}

#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("invalid {kind} '{pattern}': {source}")]
    InvalidPattern {
        kind: PatternKind,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("{kind} '{pattern}' has {found} capture groups, expected {expected}")]
    Arity {
        kind: PatternKind,
        pattern: String,
        expected: usize,
        found: usize,
    },
}
