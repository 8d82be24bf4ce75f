use crate::extract::error::{GrammarError, PatternKind};
use regex::Regex;

/// Client key, date, method, path, status, size, referrer, user agent.
pub const LINE_FIELDS: usize = 8;

/// Combined/common log format. The time of day is left inside the date field.
pub const DEFAULT_LINE_GRAMMAR: &str =
    r#"(\S+).*\[(.*)\] "(\S+) (\S+) HTTP/.*" (\S+) (\S+) "(.*)" "(.*)"$"#;

/// Day, month name, year.
pub const DEFAULT_DATE_PATTERN: &str = r"(\d{2}/.*/\d{4})";

/// Format the date capture is parsed with, e.g. `10/Oct/2023`.
pub const DATE_FORMAT: &str = "%d/%b/%Y";

/// The compiled pair of patterns a line is extracted with.
///
/// Construction checks the capture-group arity so a grammar that compiles but
/// captures the wrong number of fields is rejected up front rather than
/// failing every line.
#[derive(Debug, Clone)]
pub struct LineGrammar {
    line: Regex,
    date: Regex,
}

impl LineGrammar {
    pub fn new(line_pattern: &str, date_pattern: &str) -> Result<Self, GrammarError> {
        Ok(Self {
            line: compile(PatternKind::Line, line_pattern, LINE_FIELDS)?,
            date: compile(PatternKind::Date, date_pattern, 1)?,
        })
    }

    /// The grammar for combined-format access logs.
    pub fn combined() -> Result<Self, GrammarError> {
        Self::new(DEFAULT_LINE_GRAMMAR, DEFAULT_DATE_PATTERN)
    }

    pub(crate) fn line(&self) -> &Regex {
        &self.line
    }

    pub(crate) fn date(&self) -> &Regex {
        &self.date
    }
}

fn compile(kind: PatternKind, pattern: &str, groups: usize) -> Result<Regex, GrammarError> {
    let regex = Regex::new(pattern).map_err(|source| GrammarError::InvalidPattern {
        kind,
        pattern: pattern.to_string(),
        source,
    })?;

    // captures_len counts the implicit whole-match group
    let found = regex.captures_len() - 1;
    if found != groups {
        return Err(GrammarError::Arity {
            kind,
            pattern: pattern.to_string(),
            expected: groups,
            found,
        });
    }

    Ok(regex)
}
