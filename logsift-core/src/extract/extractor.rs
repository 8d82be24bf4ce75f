use crate::extract::error::{ExtractionFailure, FailureReason};
use crate::extract::grammar::{DATE_FORMAT, LineGrammar};
use crate::record::{Record, RequestFields};
use chrono::NaiveDate;

/// Extract one record from a raw log line.
///
/// Fields other than the date are copied verbatim from their capture groups.
pub fn extract(line: &str, grammar: &LineGrammar) -> Result<Record, ExtractionFailure> {
    let line = line.trim_end_matches(['\r', '\n']);

    let mismatch = || ExtractionFailure::new(FailureReason::GrammarMismatch, line);

    let captures = grammar.line().captures(line).ok_or_else(mismatch)?;

    // Optional groups that did not participate leave a hole.
    let field = |i: usize| {
        captures
            .get(i)
            .map(|m| m.as_str())
            .ok_or_else(mismatch)
    };

    let client_key = field(1)?;
    let date_field = field(2)?;
    let method = field(3)?;
    let path = field(4)?;
    let status = field(5)?;
    let size = field(6)?;
    let referrer = field(7)?;
    let user_agent = field(8)?;

    let timestamp = parse_date(date_field, grammar)
        .ok_or_else(|| ExtractionFailure::new(FailureReason::DateParse, line))?;

    Ok(Record::new(RequestFields {
        client_key: client_key.to_string(),
        timestamp,
        method: method.to_string(),
        path: path.to_string(),
        status: status.to_string(),
        size: size.to_string(),
        referrer: referrer.to_string(),
        user_agent: user_agent.to_string(),
    }))
}

fn parse_date(date_field: &str, grammar: &LineGrammar) -> Option<NaiveDate> {
    let date = grammar.date().captures(date_field)?.get(1)?;
    NaiveDate::parse_from_str(date.as_str(), DATE_FORMAT).ok()
}
