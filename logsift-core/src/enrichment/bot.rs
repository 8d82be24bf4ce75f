use crate::record::{Record, UNRESOLVED};
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use std::ops::AddAssign;

/// Hostname fragments of the major search-engine crawlers.
pub const DEFAULT_TRUSTED_HOSTS: &str = "google|yandex|msn|bing";

/// Case-insensitive pattern over reverse hostnames of trusted crawlers.
#[derive(Debug, Clone)]
pub struct TrustedHosts {
    pattern: Regex,
}

impl TrustedHosts {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let pattern = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self { pattern })
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn is_trusted(&self, host: &str) -> bool {
        self.pattern.is_match(host)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BotSummary {
    /// Records that had a hostname to check.
    pub evaluated: u64,
    pub validated: u64,
}

impl AddAssign for BotSummary {
    fn add_assign(&mut self, other: Self) {
        self.evaluated += other.evaluated;
        self.validated += other.validated;
    }
}

/// Set `is_validated_bot` on every record with a usable resolved hostname.
///
/// Records without one (never resolved, or resolved to `N/A`) stay absent:
/// "could not check" is not the same answer as "checked and not a crawler".
pub fn validate(records: &mut [Record], trusted: &TrustedHosts) -> BotSummary {
    let mut summary = BotSummary::default();

    for record in records {
        let verdict = match record.resolved_host() {
            Some(host) if host != UNRESOLVED => trusted.is_trusted(host),
            _ => continue,
        };

        if record.set_validated_bot(verdict) {
            summary.evaluated += 1;
            summary.validated += u64::from(verdict);
        }
    }

    summary
}
