use crate::enrichment::{BotSummary, ResolveSummary};
use crate::stream::LineCounts;
use serde::Serialize;

/// Everything a run did, for the log and for `logsift run` output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub lines: LineCounts,
    pub chunks: u64,
    pub records_written: u64,
    pub identity: ResolveSummary,
    pub bots: BotSummary,
    pub classified: u64,
}

impl RunSummary {
    /// Share of input lines that produced a record, in `[0, 1]`.
    pub fn parse_ratio(&self) -> f64 {
        match self.lines.total() {
            0 => 1.0,
            total => self.lines.parsed_count as f64 / total as f64,
        }
    }
}
