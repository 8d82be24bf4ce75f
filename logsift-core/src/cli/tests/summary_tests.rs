use crate::cli::{render_run_summary, render_unite_summary};
use crate::enrichment::{BotSummary, LookupSummary, ResolveSummary};
use crate::pipeline::RunSummary;
use crate::stream::LineCounts;
use crate::unite::UniteSummary;
use std::path::Path;

#[test]
fn run_summary_lists_every_enabled_stage() {
    // Arrange
    let summary = RunSummary {
        lines: LineCounts {
            parsed_count: 3,
            failed_count: 1,
        },
        chunks: 1,
        records_written: 3,
        identity: ResolveSummary {
            distinct_keys: 2,
            host: LookupSummary {
                lookups: 2,
                resolved: 1,
                unresolved: 1,
                failed_tasks: 0,
            },
            net: LookupSummary::default(),
        },
        bots: BotSummary {
            evaluated: 2,
            validated: 1,
        },
        classified: 3,
    };

    // Act
    let text = render_run_summary(&summary, Path::new("out.tsv"));

    // Assert
    assert!(text.contains("3 records written to out.tsv (1 chunks)"));
    assert!(text.contains("parsed=3"));
    assert!(text.contains("75.0% parsed"));
    assert!(text.contains("2 distinct"));
    assert!(text.contains("resolved=1 unresolved=1"));
    assert!(!text.contains("networks:"));
    assert!(text.contains("validated=1 of 2 checked"));
    assert!(text.contains("classified: 3"));
}

#[test]
fn extraction_only_summary_skips_enrichment_lines() {
    let summary = RunSummary {
        lines: LineCounts {
            parsed_count: 2,
            failed_count: 0,
        },
        chunks: 1,
        records_written: 2,
        ..RunSummary::default()
    };

    let text = render_run_summary(&summary, Path::new("out.tsv"));

    assert_eq!(text.lines().count(), 2);
}

#[test]
fn unite_summary_names_the_output() {
    let text = render_unite_summary(
        &UniteSummary {
            archives: 4,
            bytes: 1024,
        },
        Path::new("all.log"),
    );

    assert!(text.ends_with("4 archives (1024 bytes) appended to all.log\n"));
}
