use crate::enrichment::LookupSummary;
use crate::pipeline::RunSummary;
use crate::unite::UniteSummary;
use owo_colors::OwoColorize;
use std::fmt::Write;
use std::path::Path;

pub fn render_run_summary(summary: &RunSummary, output: &Path) -> String {
    let mut out = String::new();
    let lines = &summary.lines;

    let _ = writeln!(
        out,
        "{} {} records written to {} ({} chunks)",
        "✔".green(),
        summary.records_written,
        output.display(),
        summary.chunks
    );

    let failed = if lines.failed_count > 0 {
        lines.failed_count.yellow().to_string()
    } else {
        lines.failed_count.to_string()
    };
    let _ = writeln!(
        out,
        "  lines:      parsed={} failed={} ({:.1}% parsed)",
        lines.parsed_count,
        failed,
        summary.parse_ratio() * 100.0
    );

    if summary.identity.distinct_keys > 0 {
        let _ = writeln!(
            out,
            "  clients:    {} distinct",
            summary.identity.distinct_keys
        );
        render_lookup(&mut out, "hosts", &summary.identity.host);
        render_lookup(&mut out, "networks", &summary.identity.net);
    }

    if summary.bots.evaluated > 0 {
        let _ = writeln!(
            out,
            "  bots:       validated={} of {} checked",
            summary.bots.validated, summary.bots.evaluated
        );
    }

    if summary.classified > 0 {
        let _ = writeln!(out, "  classified: {}", summary.classified);
    }

    out
}

fn render_lookup(out: &mut String, label: &str, lookup: &LookupSummary) {
    if lookup.lookups == 0 {
        return;
    }

    let _ = write!(
        out,
        "  {:<11} resolved={} unresolved={}",
        format!("{label}:"),
        lookup.resolved,
        lookup.unresolved
    );
    if lookup.failed_tasks > 0 {
        let _ = write!(out, " {}", format!("lost={}", lookup.failed_tasks).red());
    }
    out.push('\n');
}

pub fn render_unite_summary(summary: &UniteSummary, output: &Path) -> String {
    format!(
        "{} {} archives ({} bytes) appended to {}\n",
        "✔".green(),
        summary.archives,
        summary.bytes,
        output.display()
    )
}
