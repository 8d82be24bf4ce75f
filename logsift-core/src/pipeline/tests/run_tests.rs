use crate::classify::{ClassificationRuleSet, Rule};
use crate::enrichment::identity::ResolutionFailure;
use crate::enrichment::{HostLookup, IdentityResolver, ResolveOptions, TrustedHosts};
use crate::extract::LineGrammar;
use crate::pipeline::{Pipeline, PipelineError};
use crate::stream::{Columns, TsvSink};
use pretty_assertions::assert_eq;
use std::collections::HashMap;
use std::io::{self, Cursor, Write};
use std::net::IpAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

struct TableLookup {
    names: HashMap<IpAddr, &'static str>,
    calls: AtomicUsize,
}

impl TableLookup {
    fn new(names: &[(&str, &'static str)]) -> Arc<Self> {
        Arc::new(Self {
            names: names
                .iter()
                .map(|(addr, name)| (addr.parse().unwrap(), *name))
                .collect(),
            calls: AtomicUsize::new(0),
        })
    }
}

impl HostLookup for TableLookup {
    fn reverse(&self, addr: IpAddr) -> Result<String, ResolutionFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.names
            .get(&addr)
            .map(|name| name.to_string())
            .ok_or(ResolutionFailure::NoName { addr })
    }
}

/// Lookup that outlives any sensible timeout.
struct HungLookup(Duration);

impl HostLookup for HungLookup {
    fn reverse(&self, addr: IpAddr) -> Result<String, ResolutionFailure> {
        std::thread::sleep(self.0);
        Err(ResolutionFailure::NoName { addr })
    }
}

/// Accepts buffered bytes but fails every write to the device.
struct BrokenWriter;

impl Write for BrokenWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::other("disk full"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Err(io::Error::other("disk full"))
    }
}

fn line(ip: &str, path: &str, agent: &str) -> String {
    format!(
        "{ip} - - [10/Oct/2023:13:55:36 +0000] \"GET {path} HTTP/1.1\" 200 512 \"-\" \"{agent}\"\n"
    )
}

fn grammar() -> LineGrammar {
    LineGrammar::combined().unwrap()
}

fn output(sink: TsvSink<Vec<u8>>) -> Vec<String> {
    let bytes = sink.into_inner().unwrap();
    String::from_utf8(bytes)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn extraction_only_run_writes_base_columns() {
    // Arrange
    let input = [
        line("192.0.2.1", "/", "curl/8.0"),
        "not a log line\n".to_string(),
        line("192.0.2.2", "/about", "curl/8.0"),
    ]
    .concat();
    let pipeline = Pipeline::new(grammar());
    let mut sink = TsvSink::new(Vec::new(), pipeline.columns()).unwrap();

    // Act
    let summary = pipeline.run(Cursor::new(input), &mut sink).unwrap();

    // Assert
    assert_eq!(summary.lines.parsed_count, 2);
    assert_eq!(summary.lines.failed_count, 1);
    assert_eq!(summary.records_written, 2);
    assert_eq!(summary.chunks, 1);
    assert_eq!(
        output(sink),
        vec![
            "ip\tdate\ttype_request\turl\tresp_code\tresp_size\tref_url\tuser_agent",
            "192.0.2.1\t2023-10-10\tGET\t/\t200\t512\t-\tcurl/8.0",
            "192.0.2.2\t2023-10-10\tGET\t/about\t200\t512\t-\tcurl/8.0",
        ]
    );
}

#[test]
fn all_stages_fill_every_enrichment_column() {
    // Arrange
    let lookup = TableLookup::new(&[("66.249.66.1", "crawl-66-249-66-1.googlebot.com")]);
    let resolver = IdentityResolver::new(lookup.clone(), ResolveOptions::default());
    let classifier = ClassificationRuleSet::new(
        vec![Rule::new("blog", ["/blog"])],
        vec![Rule::new("home", ["/"])],
    )
    .compile()
    .unwrap();
    let pipeline = Pipeline::new(grammar())
        .with_identity(resolver)
        .with_bot_validation(TrustedHosts::new("google|yandex|bing").unwrap())
        .with_classifier(classifier);

    let input = [
        line("66.249.66.1", "/blog/post-1", "Googlebot/2.1"),
        line("198.51.100.7", "/", "Googlebot/2.1"),
        line("66.249.66.1", "/", "Googlebot/2.1"),
    ]
    .concat();
    let mut sink = TsvSink::new(Vec::new(), pipeline.columns()).unwrap();

    // Act
    let summary = pipeline.run(Cursor::new(input), &mut sink).unwrap();

    // Assert
    assert_eq!(pipeline.columns(), Columns::all());
    assert_eq!(lookup.calls.load(Ordering::SeqCst), 2);
    assert_eq!(summary.identity.distinct_keys, 2);
    assert_eq!(summary.identity.host.resolved, 1);
    assert_eq!(summary.identity.host.unresolved, 1);
    assert_eq!(summary.bots.evaluated, 2);
    assert_eq!(summary.bots.validated, 2);
    assert_eq!(summary.classified, 3);

    let rows = output(sink);
    assert_eq!(
        rows[0],
        "ip\tdate\ttype_request\turl\tresp_code\tresp_size\tref_url\tuser_agent\tip_host\tip_supernet\tbot_valid\tpage_class"
    );
    assert_eq!(
        rows[1],
        "66.249.66.1\t2023-10-10\tGET\t/blog/post-1\t200\t512\t-\tGooglebot/2.1\tcrawl-66-249-66-1.googlebot.com\t66.249.66.0/31\tTrue\tblog"
    );
    assert_eq!(
        rows[2],
        "198.51.100.7\t2023-10-10\tGET\t/\t200\t512\t-\tGooglebot/2.1\tN/A\t198.51.100.6/31\t\thome"
    );
    assert_eq!(rows.len(), 4);
}

#[test]
fn chunks_share_one_header() {
    // Arrange
    let input: String = (1..=5)
        .map(|i| line(&format!("192.0.2.{i}"), "/", "curl/8.0"))
        .collect();
    let pipeline = Pipeline::new(grammar()).with_chunk_size(2);
    let mut sink = TsvSink::new(Vec::new(), pipeline.columns()).unwrap();

    // Act
    let summary = pipeline.run(Cursor::new(input), &mut sink).unwrap();

    // Assert
    assert_eq!(summary.chunks, 3);
    let rows = output(sink);
    assert_eq!(rows.len(), 6);
    assert_eq!(rows.iter().filter(|r| r.starts_with("ip\t")).count(), 1);
}

#[test]
fn lookups_are_not_shared_across_chunks() {
    // Arrange
    let lookup = TableLookup::new(&[]);
    let options = ResolveOptions {
        do_net: false,
        ..ResolveOptions::default()
    };
    let pipeline = Pipeline::new(grammar())
        .with_chunk_size(2)
        .with_identity(IdentityResolver::new(lookup.clone(), options));
    let input: String = (0..4).map(|_| line("192.0.2.9", "/", "curl/8.0")).collect();
    let mut sink = TsvSink::new(Vec::new(), pipeline.columns()).unwrap();

    // Act
    let summary = pipeline.run(Cursor::new(input), &mut sink).unwrap();

    // Assert
    assert_eq!(lookup.calls.load(Ordering::SeqCst), 2);
    assert_eq!(summary.identity.host.lookups, 2);
    assert_eq!(summary.identity.net.lookups, 0);
}

#[test]
fn sink_with_other_columns_is_rejected() {
    // Arrange
    let pipeline = Pipeline::new(grammar());
    let mut sink = TsvSink::new(Vec::new(), Columns::all()).unwrap();

    // Act
    let err = pipeline
        .run(Cursor::new(line("192.0.2.1", "/", "curl/8.0")), &mut sink)
        .unwrap_err();

    // Assert
    assert!(matches!(err, PipelineError::ColumnMismatch { .. }));
    assert_eq!(sink.rows(), 0);
}

#[test]
fn empty_source_writes_only_the_header() {
    let pipeline = Pipeline::new(grammar());
    let mut sink = TsvSink::new(Vec::new(), pipeline.columns()).unwrap();

    let summary = pipeline.run(Cursor::new(""), &mut sink).unwrap();

    assert_eq!(summary.chunks, 0);
    assert_eq!(summary.parse_ratio(), 1.0);
    assert_eq!(output(sink).len(), 1);
}

#[test]
fn failed_write_does_not_wait_for_hung_lookups() {
    // Arrange
    let options = ResolveOptions {
        do_net: false,
        lookup_timeout: Duration::from_millis(10),
        ..ResolveOptions::default()
    };
    let resolver = IdentityResolver::new(Arc::new(HungLookup(Duration::from_secs(5))), options);
    let pipeline = Pipeline::new(grammar()).with_identity(resolver);
    let mut sink = TsvSink::new(BrokenWriter, pipeline.columns()).unwrap();
    let started = Instant::now();

    // Act
    let err = pipeline
        .run(Cursor::new(line("192.0.2.1", "/", "curl/8.0")), &mut sink)
        .unwrap_err();

    // Assert
    assert!(matches!(err, PipelineError::Sink(_)), "{err:?}");
    let elapsed = started.elapsed();
    assert!(elapsed < Duration::from_secs(2), "run took {elapsed:?}");
}
