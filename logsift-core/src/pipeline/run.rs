use crate::classify::PageClassifier;
use crate::conf::ValidatedConfig;
use crate::enrichment::{IdentityResolver, TrustedHosts, bot};
use crate::extract::LineGrammar;
use crate::pipeline::error::PipelineError;
use crate::pipeline::summary::RunSummary;
use crate::stream::{Columns, RecordStream, TsvSink};
use std::io::{BufRead, Write};
use std::time::Duration;
use tokio::runtime::Runtime;
use tracing::info;

pub const DEFAULT_CHUNK_SIZE: usize = 10_000;

/// How long a finished run waits for lookups still parked on blocking threads.
const SHUTDOWN_GRACE: Duration = Duration::from_millis(250);

pub struct Pipeline {
    grammar: LineGrammar,
    chunk_size: usize,
    identity: Option<IdentityResolver>,
    trusted_hosts: Option<TrustedHosts>,
    classifier: Option<PageClassifier>,
}

impl Pipeline {
    /// Extraction only. Enable further stages with the `with_*` methods.
    pub fn new(grammar: LineGrammar) -> Self {
        Self {
            grammar,
            chunk_size: DEFAULT_CHUNK_SIZE,
            identity: None,
            trusted_hosts: None,
            classifier: None,
        }
    }

    pub fn from_validated(validated: &ValidatedConfig) -> Self {
        let mut pipeline = Self::new(validated.grammar.clone())
            .with_chunk_size(validated.config.pipeline.chunk_size);

        if let Some(options) = validated.resolve_options() {
            pipeline = pipeline.with_identity(IdentityResolver::system(options));
        }
        if let Some(trusted) = &validated.trusted_hosts {
            pipeline = pipeline.with_bot_validation(trusted.clone());
        }
        if let Some(classifier) = &validated.classifier {
            pipeline = pipeline.with_classifier(classifier.clone());
        }

        pipeline
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn with_identity(mut self, resolver: IdentityResolver) -> Self {
        self.identity = Some(resolver);
        self
    }

    pub fn with_bot_validation(mut self, trusted: TrustedHosts) -> Self {
        self.trusted_hosts = Some(trusted);
        self
    }

    pub fn with_classifier(mut self, classifier: PageClassifier) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Output columns produced by the enabled stages.
    pub fn columns(&self) -> Columns {
        let options = self.identity.as_ref().map(IdentityResolver::options);
        Columns {
            host: options.is_some_and(|o| o.do_host),
            net: options.is_some_and(|o| o.do_net),
            bot: self.trusted_hosts.is_some(),
            page_class: self.classifier.is_some(),
        }
    }

    /// Run `source` to completion, writing every enriched chunk to `sink`.
    ///
    /// Bad lines are counted and skipped. Source and sink I/O errors end the
    /// run; rows already written stay in the sink.
    pub fn run<R: BufRead, W: Write>(
        &self,
        source: R,
        sink: &mut TsvSink<W>,
    ) -> Result<RunSummary, PipelineError> {
        let expected = self.columns();
        if sink.columns() != expected {
            return Err(PipelineError::ColumnMismatch {
                expected: expected.header(),
                found: sink.columns().header(),
            });
        }

        let runtime = match &self.identity {
            Some(_) => Some(lookup_runtime()?),
            None => None,
        };

        let mut stream = RecordStream::new(source, &self.grammar);
        let mut summary = RunSummary::default();
        let driven = self.drive(&mut stream, sink, runtime.as_ref(), &mut summary);

        // Runs on every exit path; dropping the runtime would wait on hung lookups.
        if let Some(runtime) = runtime {
            runtime.shutdown_timeout(SHUTDOWN_GRACE);
        }

        driven?;
        summary.lines = stream.counts();

        info!(
            parsed = summary.lines.parsed_count,
            failed = summary.lines.failed_count,
            chunks = summary.chunks,
            hosts_resolved = summary.identity.host.resolved,
            hosts_unresolved = summary.identity.host.unresolved,
            nets_resolved = summary.identity.net.resolved,
            nets_unresolved = summary.identity.net.unresolved,
            bots_validated = summary.bots.validated,
            classified = summary.classified,
            "run complete"
        );

        Ok(summary)
    }

    fn drive<R: BufRead, W: Write>(
        &self,
        stream: &mut RecordStream<'_, R>,
        sink: &mut TsvSink<W>,
        runtime: Option<&Runtime>,
        summary: &mut RunSummary,
    ) -> Result<(), PipelineError> {
        while let Some(mut chunk) = stream.next_chunk(self.chunk_size)? {
            summary.chunks += 1;

            if let (Some(resolver), Some(runtime)) = (&self.identity, runtime) {
                let resolved = runtime.block_on(resolver.resolve(&mut chunk));
                info!(
                    chunk = summary.chunks,
                    records = chunk.len(),
                    distinct_keys = resolved.distinct_keys,
                    "identity enrichment complete"
                );
                summary.identity += resolved;
            }

            if let Some(trusted) = &self.trusted_hosts {
                summary.bots += bot::validate(&mut chunk, trusted);
            }

            if let Some(classifier) = &self.classifier {
                summary.classified += classifier.classify(&mut chunk);
            }

            sink.write_chunk(&chunk)?;
            summary.records_written += chunk.len() as u64;

            info!(
                chunk = summary.chunks,
                records = chunk.len(),
                failed_lines = stream.counts().failed_count,
                "chunk written"
            );
        }

        sink.flush()?;
        Ok(())
    }
}

fn lookup_runtime() -> Result<Runtime, PipelineError> {
    tokio::runtime::Builder::new_multi_thread()
        .thread_name("logsift-lookup")
        .enable_all()
        .build()
        .map_err(PipelineError::Runtime)
}
