use crate::extract::{LineGrammar, extract};
use crate::record::Record;
use crate::stream::error::StreamError;
use crate::stream::sink::TsvSink;
use serde::Serialize;
use std::io::{BufRead, Write};
use tracing::warn;

/// Parsed vs dropped line counts for one pass over a source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LineCounts {
    pub parsed_count: u64,
    pub failed_count: u64,
}

impl LineCounts {
    pub fn total(&self) -> u64 {
        self.parsed_count + self.failed_count
    }
}

/// Single forward pass over a line-oriented log source.
pub struct RecordStream<'g, R> {
    reader: R,
    grammar: &'g LineGrammar,
    buf: Vec<u8>,
    line_no: u64,
    counts: LineCounts,
}

impl<'g, R: BufRead> RecordStream<'g, R> {
    pub fn new(reader: R, grammar: &'g LineGrammar) -> Self {
        Self {
            reader,
            grammar,
            buf: Vec::new(),
            line_no: 0,
            counts: LineCounts::default(),
        }
    }

    pub fn counts(&self) -> LineCounts {
        self.counts
    }

    /// Next record in input order, skipping lines that fail extraction.
    ///
    /// Lines that are not valid UTF-8 are decoded lossily and still offered to
    /// the grammar.
    pub fn next_record(&mut self) -> Result<Option<Record>, StreamError> {
        loop {
            self.buf.clear();
            let read = self
                .reader
                .read_until(b'\n', &mut self.buf)
                .map_err(|source| StreamError::SourceRead {
                    line: self.line_no + 1,
                    source,
                })?;

            if read == 0 {
                return Ok(None);
            }
            self.line_no += 1;

            let line = String::from_utf8_lossy(&self.buf);
            match extract(&line, self.grammar) {
                Ok(record) => {
                    self.counts.parsed_count += 1;
                    return Ok(Some(record));
                }
                Err(failure) => {
                    self.counts.failed_count += 1;
                    warn!(
                        line = self.line_no,
                        reason = %failure.reason,
                        raw_line = %failure.raw_line,
                        "skipping log line"
                    );
                }
            }
        }
    }

    /// Up to `size` records; `None` once the source is exhausted.
    pub fn next_chunk(&mut self, size: usize) -> Result<Option<Vec<Record>>, StreamError> {
        let size = size.max(1);
        let mut chunk = Vec::new();

        while chunk.len() < size {
            match self.next_record()? {
                Some(record) => chunk.push(record),
                None => break,
            }
        }

        Ok((!chunk.is_empty()).then_some(chunk))
    }

    pub fn chunks(&mut self, size: usize) -> Chunks<'_, 'g, R> {
        Chunks { stream: self, size }
    }
}

impl<R: BufRead> Iterator for RecordStream<'_, R> {
    type Item = Result<Record, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

/// Iterator over bounded batches of a [`RecordStream`].
pub struct Chunks<'s, 'g, R> {
    stream: &'s mut RecordStream<'g, R>,
    size: usize,
}

impl<R: BufRead> Iterator for Chunks<'_, '_, R> {
    type Item = Result<Vec<Record>, StreamError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.stream.next_chunk(self.size).transpose()
    }
}

/// Copy every extractable line of `source` into `sink`, in order.
///
/// Only the base columns are meaningful here; no enrichment runs.
pub fn run<R: BufRead, W: Write>(
    source: R,
    sink: &mut TsvSink<W>,
    grammar: &LineGrammar,
) -> Result<LineCounts, StreamError> {
    let mut stream = RecordStream::new(source, grammar);

    while let Some(record) = stream.next_record()? {
        sink.write_record(&record)?;
    }
    sink.flush()?;

    Ok(stream.counts())
}
