use crate::record::Record;
use crate::stream::error::SinkError;
use std::borrow::Cow;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

pub const BASE_COLUMNS: [&str; 8] = [
    "ip",
    "date",
    "type_request",
    "url",
    "resp_code",
    "resp_size",
    "ref_url",
    "user_agent",
];

const DATE_OUTPUT_FORMAT: &str = "%Y-%m-%d";

/// Which enrichment columns follow the base columns.
///
/// Fixed when the sink is created so every row of a file has the same shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Columns {
    pub host: bool,
    pub net: bool,
    pub bot: bool,
    pub page_class: bool,
}

impl Columns {
    pub fn base() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            host: true,
            net: true,
            bot: true,
            page_class: true,
        }
    }

    pub fn header(&self) -> Vec<&'static str> {
        let mut header = BASE_COLUMNS.to_vec();
        if self.host {
            header.push("ip_host");
        }
        if self.net {
            header.push("ip_supernet");
        }
        if self.bot {
            header.push("bot_valid");
        }
        if self.page_class {
            header.push("page_class");
        }
        header
    }

    fn row<'a>(&self, record: &'a Record) -> Vec<Cow<'a, str>> {
        let request = record.request();
        let mut row: Vec<Cow<'a, str>> = vec![
            Cow::Borrowed(request.client_key.as_str()),
            Cow::Owned(request.timestamp.format(DATE_OUTPUT_FORMAT).to_string()),
            Cow::Borrowed(request.method.as_str()),
            Cow::Borrowed(request.path.as_str()),
            Cow::Borrowed(request.status.as_str()),
            Cow::Borrowed(request.size.as_str()),
            Cow::Borrowed(request.referrer.as_str()),
            Cow::Borrowed(request.user_agent.as_str()),
        ];

        if self.host {
            row.push(Cow::Borrowed(record.resolved_host().unwrap_or_default()));
        }
        if self.net {
            row.push(Cow::Borrowed(record.resolved_net().unwrap_or_default()));
        }
        if self.bot {
            // Spelled the way pandas writes booleans so existing notebooks keep working.
            let cell = match record.is_validated_bot() {
                Some(true) => "True",
                Some(false) => "False",
                None => "",
            };
            row.push(Cow::Borrowed(cell));
        }
        if self.page_class {
            row.push(Cow::Borrowed(record.page_class().unwrap_or_default()));
        }

        row
    }
}

/// Tab-separated record output.
pub struct TsvSink<W: Write> {
    writer: csv::Writer<W>,
    columns: Columns,
    rows: u64,
}

impl TsvSink<File> {
    /// Truncate `path` and start a fresh table.
    pub fn create(path: &Path, columns: Columns) -> Result<Self, SinkError> {
        let file = File::create(path).map_err(|source| SinkError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(file, columns)
    }

    /// Append to `path`, writing the header only when the file is new or empty.
    ///
    /// An existing table must carry exactly this sink's header.
    pub fn append(path: &Path, columns: Columns) -> Result<Self, SinkError> {
        let open_err = |source| SinkError::Open {
            path: path.to_path_buf(),
            source,
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(open_err)?;

        let has_content = file.metadata().map_err(open_err)?.len() > 0;
        if !has_content {
            return Self::new(file, columns);
        }

        let mut found = String::new();
        BufReader::new(File::open(path).map_err(open_err)?)
            .read_line(&mut found)
            .map_err(open_err)?;

        let found = found.trim_end_matches(['\r', '\n']);
        let expected = columns.header().join("\t");
        if found != expected {
            return Err(SinkError::HeaderMismatch {
                path: path.to_path_buf(),
                expected,
                found: found.to_string(),
            });
        }

        Ok(Self::resume(file, columns))
    }
}

impl<W: Write> TsvSink<W> {
    /// Start a new table on `writer`; the header goes out immediately.
    pub fn new(writer: W, columns: Columns) -> Result<Self, SinkError> {
        let mut sink = Self::resume(writer, columns);
        sink.writer.write_record(columns.header())?;
        Ok(sink)
    }

    /// Continue a table whose header is already on `writer`.
    pub fn resume(writer: W, columns: Columns) -> Self {
        let writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .from_writer(writer);

        Self {
            writer,
            columns,
            rows: 0,
        }
    }

    pub fn columns(&self) -> Columns {
        self.columns
    }

    /// Rows written through this sink, header excluded.
    pub fn rows(&self) -> u64 {
        self.rows
    }

    pub fn write_record(&mut self, record: &Record) -> Result<(), SinkError> {
        let row = self.columns.row(record);
        self.writer.write_record(row.iter().map(|cell| cell.as_bytes()))?;
        self.rows += 1;
        Ok(())
    }

    /// Write a chunk and flush it, so a crash loses at most the chunk in flight.
    pub fn write_chunk(&mut self, records: &[Record]) -> Result<(), SinkError> {
        for record in records {
            self.write_record(record)?;
        }
        self.flush()
    }

    pub fn flush(&mut self) -> Result<(), SinkError> {
        self.writer.flush().map_err(SinkError::Flush)
    }

    pub fn into_inner(self) -> Result<W, SinkError> {
        self.writer
            .into_inner()
            .map_err(|err| SinkError::Flush(err.into_error()))
    }
}
