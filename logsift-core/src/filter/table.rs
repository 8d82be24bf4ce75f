use crate::filter::error::FilterError;
use chrono::NaiveDate;
use regex::RegexBuilder;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Column the date-range filter reads.
pub const DATE_COLUMN: &str = "date";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// An in-memory tab-separated table: one header row and its data rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { header, rows }
    }

    pub fn read(path: &Path) -> Result<Self, FilterError> {
        let file = File::open(path).map_err(|source| FilterError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, FilterError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .from_reader(reader);

        let header = reader.headers()?.iter().map(str::to_string).collect();
        let rows = reader
            .records()
            .map(|row| Ok(row?.iter().map(str::to_string).collect()))
            .collect::<Result<Vec<Vec<String>>, csv::Error>>()?;

        Ok(Self { header, rows })
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, column: &str) -> Result<usize, FilterError> {
        self.header
            .iter()
            .position(|name| name == column)
            .ok_or_else(|| FilterError::UnknownColumn {
                column: column.to_string(),
            })
    }

    /// Rows whose `column` matches `pattern`, case-insensitively, anywhere in
    /// the cell. Empty cells never match.
    pub fn filter_column(&self, column: &str, pattern: &str) -> Result<Table, FilterError> {
        let index = self.column_index(column)?;
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| FilterError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;

        Ok(self.retain(|row| {
            row.get(index)
                .is_some_and(|cell| !cell.is_empty() && regex.is_match(cell))
        }))
    }

    /// Rows dated within `start..=end`. Rows with an unparseable date are
    /// dropped; an inverted range selects nothing.
    pub fn date_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Table, FilterError> {
        let index = self.column_index(DATE_COLUMN)?;

        Ok(self.retain(|row| {
            row.get(index)
                .and_then(|cell| NaiveDate::parse_from_str(cell, DATE_FORMAT).ok())
                .is_some_and(|date| (start..=end).contains(&date))
        }))
    }

    pub fn write<W: Write>(&self, writer: W) -> Result<(), FilterError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_writer(writer);

        writer.write_record(&self.header)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush().map_err(FilterError::Flush)
    }

    pub fn write_path(&self, path: &Path) -> Result<(), FilterError> {
        let file = File::create(path).map_err(|source| FilterError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        self.write(file)
    }

    fn retain(&self, keep: impl Fn(&[String]) -> bool) -> Table {
        Table {
            header: self.header.clone(),
            rows: self.rows.iter().filter(|row| keep(row)).cloned().collect(),
        }
    }
}
