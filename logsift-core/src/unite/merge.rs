use crate::unite::error::UniteError;
use flate2::read::MultiGzDecoder;
use glob::glob;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const ARCHIVE_PATTERN: &str = "*.gz";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UniteSummary {
    pub archives: u64,
    /// Decompressed bytes appended to the output.
    pub bytes: u64,
}

/// `*.gz` files directly inside `dir`, sorted by path.
pub fn archives(dir: &Path) -> Result<Vec<PathBuf>, UniteError> {
    let pattern = dir.join(ARCHIVE_PATTERN).to_string_lossy().into_owned();
    let mut paths = glob(&pattern)
        .map_err(|source| UniteError::Glob {
            pattern: pattern.clone(),
            source,
        })?
        .collect::<Result<Vec<_>, _>>()?;

    paths.retain(|path| path.is_file());
    paths.sort();
    Ok(paths)
}

/// Decompress every archive in `dir` and append it to `output`.
///
/// `output` is created if missing and never truncated. Archives are appended
/// whole and as-is; nothing is deduplicated.
pub fn unite(dir: &Path, output: &Path) -> Result<UniteSummary, UniteError> {
    let paths = archives(dir)?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(output)
        .map_err(|source| UniteError::Open {
            path: output.to_path_buf(),
            source,
        })?;
    let mut writer = BufWriter::new(file);
    let mut summary = UniteSummary::default();

    for path in &paths {
        let bytes = append_archive(path, &mut writer, output)?;
        debug!(archive = %path.display(), bytes, "archive appended");
        summary.archives += 1;
        summary.bytes += bytes;
    }

    writer.flush().map_err(|source| UniteError::Write {
        path: output.to_path_buf(),
        source,
    })?;

    info!(
        dir = %dir.display(),
        output = %output.display(),
        archives = summary.archives,
        bytes = summary.bytes,
        "archives united"
    );

    Ok(summary)
}

fn append_archive<W: Write>(path: &Path, writer: &mut W, output: &Path) -> Result<u64, UniteError> {
    let file = File::open(path).map_err(|source| UniteError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut decoder = MultiGzDecoder::new(BufReader::new(file));

    let mut buf = [0u8; 64 * 1024];
    let mut total = 0u64;
    loop {
        let read = match decoder.read(&mut buf) {
            Ok(0) => return Ok(total),
            Ok(n) => n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(UniteError::Decompress {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        writer
            .write_all(&buf[..read])
            .map_err(|source| UniteError::Write {
                path: output.to_path_buf(),
                source,
            })?;
        total += read as u64;
    }
}
