use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Path of a config directory under `fixtures/config`.
pub fn fixture_config(name: &str) -> PathBuf {
    let dir = fixtures_root().join("config").join(name);
    assert!(
        dir.exists(),
        "fixture config directory does not exist: {:?}",
        dir
    );
    dir
}

/// Path of a log file under `fixtures/logs`.
pub fn fixture_log(name: &str) -> PathBuf {
    fixtures_root().join("logs").join(name)
}

/// One combined-format access log line, newline included.
pub fn access_line(ip: &str, day: &str, path: &str, agent: &str) -> String {
    format!("{ip} - - [{day}:13:55:36 +0000] \"GET {path} HTTP/1.1\" 200 512 \"-\" \"{agent}\"\n")
}

pub fn gzip_to(path: &Path, text: &str) {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes()).unwrap();
    fs::write(path, encoder.finish().unwrap()).unwrap();
}
