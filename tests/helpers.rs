// Shared test helpers for writing fixture files and building configs.

use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use fdns_filter::{Config, LogLevel};

/// Writes `content` to `name` inside `dir` and returns the path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write fixture");
    path
}

/// Writes `content` gzip-compressed to `name` inside `dir`.
#[allow(dead_code)] // Used by other test files
pub fn write_gzip_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(content.as_bytes())
        .expect("Failed to compress fixture");
    let path = dir.join(name);
    std::fs::write(&path, encoder.finish().expect("Failed to finish gzip"))
        .expect("Failed to write fixture");
    path
}

/// Config for a bulk-only scan with quiet logging.
pub fn bulk_config(file: PathBuf, domains: Option<PathBuf>, bdomains: Option<PathBuf>) -> Config {
    Config {
        file,
        domains,
        bdomains,
        catransoff: true,
        log_level: LogLevel::Error,
        ..Default::default()
    }
}
