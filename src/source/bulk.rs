//! Bulk FDNS input.
//!
//! The dump is read line by line on a blocking thread and handed to the scan
//! driver through a bounded channel, so memory use does not depend on the
//! size of the file. Gzip input is recognized by its magic bytes; callers
//! never choose a reading mode.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use flate2::bufread::MultiGzDecoder;
use futures::stream;
use log::{debug, warn};
use tokio::sync::mpsc;

use super::{DnsEntry, RecordSource};
use crate::config::{
    GZIP_MAGIC, MAX_RECORD_LINE_BYTES, READ_BUFFER_SIZE, RECORD_CHANNEL_CAPACITY, STDIN_PATH,
};
use crate::error_handling::{ConfigError, ErrorType, ProcessingStats};

/// Label used in progress logs for the bulk source.
pub const BULK_LABEL: &str = "FDNS";

/// Opens a file (or stdin for `-`) as a sequence of lines, decompressing
/// gzip transparently.
///
/// Concatenated gzip members are read as one stream.
///
/// # Errors
///
/// Returns the I/O error from opening the file or peeking at its first bytes.
pub fn open_lines(path: &Path) -> io::Result<Box<dyn BufRead + Send>> {
    if path.as_os_str() == STDIN_PATH {
        debug!("Reading records from stdin");
        return detect_compression(BufReader::with_capacity(READ_BUFFER_SIZE, io::stdin()));
    }
    let file = File::open(path)?;
    detect_compression(BufReader::with_capacity(READ_BUFFER_SIZE, file))
}

/// Peeks at the magic bytes, then hands back a reader that still starts at
/// the first byte of the input.
///
/// Pipes may deliver the header over several reads, so the peek keeps
/// reading until it has the full magic or hits EOF.
fn detect_compression<R>(mut reader: R) -> io::Result<Box<dyn BufRead + Send>>
where
    R: BufRead + Send + 'static,
{
    let mut header = Vec::with_capacity(GZIP_MAGIC.len());
    while header.len() < GZIP_MAGIC.len() {
        let available = match reader.fill_buf() {
            Ok(available) => available,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if available.is_empty() {
            break;
        }
        let take = available.len().min(GZIP_MAGIC.len() - header.len());
        header.extend_from_slice(&available[..take]);
        reader.consume(take);
    }

    let is_gzip = header == GZIP_MAGIC;
    let reader = io::Cursor::new(header).chain(reader);
    if is_gzip {
        debug!("Input is gzip compressed");
        Ok(Box::new(BufReader::with_capacity(
            READ_BUFFER_SIZE,
            MultiGzDecoder::new(reader),
        )))
    } else {
        Ok(Box::new(reader))
    }
}

/// Parses one JSON record line.
///
/// Returns `None` for anything that is not an object with a non-empty `name`.
pub fn parse_record(line: &[u8]) -> Option<DnsEntry> {
    // serde also maps a JSON array onto the struct fields
    if line.trim_ascii_start().first() != Some(&b'{') {
        return None;
    }
    serde_json::from_slice::<DnsEntry>(line)
        .ok()
        .filter(|entry| !entry.name.is_empty())
}

/// Opens the bulk input and starts the reader thread.
///
/// Unparseable lines, and lines longer than `MAX_RECORD_LINE_BYTES`, are
/// counted as `MalformedRecord` and skipped. A read
/// error (truncated or corrupt gzip, failing disk) is counted as
/// `InputReadError` and ends the source.
///
/// # Errors
///
/// Returns `ConfigError::InputFile` if the input cannot be opened, before any
/// record is read.
pub fn open_bulk_source(
    path: &Path,
    progress_interval: u64,
    stats: Arc<ProcessingStats>,
) -> Result<RecordSource, ConfigError> {
    let reader = open_lines(path).map_err(|source| ConfigError::InputFile {
        path: path.to_path_buf(),
        source,
    })?;

    let (tx, rx) = mpsc::channel(RECORD_CHANNEL_CAPACITY);
    tokio::task::spawn_blocking(move || read_records(reader, tx, &stats));

    let entries = stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|entry| (entry, rx))
    });
    Ok(RecordSource::new(BULK_LABEL, progress_interval, entries))
}

fn read_records(
    mut reader: Box<dyn BufRead + Send>,
    tx: mpsc::Sender<DnsEntry>,
    stats: &ProcessingStats,
) {
    let mut line = Vec::with_capacity(512);
    loop {
        line.clear();
        match (&mut reader)
            .take(MAX_RECORD_LINE_BYTES)
            .read_until(b'\n', &mut line)
        {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                warn!("Failed to read {} input, stopping: {}", BULK_LABEL, e);
                stats.increment_error(ErrorType::InputReadError);
                break;
            }
        }

        if line.len() as u64 >= MAX_RECORD_LINE_BYTES && line.last() != Some(&b'\n') {
            stats.increment_error(ErrorType::MalformedRecord);
            debug!("Skipping record line longer than {} bytes", MAX_RECORD_LINE_BYTES);
            if let Err(e) = skip_line(reader.as_mut()) {
                warn!("Failed to read {} input, stopping: {}", BULK_LABEL, e);
                stats.increment_error(ErrorType::InputReadError);
                break;
            }
            continue;
        }

        let trimmed = line.trim_ascii();
        if trimmed.is_empty() {
            continue;
        }

        match parse_record(trimmed) {
            Some(entry) => {
                if tx.blocking_send(entry).is_err() {
                    // Driver is gone
                    break;
                }
            }
            None => {
                stats.increment_error(ErrorType::MalformedRecord);
                debug!(
                    "Skipping malformed record: {}",
                    String::from_utf8_lossy(&trimmed[..trimmed.len().min(200)])
                );
            }
        }
    }
}

/// Discards input up to and including the next newline.
fn skip_line(reader: &mut dyn BufRead) -> io::Result<()> {
    loop {
        let available = match reader.fill_buf() {
            Ok(available) => available,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if available.is_empty() {
            return Ok(());
        }
        match available.iter().position(|&b| b == b'\n') {
            Some(end) => {
                reader.consume(end + 1);
                return Ok(());
            }
            None => {
                let len = available.len();
                reader.consume(len);
            }
        }
    }
}
