//! Configuration constants.
//!
//! This module defines the constants used as defaults throughout the application.

/// Number of processed bulk records between two progress log lines.
pub const PROGRESS_INTERVAL: u64 = 1_000_000;

/// Capacity of the channel between the bulk reader thread and its scan driver.
///
/// Bounds the number of parsed records held in memory at once, independent of
/// the size of the input file.
pub const RECORD_CHANNEL_CAPACITY: usize = 8192;

/// Buffer size in bytes for reading the bulk input file.
pub const READ_BUFFER_SIZE: usize = 256 * 1024;

/// Longest bulk record line accepted, in bytes. Real FDNS records are a few
/// hundred bytes; anything past this is skipped as malformed.
pub const MAX_RECORD_LINE_BYTES: u64 = 64 * 1024;

/// Gzip member header magic bytes.
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Default certificate transparency search endpoint.
pub const DEFAULT_CT_URL: &str = "https://crt.sh/";

/// Per-request timeout in seconds for certificate transparency queries.
/// crt.sh routinely takes tens of seconds on large organizations.
pub const CT_TIMEOUT_SECS: u64 = 60;

/// Default User-Agent string for certificate transparency requests.
pub const DEFAULT_USER_AGENT: &str = concat!("fdns_filter/", env!("CARGO_PKG_VERSION"));

/// Path value that selects stdin as the bulk input.
pub const STDIN_PATH: &str = "-";

/// Long flags that the CLI historically accepted with a single dash.
pub const GO_STYLE_FLAGS: &[&str] = &[
    "file",
    "domains",
    "bdomains",
    "catransoff",
    "log-level",
    "log-format",
    "timeout-seconds",
    "user-agent",
    "ct-url",
    "progress-interval",
];
