//! fdns_filter library: asset discovery over forward-DNS dumps and
//! certificate transparency logs.
//!
//! Given the second-level domains and IP networks of a set of target
//! organizations, the scan streams an FDNS dump (billions of JSON lines,
//! optionally gzip compressed) and, side by side, queries certificate
//! transparency logs for every target domain. Every hostname that belongs to
//! the targets is written out as soon as it is found.
//!
//! # Example
//!
//! ```no_run
//! use fdns_filter::{run_scan, Config};
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     file: PathBuf::from("fdns_a.json.gz"),
//!     domains: Some(PathBuf::from("targets.txt")),
//!     bdomains: Some(PathBuf::from("exclude.txt")),
//!     ..Default::default()
//! };
//!
//! let report = run_scan(config).await?;
//! eprintln!("{} matches out of {} records", report.matched, report.processed);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library must run inside a Tokio runtime (current-thread or
//! multi-threaded): the bulk reader runs on the runtime's blocking thread pool.

#![warn(missing_docs)]

mod app;
pub mod config;
mod error_handling;
pub mod filter;
pub mod initialization;
mod run;
pub mod scan;
pub mod source;

// Re-export public API
pub use config::{normalize_args, Config, LogFormat, LogLevel};
pub use error_handling::{ConfigError, CtError, ErrorType, InitializationError, ProcessingStats};
pub use filter::{is_allowed, is_valid, FilterSet};
pub use run::{run_scan, run_scan_with_sink, run_sources, ScanReport};
pub use scan::{CollectingSink, MatchSink, SourceReport, StdoutSink};
pub use source::{DnsEntry, RecordSource};
