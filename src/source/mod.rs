//! Record sources.
//!
//! A [`RecordSource`] is a lazy, single-use sequence of [`DnsEntry`] values.
//! Two origins exist:
//! - [`open_bulk_source`] - an FDNS dump on disk (plain or gzip) or stdin
//! - [`ct_source`] - certificate transparency log search, one query per domain
//!
//! Once a source is exhausted it stays exhausted; scanning again means opening
//! a new one.

mod bulk;
mod ct;

use futures::stream::{self, BoxStream, Stream, StreamExt};
use serde::Deserialize;

pub use bulk::{open_bulk_source, open_lines, parse_record};
pub use ct::{ct_source, split_names, CtLogClient};

/// One forward-DNS fact: a hostname and what it points at.
///
/// `value` is an address for A/AAAA records, a hostname for CNAMEs, and empty
/// for names harvested from certificates.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DnsEntry {
    /// Hostname the record belongs to
    pub name: String,
    /// Record target: address, alias, or empty
    #[serde(default)]
    pub value: String,
}

impl DnsEntry {
    /// Creates an entry from a name and a value.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// An entry known only by name (certificate transparency).
    pub fn from_name(name: impl Into<String>) -> Self {
        Self::new(name, String::new())
    }
}

/// A labelled stream of records feeding one scan driver.
pub struct RecordSource {
    label: &'static str,
    progress_interval: u64,
    entries: BoxStream<'static, DnsEntry>,
}

impl RecordSource {
    /// Wraps a record stream.
    ///
    /// `progress_interval` is the number of records between two progress log
    /// lines; 0 disables them.
    pub fn new<S>(label: &'static str, progress_interval: u64, entries: S) -> Self
    where
        S: Stream<Item = DnsEntry> + Send + 'static,
    {
        Self {
            label,
            progress_interval,
            entries: entries.boxed(),
        }
    }

    /// A source over records already in memory.
    pub fn from_entries(label: &'static str, entries: Vec<DnsEntry>) -> Self {
        Self::new(label, 0, stream::iter(entries))
    }

    /// Name used in logs and reports.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Records between progress log lines (0 = none).
    pub fn progress_interval(&self) -> u64 {
        self.progress_interval
    }

    /// Waits for the next record. `None` once the source is exhausted.
    pub async fn next_entry(&mut self) -> Option<DnsEntry> {
        self.entries.next().await
    }
}

impl std::fmt::Debug for RecordSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordSource")
            .field("label", &self.label)
            .field("progress_interval", &self.progress_interval)
            .finish_non_exhaustive()
    }
}
