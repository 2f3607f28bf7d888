//! Scan driver.
//!
//! Pulls every record out of one [`RecordSource`], runs the match predicate on
//! it and writes matching names to a [`MatchSink`] as soon as they are found.
//! Counters are local to the driver and returned in a [`SourceReport`]; the
//! orchestrator adds them up once all drivers are done.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use anyhow::{Context, Result};

use crate::app::ProgressTracker;
use crate::filter::FilterSet;
use crate::source::RecordSource;

/// Destination for matched hostnames.
///
/// Shared by all drivers; each call must write the whole name atomically with
/// respect to other callers.
pub trait MatchSink: Send + Sync {
    /// Writes one matched hostname.
    fn emit(&self, name: &str) -> io::Result<()>;
}

/// Writes one name per line to stdout.
///
/// The stdout lock is held for the whole line, and stdout is line buffered,
/// so every match is visible as soon as it is written.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl MatchSink for StdoutSink {
    fn emit(&self, name: &str) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{name}")
    }
}

/// Keeps matched names in memory, in arrival order.
#[derive(Debug, Default)]
pub struct CollectingSink {
    names: Mutex<Vec<String>>,
}

impl CollectingSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the names collected so far.
    pub fn names(&self) -> Vec<String> {
        self.names
            .lock()
            .map(|names| names.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }
}

impl MatchSink for CollectingSink {
    fn emit(&self, name: &str) -> io::Result<()> {
        self.names
            .lock()
            .map_err(|_| io::Error::other("collecting sink poisoned"))?
            .push(name.to_string());
        Ok(())
    }
}

/// Per-source result of a scan.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceReport {
    /// Source label (`FDNS`, `CA transparency`, ...)
    pub label: &'static str,
    /// Records pulled from the source
    pub processed: u64,
    /// Records that passed the predicate and were emitted
    pub matched: u64,
    /// Wall time spent draining the source
    pub elapsed_seconds: f64,
}

/// Drains `source`, emitting every record accepted by `filters`.
///
/// Records are evaluated and emitted in source order.
///
/// # Errors
///
/// Returns an error only if the sink fails (for example stdout was closed);
/// the remaining records of the source are not read.
pub async fn drive(
    mut source: RecordSource,
    filters: Arc<FilterSet>,
    sink: Arc<dyn MatchSink>,
) -> Result<SourceReport> {
    let label = source.label();
    let mut progress = ProgressTracker::new(label, source.progress_interval());
    let start = Instant::now();
    let mut processed: u64 = 0;
    let mut matched: u64 = 0;

    while let Some(entry) = source.next_entry().await {
        processed += 1;
        if filters.matches(&entry) {
            sink.emit(&entry.name)
                .with_context(|| format!("Failed to write {label} match {}", entry.name))?;
            matched += 1;
        }
        progress.record(processed, matched);
    }

    log::debug!("{label}: source exhausted after {processed} records");

    Ok(SourceReport {
        label,
        processed,
        matched,
        elapsed_seconds: start.elapsed().as_secs_f64(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::DnsEntry;

    struct BrokenSink;

    impl MatchSink for BrokenSink {
        fn emit(&self, _name: &str) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    fn example_filters() -> Arc<FilterSet> {
        Arc::new(FilterSet::new(vec!["example.com".to_string()], vec![], vec![]))
    }

    #[tokio::test]
    async fn test_drive_counts_and_emits_in_order() {
        let source = RecordSource::from_entries(
            "memory",
            vec![
                DnsEntry::new("b.example.com", "1.1.1.1"),
                DnsEntry::new("a.other.com", "2.2.2.2"),
                DnsEntry::new("a.example.com", "3.3.3.3"),
            ],
        );
        let sink = Arc::new(CollectingSink::new());

        let report = drive(source, example_filters(), sink.clone()).await.unwrap();
        assert_eq!(report.label, "memory");
        assert_eq!(report.processed, 3);
        assert_eq!(report.matched, 2);
        assert_eq!(sink.names(), vec!["b.example.com", "a.example.com"]);
    }

    #[tokio::test]
    async fn test_drive_empty_source() {
        let source = RecordSource::from_entries("memory", vec![]);
        let sink = Arc::new(CollectingSink::new());
        let report = drive(source, example_filters(), sink.clone()).await.unwrap();
        assert_eq!(report.processed, 0);
        assert_eq!(report.matched, 0);
        assert!(sink.names().is_empty());
    }

    #[tokio::test]
    async fn test_drive_stops_on_sink_failure() {
        let source = RecordSource::from_entries(
            "memory",
            vec![DnsEntry::new("a.example.com", "1.1.1.1")],
        );
        let err = drive(source, example_filters(), Arc::new(BrokenSink))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("a.example.com"));
    }

    #[tokio::test]
    async fn test_drive_with_progress_interval() {
        let entries = (0..10)
            .map(|i| DnsEntry::new(format!("h{i}.example.com"), "10.0.0.1"))
            .collect::<Vec<_>>();
        let source = RecordSource::new("memory", 4, futures::stream::iter(entries));
        let sink = Arc::new(CollectingSink::new());
        let report = drive(source, example_filters(), sink).await.unwrap();
        assert_eq!(report.processed, 10);
        assert_eq!(report.matched, 10);
    }
}
