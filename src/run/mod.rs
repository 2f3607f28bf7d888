//! Scan orchestration.
//!
//! Loads the filter lists, opens one [`RecordSource`] per enabled origin, runs
//! a scan driver per source concurrently and waits for all of them. Drivers
//! share nothing but the read-only filters, the statistics tracker and the
//! output sink.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{debug, info, warn};

use crate::app::{print_error_statistics, print_summary};
use crate::config::Config;
use crate::error_handling::{ConfigError, ErrorType, ProcessingStats};
use crate::filter::FilterSet;
use crate::initialization::init_client;
use crate::scan::{drive, MatchSink, SourceReport, StdoutSink};
use crate::source::{ct_source, open_bulk_source, CtLogClient, RecordSource};

/// Results of a scan run.
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Records processed across all sources
    pub processed: u64,
    /// Records matched across all sources (a name found by two sources counts twice)
    pub matched: u64,
    /// Per-source breakdown, in the order the sources were started
    pub sources: Vec<SourceReport>,
    /// Bulk lines skipped because they did not parse
    pub skipped_records: usize,
    /// Certificate transparency queries that failed
    pub failed_queries: usize,
    /// Elapsed time in seconds
    pub elapsed_seconds: f64,
}

/// Runs a scan, writing matched hostnames to stdout.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, a list file or the input
/// cannot be read, no domain and no network was supplied, or stdout fails.
///
/// # Example
///
/// ```no_run
/// use fdns_filter::{run_scan, Config};
/// use std::path::PathBuf;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config {
///     file: PathBuf::from("fdns_a.json.gz"),
///     domains: Some(PathBuf::from("targets.txt")),
///     ..Default::default()
/// };
/// let report = run_scan(config).await?;
/// eprintln!("{} of {} records matched", report.matched, report.processed);
/// # Ok(())
/// # }
/// ```
pub async fn run_scan(config: Config) -> Result<ScanReport> {
    run_scan_with_sink(config, Arc::new(StdoutSink)).await
}

/// Runs a scan, writing matched hostnames to `sink`.
///
/// # Errors
///
/// Same as [`run_scan`].
pub async fn run_scan_with_sink(config: Config, sink: Arc<dyn MatchSink>) -> Result<ScanReport> {
    config
        .validate()
        .context("Configuration validation failed")?;

    let filters = FilterSet::load(config.domains.as_deref(), config.bdomains.as_deref()).await?;
    if filters.is_unrestricted() {
        return Err(ConfigError::NoFilters.into());
    }
    let filters = Arc::new(filters);
    let stats = Arc::new(ProcessingStats::new());

    let sources = open_sources(&config, &filters, &stats)?;

    let start = Instant::now();
    let sources = run_sources(sources, filters, sink).await?;
    let elapsed_seconds = start.elapsed().as_secs_f64();

    print_summary(&sources);
    print_error_statistics(&stats);
    info!("Finished.");

    Ok(ScanReport {
        processed: sources.iter().map(|s| s.processed).sum(),
        matched: sources.iter().map(|s| s.matched).sum(),
        sources,
        skipped_records: stats.get_error_count(ErrorType::MalformedRecord),
        failed_queries: stats.get_error_count(ErrorType::CtRequestError)
            + stats.get_error_count(ErrorType::CtStatusError)
            + stats.get_error_count(ErrorType::CtDecodeError),
        elapsed_seconds,
    })
}

/// Opens the bulk source and, unless disabled, the certificate transparency source.
fn open_sources(
    config: &Config,
    filters: &FilterSet,
    stats: &Arc<ProcessingStats>,
) -> Result<Vec<RecordSource>> {
    let ct_client = if config.catransoff {
        debug!("Certificate transparency queries disabled");
        None
    } else if filters.allow.is_empty() {
        info!("Skipping certificate transparency logs: no domains to query.");
        None
    } else {
        let client = init_client(config).context("Failed to initialize HTTP client")?;
        Some(CtLogClient::new(client, config.ct_url.clone()))
    };

    let mut sources = Vec::with_capacity(2);

    info!("Parsing FDNS file.");
    sources.push(open_bulk_source(
        &config.file,
        config.progress_interval,
        Arc::clone(stats),
    )?);

    if let Some(client) = ct_client {
        info!("Querying certificate transparency logs.");
        sources.push(ct_source(client, filters.allow.clone(), Arc::clone(stats)));
    }

    Ok(sources)
}

/// Drives every source on its own task and waits for all of them.
///
/// Drivers are independent: one failing does not stop the others. The first
/// failure is returned once all have finished.
///
/// # Errors
///
/// Returns the first driver error, or an error if a driver task panicked.
pub async fn run_sources(
    sources: Vec<RecordSource>,
    filters: Arc<FilterSet>,
    sink: Arc<dyn MatchSink>,
) -> Result<Vec<SourceReport>> {
    let mut tasks = FuturesUnordered::new();
    for (index, source) in sources.into_iter().enumerate() {
        let task = tokio::spawn(drive(source, Arc::clone(&filters), Arc::clone(&sink)));
        tasks.push(async move { (index, task.await) });
    }

    let mut reports = Vec::with_capacity(tasks.len());
    let mut first_error = None;
    while let Some((index, task_result)) = tasks.next().await {
        match task_result {
            Ok(Ok(report)) => reports.push((index, report)),
            Ok(Err(e)) => {
                warn!("Scan driver failed: {:#}", e);
                first_error.get_or_insert(e);
            }
            Err(join_error) => {
                warn!("Scan driver panicked: {:?}", join_error);
                first_error.get_or_insert(anyhow::anyhow!("Scan driver panicked: {join_error}"));
            }
        }
    }

    if let Some(e) = first_error {
        return Err(e);
    }

    reports.sort_by_key(|(index, _)| *index);
    Ok(reports.into_iter().map(|(_, report)| report).collect())
}
